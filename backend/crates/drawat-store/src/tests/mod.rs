mod table_row;
