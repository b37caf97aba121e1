mod did;
mod paths_payload;
mod stroke;
mod timestamp;
mod vector_record;
