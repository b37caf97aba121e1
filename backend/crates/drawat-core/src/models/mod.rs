pub mod agent;
pub mod did;
pub mod paths_payload;
pub mod stroke;
pub mod stroke_point;
pub mod timestamp;
pub mod vector_record;
