pub mod archive;
pub mod color;
pub mod config;
pub mod file_size;
