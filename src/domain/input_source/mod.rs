pub mod directory_path;
pub mod image_file_path;
pub mod input_source;
pub mod path_error;
pub mod source_image;
pub mod zip_file_path;
