pub mod base64;
pub mod path_ext;
pub mod sanitize_file_name;
pub mod xxhash;
