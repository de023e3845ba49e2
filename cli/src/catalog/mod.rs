pub mod scan;

pub use scan::{file_name, list_files, scan_directory};
