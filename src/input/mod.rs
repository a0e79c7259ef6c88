//! Input handling
//! Detects MIME types and loads resume files for upload

pub mod file_detector;
pub mod upload;

pub use file_detector::FileType;
pub use upload::UploadFile;
