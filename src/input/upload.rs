//! In-memory file payload handed to the backend client

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use log::info;
use std::path::Path;
use tokio::fs;

/// A selected file, ready to be sent as a multipart part.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk; the MIME type is derived from its extension.
    pub async fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScreenerError::Validation(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| ScreenerError::Validation(format!("Not a file: {}", path.display())))?;

        let mime_type = FileType::from_path(path).mime_type();
        let bytes = fs::read(path).await?;
        info!("Loaded {} ({} bytes, {})", file_name, bytes.len(), mime_type);

        Ok(Self::new(file_name, mime_type, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// MIME types compare without case, as in a `Content-Type` header.
    pub fn has_mime_type(&self, mime_type: &str) -> bool {
        self.mime_type.eq_ignore_ascii_case(mime_type)
    }
}
