//! Logo storage.
//!
//! Uploaded logos are validated (image content type, size cap) before any
//! byte is written, then stored under the configured upload directory with
//! a UUID-qualified name and served back at the public base path.

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::config::AppConfig;

/// Extensions accepted for logo files
const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "svg"];

/// Errors from logo validation and storage
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Uploaded file is empty")]
    EmptyFile,
    #[error("File is not an image (content type '{content_type}')")]
    NotAnImage { content_type: String },
    #[error("File too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem-backed store for company logos
#[derive(Debug, Clone)]
pub struct LogoStore {
    dir: PathBuf,
    public_base: String,
    max_bytes: usize,
}

impl LogoStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.upload_dir),
            public_base: config.upload_public_base.trim_end_matches('/').to_string(),
            max_bytes: config.max_logo_bytes,
        }
    }

    /// Directory files are written to, for wiring the static file service
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validate and persist an uploaded logo, returning its public URL.
    ///
    /// Validation happens entirely before the write: a rejected upload
    /// leaves no file behind.
    pub async fn store(
        &self,
        original_filename: Option<&str>,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Result<String, StorageError> {
        if data.is_empty() {
            return Err(StorageError::EmptyFile);
        }

        let content_type = content_type.unwrap_or_default();
        if !content_type.starts_with("image/") {
            return Err(StorageError::NotAnImage {
                content_type: content_type.to_string(),
            });
        }

        if data.len() > self.max_bytes {
            return Err(StorageError::TooLarge {
                size: data.len(),
                max: self.max_bytes,
            });
        }

        let extension = extension_for(original_filename, content_type);
        let name = format!("logo-{}.{}", Uuid::new_v4(), extension);

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&name), data).await?;

        Ok(format!("{}/{}", self.public_base, name))
    }
}

/// Pick a file extension from the original name when it carries a known
/// image extension, falling back to the content-type subtype.
fn extension_for(original_filename: Option<&str>, content_type: &str) -> String {
    if let Some(filename) = original_filename {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            return ext;
        }
    }

    match content_type.strip_prefix("image/") {
        Some("jpeg") => "jpg".to_string(),
        Some("svg+xml") => "svg".to_string(),
        Some(subtype) if SUPPORTED_EXTENSIONS.contains(&subtype) => subtype.to_string(),
        _ => "png".to_string(),
    }
}
