//! Upload Storage Port - Filesystem operations for uploaded media.
//!
//! The analysis handler stores every accepted upload before scoring it, so
//! the client can fetch it back later. Uploads are short-lived: a cleanup
//! operation removes everything older than the retention window.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::domain::analysis::MediaFormat;

/// Port for storing and serving uploaded media.
///
/// # Contract
///
/// Implementations must:
/// - Generate collision-free stored names (`{uuid}.{extension}`)
/// - Write atomically (no partial content visible on failure)
/// - Compute a SHA-256 checksum of the stored bytes
/// - Refuse names that could escape the storage root
#[async_trait]
pub trait UploadStorage: Send + Sync {
    /// Store upload bytes under a freshly generated name.
    async fn store(&self, format: MediaFormat, bytes: &[u8]) -> Result<StoredUpload, StorageError>;

    /// Read a stored upload by name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidName` for names that are not a plain
    /// file name with a whitelisted extension, `StorageError::NotFound` if the
    /// file doesn't exist.
    async fn read(&self, stored_name: &str) -> Result<StoredFile, StorageError>;

    /// Delete uploads whose last modification is older than `max_age`.
    ///
    /// Best effort: individual failures are counted, not returned.
    async fn delete_older_than(&self, max_age: Duration) -> Result<CleanupReport, StorageError>;
}

/// Result of storing an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub stored_name: String,
    pub size_bytes: u64,
    /// Hex-encoded SHA-256 of the content.
    pub sha256: String,
}

/// A stored upload read back for serving.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub format: MediaFormat,
    pub bytes: Vec<u8>,
}

/// Outcome of a cleanup run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub deleted: usize,
    pub retained: usize,
    pub failed: usize,
}

/// Errors that can occur during upload storage operations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// File was not found.
    #[error("File not found: {name}")]
    NotFound { name: String },

    /// Name is not a plain stored-file name.
    #[error("Invalid file name: {name}")]
    InvalidName { name: String },

    /// IO error during file operation.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl StorageError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}
