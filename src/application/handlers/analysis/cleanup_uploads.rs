//! CleanupUploads - Command handler that removes expired uploads.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{CleanupReport, UploadStorage};

/// Handler for deleting uploads older than the retention window.
pub struct CleanupUploadsHandler {
    storage: Arc<dyn UploadStorage>,
    retention: Duration,
}

impl CleanupUploadsHandler {
    pub fn new(storage: Arc<dyn UploadStorage>, retention: Duration) -> Self {
        Self { storage, retention }
    }

    pub async fn handle(&self) -> Result<CleanupReport, DomainError> {
        let report = self
            .storage
            .delete_older_than(self.retention)
            .await
            .map_err(|e| DomainError::new(ErrorCode::StorageError, e.to_string()))?;

        tracing::info!(
            deleted = report.deleted,
            retained = report.retained,
            failed = report.failed,
            retention_secs = self.retention.as_secs(),
            "Upload cleanup finished"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalUploadStorage;
    use crate::domain::analysis::MediaFormat;
    use tempfile::TempDir;

    #[tokio::test]
    async fn fresh_uploads_are_retained() {
        let temp = TempDir::new().unwrap();
        let storage = Arc::new(LocalUploadStorage::new(temp.path()));
        let format = MediaFormat::from_mime("video/mp4").unwrap();
        storage.store(format, b"a").await.unwrap();
        storage.store(format, b"b").await.unwrap();

        let handler = CleanupUploadsHandler::new(storage, Duration::from_secs(24 * 3600));
        let report = handler.handle().await.unwrap();

        assert_eq!(report.deleted, 0);
        assert_eq!(report.retained, 2);
    }

    #[tokio::test]
    async fn zero_retention_deletes_everything() {
        let temp = TempDir::new().unwrap();
        let storage = Arc::new(LocalUploadStorage::new(temp.path()));
        let format = MediaFormat::from_mime("audio/ogg").unwrap();
        storage.store(format, b"a").await.unwrap();

        let handler = CleanupUploadsHandler::new(storage, Duration::ZERO);
        let report = handler.handle().await.unwrap();

        assert_eq!(report.deleted, 1);
        assert_eq!(report.failed, 0);
    }
}
