//! Local Filesystem Upload Storage - Implementation of UploadStorage.
//!
//! Stores uploads flat in one directory under generated names and serves
//! them back by name. Uses atomic writes and SHA-256 checksums.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::domain::analysis::MediaFormat;
use crate::ports::{CleanupReport, StorageError, StoredFile, StoredUpload, UploadStorage};

/// Local filesystem storage for uploaded media.
///
/// # Directory Structure
///
/// ```text
/// {upload_dir}/
/// ├── 1b4e28ba-2fa1-41d2-883f-0016d3cca427.png
/// └── 6fa459ea-ee8a-4ca4-894e-db77e160355e.mp4
/// ```
///
/// Writes go to `{name}.tmp` first and are renamed into place after a sync.
#[derive(Debug, Clone)]
pub struct LocalUploadStorage {
    upload_dir: PathBuf,
}

impl LocalUploadStorage {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    async fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.upload_dir).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create upload directory {}: {}",
                self.upload_dir.display(),
                e
            ))
        })
    }

    fn compute_checksum(content: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content);
        hex::encode(hasher.finalize())
    }

    /// Accepts only a single plain path component with a known extension.
    fn resolve(&self, stored_name: &str) -> Result<(PathBuf, MediaFormat), StorageError> {
        let mut components = Path::new(stored_name).components();
        let is_plain = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !is_plain || stored_name.starts_with('.') {
            return Err(StorageError::invalid_name(stored_name));
        }

        let format = Path::new(stored_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(MediaFormat::from_extension)
            .ok_or_else(|| StorageError::invalid_name(stored_name))?;

        Ok((self.upload_dir.join(stored_name), format))
    }
}

#[async_trait]
impl UploadStorage for LocalUploadStorage {
    async fn store(&self, format: MediaFormat, bytes: &[u8]) -> Result<StoredUpload, StorageError> {
        self.ensure_dir().await?;

        let stored_name = format!("{}.{}", Uuid::new_v4(), format.extension);
        let final_path = self.upload_dir.join(&stored_name);
        let temp_path = self.upload_dir.join(format!("{}.tmp", stored_name));

        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(bytes).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::io(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        fs::rename(&temp_path, &final_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })?;

        Ok(StoredUpload {
            stored_name,
            size_bytes: bytes.len() as u64,
            sha256: Self::compute_checksum(bytes),
        })
    }

    async fn read(&self, stored_name: &str) -> Result<StoredFile, StorageError> {
        let (path, format) = self.resolve(stored_name)?;

        let bytes = fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::not_found(stored_name),
            _ => StorageError::io(format!("Failed to read {}: {}", path.display(), e)),
        })?;

        Ok(StoredFile { format, bytes })
    }

    async fn delete_older_than(&self, max_age: Duration) -> Result<CleanupReport, StorageError> {
        let mut report = CleanupReport::default();

        let mut entries = match fs::read_dir(&self.upload_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(report),
            Err(e) => {
                return Err(StorageError::io(format!(
                    "Failed to read directory {}: {}",
                    self.upload_dir.display(),
                    e
                )))
            }
        };

        let cutoff = SystemTime::now()
            .checked_sub(max_age)
            .unwrap_or(SystemTime::UNIX_EPOCH);

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read upload directory entry");
                    report.failed += 1;
                    break;
                }
            };

            let path = entry.path();
            let modified = match entry.metadata().await {
                Ok(meta) if !meta.is_file() => continue,
                Ok(meta) => meta.modified(),
                Err(e) => Err(e),
            };

            let modified = match modified {
                Ok(modified) => modified,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to stat upload");
                    report.failed += 1;
                    continue;
                }
            };

            if modified > cutoff {
                report.retained += 1;
                continue;
            }

            match fs::remove_file(&path).await {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "Deleted expired upload");
                    report.deleted += 1;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to delete upload");
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::MediaKind;
    use tempfile::TempDir;

    // ───────────────────────────────────────────────────────────────
    // Test helpers
    // ───────────────────────────────────────────────────────────────

    fn create_storage() -> (LocalUploadStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalUploadStorage::new(temp_dir.path().join("uploads"));
        (storage, temp_dir)
    }

    fn png() -> MediaFormat {
        MediaFormat::from_mime("image/png").unwrap()
    }

    fn age_file(path: &Path, age: Duration) {
        let file = std::fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
    }

    // ───────────────────────────────────────────────────────────────
    // Store / read
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn store_writes_file_with_generated_name() {
        let (storage, _temp) = create_storage();

        let stored = storage.store(png(), b"png-bytes").await.unwrap();

        assert!(stored.stored_name.ends_with(".png"));
        assert_eq!(stored.size_bytes, 9);
        let on_disk = std::fs::read(storage.upload_dir().join(&stored.stored_name)).unwrap();
        assert_eq!(on_disk, b"png-bytes");
    }

    #[tokio::test]
    async fn store_leaves_no_temp_file() {
        let (storage, _temp) = create_storage();

        storage.store(png(), b"x").await.unwrap();

        let names: Vec<String> = std::fs::read_dir(storage.upload_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(!names[0].ends_with(".tmp"));
    }

    #[tokio::test]
    async fn store_computes_sha256() {
        let (storage, _temp) = create_storage();

        let stored = storage.store(png(), b"hello").await.unwrap();

        assert_eq!(
            stored.sha256,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[tokio::test]
    async fn stored_names_are_unique() {
        let (storage, _temp) = create_storage();

        let a = storage.store(png(), b"same").await.unwrap();
        let b = storage.store(png(), b"same").await.unwrap();

        assert_ne!(a.stored_name, b.stored_name);
    }

    #[tokio::test]
    async fn read_returns_bytes_and_format() {
        let (storage, _temp) = create_storage();
        let format = MediaFormat::from_mime("audio/webm").unwrap();

        let stored = storage.store(format, b"voice").await.unwrap();
        let file = storage.read(&stored.stored_name).await.unwrap();

        assert_eq!(file.bytes, b"voice");
        assert_eq!(file.format.kind, MediaKind::Audio);
        assert_eq!(file.format.mime, "audio/webm");
    }

    #[tokio::test]
    async fn read_missing_file_is_not_found() {
        let (storage, _temp) = create_storage();

        let result = storage.read("0e1f0c5e-0000-0000-0000-000000000000.png").await;

        assert!(matches!(result, Err(StorageError::NotFound { .. })));
    }

    #[tokio::test]
    async fn read_rejects_traversal_and_unknown_extensions() {
        let (storage, _temp) = create_storage();

        for name in ["../secret.png", "a/b.png", "/etc/passwd", "notes.txt", ".png", "noext", ""] {
            let result = storage.read(name).await;
            assert!(
                matches!(result, Err(StorageError::InvalidName { .. })),
                "expected invalid name for {:?}",
                name
            );
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Cleanup
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn cleanup_deletes_only_expired_files() {
        let (storage, _temp) = create_storage();
        let old = storage.store(png(), b"old").await.unwrap();
        let fresh = storage.store(png(), b"fresh").await.unwrap();
        age_file(
            &storage.upload_dir().join(&old.stored_name),
            Duration::from_secs(25 * 3600),
        );

        let report = storage
            .delete_older_than(Duration::from_secs(24 * 3600))
            .await
            .unwrap();

        assert_eq!(report.deleted, 1);
        assert_eq!(report.retained, 1);
        assert_eq!(report.failed, 0);
        assert!(storage.read(&old.stored_name).await.is_err());
        assert!(storage.read(&fresh.stored_name).await.is_ok());
    }

    #[tokio::test]
    async fn cleanup_skips_directories() {
        let (storage, _temp) = create_storage();
        storage.store(png(), b"x").await.unwrap();
        std::fs::create_dir(storage.upload_dir().join("nested")).unwrap();

        let report = storage.delete_older_than(Duration::ZERO).await.unwrap();

        assert_eq!(report.deleted, 1);
        assert!(storage.upload_dir().join("nested").exists());
    }

    #[tokio::test]
    async fn cleanup_of_missing_directory_is_empty_report() {
        let (storage, _temp) = create_storage();

        let report = storage.delete_older_than(Duration::ZERO).await.unwrap();

        assert_eq!(report, CleanupReport::default());
    }
}
