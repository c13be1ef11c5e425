//! AnalyzeMedia - Command handler for scoring an uploaded file.
//!
//! Validates the upload, stores it, runs detection and derives the
//! presentational result. When the caller is identified the result is also
//! written to history; a history failure is logged and never fails the
//! request.

use std::sync::Arc;
use std::time::Instant;

use crate::domain::analysis::{validate_upload_size, AnalysisResult, MediaFile, MediaFormat};
use crate::domain::foundation::{AnalysisId, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::history::HistoryEntry;
use crate::ports::{DeepfakeDetector, HistoryRepository, MediaUpload, StorageError, UploadStorage};

/// Path prefix stored files are served from.
pub const FILES_ROUTE_PREFIX: &str = "/api/files";

/// Command to analyze one uploaded file.
#[derive(Debug, Clone)]
pub struct AnalyzeMediaCommand {
    /// Client-supplied file name.
    pub file_name: String,
    /// Client-supplied content type.
    pub mime_type: String,
    pub bytes: Vec<u8>,
    /// Set when the request identified a user; enables history.
    pub user_id: Option<UserId>,
}

/// Handler for media analysis.
pub struct AnalyzeMediaHandler {
    detector: Arc<dyn DeepfakeDetector>,
    storage: Arc<dyn UploadStorage>,
    history: Arc<dyn HistoryRepository>,
    max_upload_bytes: u64,
}

impl AnalyzeMediaHandler {
    pub fn new(
        detector: Arc<dyn DeepfakeDetector>,
        storage: Arc<dyn UploadStorage>,
        history: Arc<dyn HistoryRepository>,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            detector,
            storage,
            history,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    pub async fn handle(&self, cmd: AnalyzeMediaCommand) -> Result<AnalysisResult, DomainError> {
        let started = Instant::now();

        // 1. Validate against the whitelist and size limit
        let format = MediaFormat::from_mime(&cmd.mime_type)?;
        let size = cmd.bytes.len() as u64;
        validate_upload_size(size, self.max_upload_bytes)?;

        // 2. Store the upload so it can be served back
        let stored = self
            .storage
            .store(format, &cmd.bytes)
            .await
            .map_err(storage_error)?;

        // 3. Detect (vendor or demo)
        let upload = MediaUpload::new(format.kind, &stored.stored_name, format.mime, cmd.bytes);
        let detection = self.detector.detect(&upload).await.map_err(|e| {
            DomainError::new(ErrorCode::DetectionFailed, e.to_string())
                .with_detail("kind", format.kind.as_str())
        })?;

        // 4. Derive the result
        let file = MediaFile {
            name: display_name(&cmd.file_name, &stored.stored_name),
            url: format!("{}/{}", FILES_ROUTE_PREFIX, stored.stored_name),
            stored_name: stored.stored_name,
            size: stored.size_bytes,
            mime_type: format.mime.to_string(),
            sha256: stored.sha256,
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let result = AnalysisResult::from_detection(
            AnalysisId::new(),
            detection,
            file,
            elapsed_ms,
            Timestamp::now(),
        );

        let summary = result.summary();
        tracing::info!(
            analysis_id = %summary.id,
            kind = %format.kind,
            provider = %summary.provider,
            demo_mode = summary.demo_mode,
            size,
            confidence = summary.confidence.value(),
            risk_level = %summary.risk_level,
            elapsed_ms,
            "Analysis complete"
        );

        // 5. Record history for identified users
        if let Some(user_id) = cmd.user_id {
            self.record_history(user_id, &result).await;
        }

        Ok(result)
    }

    async fn record_history(&self, user_id: UserId, result: &AnalysisResult) {
        let entry = match HistoryEntry::from_result(user_id, result) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to build history entry");
                return;
            }
        };

        if let Err(e) = self.history.record(&entry).await {
            tracing::warn!(
                analysis_id = %entry.id,
                backend = self.history.backend_name(),
                error = %e,
                "Failed to record analysis history"
            );
        }
    }
}

/// Keeps only the final path segment of a client-supplied name.
fn display_name(client_name: &str, stored_name: &str) -> String {
    let name = client_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() {
        stored_name.to_string()
    } else {
        name.to_string()
    }
}

fn storage_error(err: StorageError) -> DomainError {
    DomainError::new(ErrorCode::StorageError, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::detection::{
        fixed_scores, DemoDetector, FallbackDetector, MockDetector, NOT_CONFIGURED_REASON,
    };
    use crate::adapters::history::InMemoryHistoryRepository;
    use crate::adapters::storage::LocalUploadStorage;
    use crate::domain::analysis::{Detection, MediaKind, RiskLevel};
    use async_trait::async_trait;
    use tempfile::TempDir;

    const MAX: u64 = 1024;

    struct FailingHistory;

    #[async_trait]
    impl HistoryRepository for FailingHistory {
        async fn record(&self, _entry: &HistoryEntry) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "insert failed"))
        }

        async fn list_for_user(
            &self,
            _user_id: &UserId,
            _limit: usize,
        ) -> Result<Vec<HistoryEntry>, DomainError> {
            Ok(Vec::new())
        }

        fn backend_name(&self) -> &'static str {
            "failing"
        }
    }

    struct Fixture {
        handler: AnalyzeMediaHandler,
        history: InMemoryHistoryRepository,
        _temp: TempDir,
    }

    fn fixture(detector: Arc<dyn DeepfakeDetector>) -> Fixture {
        let temp = TempDir::new().unwrap();
        let history = InMemoryHistoryRepository::new();
        let handler = AnalyzeMediaHandler::new(
            detector,
            Arc::new(LocalUploadStorage::new(temp.path())),
            Arc::new(history.clone()),
            MAX,
        );
        Fixture {
            handler,
            history,
            _temp: temp,
        }
    }

    fn demo_fixture() -> Fixture {
        fixture(Arc::new(FallbackDetector::new(Arc::new(DemoDetector::seeded(1)))))
    }

    fn command(mime: &str, bytes: Vec<u8>) -> AnalyzeMediaCommand {
        AnalyzeMediaCommand {
            file_name: "clip".to_string(),
            mime_type: mime.to_string(),
            bytes,
            user_id: None,
        }
    }

    #[tokio::test]
    async fn demo_mode_produces_result_for_each_kind() {
        let f = demo_fixture();

        for (mime, kind) in [
            ("image/png", MediaKind::Image),
            ("video/mp4", MediaKind::Video),
            ("audio/wav", MediaKind::Audio),
        ] {
            let result = f.handler.handle(command(mime, vec![7; 32])).await.unwrap();
            assert_eq!(result.kind(), kind);
            let summary = result.summary();
            assert!(summary.demo_mode);
            assert_eq!(summary.fallback_reason.as_deref(), Some(NOT_CONFIGURED_REASON));
            assert_eq!(summary.file.size, 32);
            assert_eq!(summary.file.mime_type, mime);
            assert!(summary.file.url.starts_with("/api/files/"));
        }
    }

    #[tokio::test]
    async fn vendor_scores_drive_derived_fields() {
        let vendor = MockDetector::new()
            .for_kinds("sightengine", &[MediaKind::Image])
            .with_detection(Detection::vendor("sightengine", fixed_scores(MediaKind::Image)));
        let detector = FallbackDetector::new(Arc::new(DemoDetector::seeded(1)))
            .with_vendor(Arc::new(vendor));
        let f = fixture(Arc::new(detector));

        let result = f.handler.handle(command("image/jpeg", vec![1; 8])).await.unwrap();
        let summary = result.summary();

        assert_eq!(summary.provider, "sightengine");
        assert!(!summary.demo_mode);
        assert_eq!(summary.confidence.value(), 0.3);
        assert_eq!(summary.risk_level, RiskLevel::Low);
        assert!(!summary.is_deepfake);
        assert!(summary.file.stored_name.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn unsupported_mime_is_rejected() {
        let f = demo_fixture();

        let err = f
            .handler
            .handle(command("application/pdf", vec![1; 8]))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::UnsupportedMediaType);
    }

    #[tokio::test]
    async fn empty_file_is_rejected() {
        let f = demo_fixture();

        let err = f.handler.handle(command("image/png", Vec::new())).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::EmptyFile);
    }

    #[tokio::test]
    async fn size_limit_is_inclusive() {
        let f = demo_fixture();

        assert!(f
            .handler
            .handle(command("image/png", vec![0; MAX as usize]))
            .await
            .is_ok());

        let err = f
            .handler
            .handle(command("image/png", vec![0; MAX as usize + 1]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::FileTooLarge);
    }

    #[tokio::test]
    async fn identified_user_gets_history_entry() {
        let f = demo_fixture();
        let mut cmd = command("audio/mpeg", vec![3; 16]);
        cmd.user_id = Some(UserId::new("user-7").unwrap());

        let result = f.handler.handle(cmd).await.unwrap();

        let entries = f
            .history
            .list_for_user(&UserId::new("user-7").unwrap(), 10)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, result.summary().id);
        assert_eq!(entries[0].media_type, MediaKind::Audio);
    }

    #[tokio::test]
    async fn anonymous_request_skips_history() {
        let f = demo_fixture();

        f.handler.handle(command("image/gif", vec![3; 16])).await.unwrap();

        assert!(f.history.is_empty().await);
    }

    #[tokio::test]
    async fn history_failure_does_not_fail_request() {
        let temp = TempDir::new().unwrap();
        let handler = AnalyzeMediaHandler::new(
            Arc::new(DemoDetector::seeded(2)),
            Arc::new(LocalUploadStorage::new(temp.path())),
            Arc::new(FailingHistory),
            MAX,
        );
        let mut cmd = command("image/webp", vec![1; 4]);
        cmd.user_id = Some(UserId::new("user-1").unwrap());

        assert!(handler.handle(cmd).await.is_ok());
    }

    #[test]
    fn display_name_strips_client_paths() {
        assert_eq!(display_name("C:\\photos\\me.png", "x.png"), "me.png");
        assert_eq!(display_name("../../etc/me.png", "x.png"), "me.png");
        assert_eq!(display_name("  ", "x.png"), "x.png");
    }
}
