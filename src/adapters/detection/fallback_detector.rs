//! Fallback Detector - Routes uploads to a vendor, degrading to demo data.
//!
//! Each media kind goes to the first registered vendor that supports it.
//! When no vendor is registered for the kind, or the vendor call fails, the
//! demo detector answers instead and the result records why. A vendor that
//! has not answered by the deadline counts as failed.
//!
//! # Example
//!
//! ```ignore
//! let detector = FallbackDetector::new(Arc::new(DemoDetector::new()))
//!     .with_vendor(Arc::new(SightengineDetector::new(sightengine_config)))
//!     .with_vendor(Arc::new(ResembleDetector::new(resemble_config)))
//!     .with_deadline(config.vendor_deadline());
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::domain::analysis::{Detection, MediaKind};
use crate::ports::{DeepfakeDetector, DetectionError, DetectorInfo, MediaUpload};

/// Reason recorded when no vendor handles the media kind.
pub const NOT_CONFIGURED_REASON: &str = "credentials not configured";

/// Vendor deadline when none is configured.
pub const DEFAULT_VENDOR_DEADLINE: Duration = Duration::from_secs(125);

/// Detector that always produces a detection.
pub struct FallbackDetector {
    vendors: Vec<Arc<dyn DeepfakeDetector>>,
    demo: Arc<dyn DeepfakeDetector>,
    deadline: Duration,
}

impl FallbackDetector {
    pub fn new(demo: Arc<dyn DeepfakeDetector>) -> Self {
        Self {
            vendors: Vec::new(),
            demo,
            deadline: DEFAULT_VENDOR_DEADLINE,
        }
    }

    /// Registers a vendor. Earlier registrations win for shared kinds.
    pub fn with_vendor(mut self, vendor: Arc<dyn DeepfakeDetector>) -> Self {
        self.vendors.push(vendor);
        self
    }

    /// Caps how long any vendor call may take before demo scores are used.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// The vendor that would score this kind, if any.
    pub fn vendor_for(&self, kind: MediaKind) -> Option<&Arc<dyn DeepfakeDetector>> {
        self.vendors.iter().find(|vendor| vendor.supports(kind))
    }

    async fn demo_detection(
        &self,
        media: &MediaUpload,
        reason: String,
    ) -> Result<Detection, DetectionError> {
        let detection = self.demo.detect(media).await?;
        Ok(detection.with_fallback_reason(reason))
    }
}

#[async_trait]
impl DeepfakeDetector for FallbackDetector {
    async fn detect(&self, media: &MediaUpload) -> Result<Detection, DetectionError> {
        let Some(vendor) = self.vendor_for(media.kind) else {
            tracing::debug!(kind = %media.kind, "No vendor configured, using demo scores");
            return self
                .demo_detection(media, NOT_CONFIGURED_REASON.to_string())
                .await;
        };

        let outcome = match timeout(self.deadline, vendor.detect(media)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(DetectionError::Timeout {
                timeout_secs: self.deadline.as_secs(),
            }),
        };

        match outcome {
            Ok(detection) => Ok(detection),
            Err(err) => {
                tracing::warn!(
                    kind = %media.kind,
                    provider = %vendor.detector_info().name,
                    retryable = err.is_retryable(),
                    error = %err,
                    "Vendor detection failed, using demo scores"
                );
                self.demo_detection(media, err.to_string()).await
            }
        }
    }

    fn supports(&self, _kind: MediaKind) -> bool {
        true
    }

    fn detector_info(&self) -> DetectorInfo {
        let names: Vec<String> = self
            .vendors
            .iter()
            .map(|vendor| vendor.detector_info().name)
            .collect();
        let name = if names.is_empty() {
            self.demo.detector_info().name
        } else {
            names.join("+")
        };
        DetectorInfo::new(
            name,
            &[MediaKind::Image, MediaKind::Video, MediaKind::Audio],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::detection::{fixed_scores, DemoDetector, MockDetector, MockError};

    fn upload(kind: MediaKind) -> MediaUpload {
        MediaUpload::new(kind, "sample", "application/octet-stream", vec![1, 2, 3])
    }

    fn demo() -> Arc<dyn DeepfakeDetector> {
        Arc::new(DemoDetector::seeded(9))
    }

    #[tokio::test]
    async fn no_vendor_uses_demo_with_reason() {
        let detector = FallbackDetector::new(demo());

        let detection = detector.detect(&upload(MediaKind::Image)).await.unwrap();

        assert!(detection.demo_mode);
        assert_eq!(detection.provider, "demo");
        assert_eq!(detection.fallback_reason.as_deref(), Some(NOT_CONFIGURED_REASON));
    }

    #[tokio::test]
    async fn vendor_success_is_returned_unchanged() {
        let vendor = MockDetector::new()
            .for_kinds("sightengine", &[MediaKind::Image, MediaKind::Video])
            .with_detection(Detection::vendor("sightengine", fixed_scores(MediaKind::Image)));
        let detector = FallbackDetector::new(demo()).with_vendor(Arc::new(vendor.clone()));

        let detection = detector.detect(&upload(MediaKind::Image)).await.unwrap();

        assert!(!detection.demo_mode);
        assert_eq!(detection.provider, "sightengine");
        assert!(detection.fallback_reason.is_none());
        assert_eq!(vendor.call_count(), 1);
    }

    #[tokio::test]
    async fn vendor_failure_falls_back_with_error_text() {
        let vendor = MockDetector::new()
            .for_kinds("resemble", &[MediaKind::Audio])
            .with_error(MockError::Unavailable {
                message: "Server error 503".to_string(),
            });
        let detector = FallbackDetector::new(demo()).with_vendor(Arc::new(vendor));

        let detection = detector.detect(&upload(MediaKind::Audio)).await.unwrap();

        assert!(detection.demo_mode);
        assert_eq!(detection.scores.kind(), MediaKind::Audio);
        assert_eq!(
            detection.fallback_reason.as_deref(),
            Some("vendor unavailable: Server error 503")
        );
    }

    #[tokio::test]
    async fn non_retryable_failure_also_falls_back() {
        let vendor = MockDetector::new()
            .for_kinds("sightengine", &[MediaKind::Video])
            .with_error(MockError::AuthenticationFailed);
        let detector = FallbackDetector::new(demo()).with_vendor(Arc::new(vendor));

        let detection = detector.detect(&upload(MediaKind::Video)).await.unwrap();

        assert!(detection.demo_mode);
        assert_eq!(
            detection.fallback_reason.as_deref(),
            Some("authentication failed")
        );
    }

    #[tokio::test]
    async fn stalled_vendor_falls_back_at_deadline() {
        let vendor = MockDetector::new()
            .for_kinds("sightengine", &[MediaKind::Video])
            .with_delay(Duration::from_secs(3600));
        let detector = FallbackDetector::new(demo())
            .with_vendor(Arc::new(vendor.clone()))
            .with_deadline(Duration::from_millis(50));

        let detection = detector.detect(&upload(MediaKind::Video)).await.unwrap();

        assert!(detection.demo_mode);
        assert_eq!(vendor.call_count(), 1);
        assert_eq!(
            detection.fallback_reason.as_deref(),
            Some("request timed out after 0s")
        );
    }

    #[tokio::test]
    async fn routes_by_kind() {
        let images = MockDetector::new().for_kinds("sightengine", &[MediaKind::Image]);
        let audio = MockDetector::new().for_kinds("resemble", &[MediaKind::Audio]);
        let detector = FallbackDetector::new(demo())
            .with_vendor(Arc::new(images.clone()))
            .with_vendor(Arc::new(audio.clone()));

        detector.detect(&upload(MediaKind::Audio)).await.unwrap();
        let video = detector.detect(&upload(MediaKind::Video)).await.unwrap();

        assert_eq!(images.call_count(), 0);
        assert_eq!(audio.call_count(), 1);
        assert!(video.demo_mode);
    }

    #[test]
    fn detector_info_names_vendors() {
        let detector = FallbackDetector::new(demo())
            .with_vendor(Arc::new(MockDetector::new().for_kinds("sightengine", &[MediaKind::Image])))
            .with_vendor(Arc::new(MockDetector::new().for_kinds("resemble", &[MediaKind::Audio])));
        assert_eq!(detector.detector_info().name, "sightengine+resemble");

        let demo_only = FallbackDetector::new(demo());
        assert_eq!(demo_only.detector_info().name, "demo");
    }
}
