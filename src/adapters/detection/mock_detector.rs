//! Mock Detector for testing.
//!
//! Returns queued outcomes in order and records every upload it sees.
//! An optional delay simulates a slow or stalled vendor.
//!
//! # Example
//!
//! ```ignore
//! let detector = MockDetector::new()
//!     .with_detection(Detection::vendor("sightengine", scores))
//!     .with_error(MockError::RateLimited);
//!
//! let first = detector.detect(&upload).await?;
//! assert_eq!(detector.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::analysis::{
    AudioScores, Confidence, Detection, DetectionScores, ImageScores, MediaKind, VideoScores,
};
use crate::ports::{DeepfakeDetector, DetectionError, DetectorInfo, MediaUpload};

/// Mock detector for testing.
#[derive(Debug, Clone)]
pub struct MockDetector {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: DetectorInfo,
    calls: Arc<Mutex<Vec<MediaUpload>>>,
    delay: Duration,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(Detection),
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    AuthenticationFailed,
    RateLimited,
    Unavailable { message: String },
    Timeout { timeout_secs: u64 },
    Rejected { message: String },
}

impl From<MockError> for DetectionError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::AuthenticationFailed => DetectionError::AuthenticationFailed,
            MockError::RateLimited => DetectionError::RateLimited,
            MockError::Unavailable { message } => DetectionError::unavailable(message),
            MockError::Timeout { timeout_secs } => DetectionError::Timeout { timeout_secs },
            MockError::Rejected { message } => DetectionError::rejected(message),
        }
    }
}

impl Default for MockDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockDetector {
    /// Creates a mock that handles every media kind.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: DetectorInfo::new(
                "mock",
                &[MediaKind::Image, MediaKind::Video, MediaKind::Audio],
            ),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    /// Restricts the kinds this mock reports as supported.
    pub fn for_kinds(mut self, name: impl Into<String>, kinds: &[MediaKind]) -> Self {
        self.info = DetectorInfo::new(name, kinds);
        self
    }

    /// Adds a successful detection to the queue.
    pub fn with_detection(self, detection: Detection) -> Self {
        lock(&self.responses).push_back(MockResponse::Success(detection));
        self
    }

    /// Adds an error to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Waits this long before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn get_calls(&self) -> Vec<MediaUpload> {
        lock(&self.calls).clone()
    }

    /// Next queued response, or fixed mid-range scores for the kind.
    fn next_response(&self, kind: MediaKind) -> MockResponse {
        lock(&self.responses).pop_front().unwrap_or_else(|| {
            MockResponse::Success(Detection::vendor(self.info.name.clone(), fixed_scores(kind)))
        })
    }
}

/// Deterministic scores used when no response is queued.
pub fn fixed_scores(kind: MediaKind) -> DetectionScores {
    match kind {
        MediaKind::Image => DetectionScores::Image(ImageScores {
            ai_generated: Confidence::new(0.3),
            deepfake: Confidence::new(0.1),
            face_manipulation: None,
            quality_score: None,
        }),
        MediaKind::Video => DetectionScores::Video(VideoScores {
            frame_scores: vec![Confidence::new(0.2), Confidence::new(0.3)],
        }),
        MediaKind::Audio => DetectionScores::Audio(AudioScores {
            aggregated: Confidence::new(0.3),
            segment_scores: vec![Confidence::new(0.3)],
        }),
    }
}

#[async_trait]
impl DeepfakeDetector for MockDetector {
    async fn detect(&self, media: &MediaUpload) -> Result<Detection, DetectionError> {
        lock(&self.calls).push(media.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response(media.kind) {
            MockResponse::Success(detection) => Ok(detection),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn supports(&self, kind: MediaKind) -> bool {
        self.info.kinds.contains(&kind)
    }

    fn detector_info(&self) -> DetectorInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(kind: MediaKind) -> MediaUpload {
        MediaUpload::new(kind, "f", "image/png", vec![0])
    }

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let detector = MockDetector::new()
            .with_error(MockError::RateLimited)
            .with_detection(Detection::vendor("x", fixed_scores(MediaKind::Image)));

        assert!(matches!(
            detector.detect(&upload(MediaKind::Image)).await,
            Err(DetectionError::RateLimited)
        ));
        let detection = detector.detect(&upload(MediaKind::Image)).await.unwrap();
        assert_eq!(detection.provider, "x");
        assert_eq!(detector.call_count(), 2);
    }

    #[tokio::test]
    async fn default_response_matches_kind() {
        let detector = MockDetector::new();
        let detection = detector.detect(&upload(MediaKind::Audio)).await.unwrap();
        assert_eq!(detection.scores.kind(), MediaKind::Audio);
        assert!(!detection.demo_mode);
    }

    #[test]
    fn for_kinds_limits_support() {
        let detector = MockDetector::new().for_kinds("resemble", &[MediaKind::Audio]);
        assert!(detector.supports(MediaKind::Audio));
        assert!(!detector.supports(MediaKind::Video));
        assert_eq!(detector.detector_info().name, "resemble");
    }
}
