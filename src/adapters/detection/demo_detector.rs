//! Demo Detector - Randomized scores for every media kind.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::analysis::{DemoScoreGenerator, Detection, MediaKind};
use crate::ports::{DeepfakeDetector, DetectionError, DetectorInfo, MediaUpload};

/// Detector that never calls out and always succeeds.
#[derive(Debug, Clone, Default)]
pub struct DemoDetector {
    generator: Arc<DemoScoreGenerator>,
}

impl DemoDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic scores for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            generator: Arc::new(DemoScoreGenerator::seeded(seed)),
        }
    }
}

#[async_trait]
impl DeepfakeDetector for DemoDetector {
    async fn detect(&self, media: &MediaUpload) -> Result<Detection, DetectionError> {
        Ok(Detection::demo(self.generator.generate(media.kind)))
    }

    fn supports(&self, _kind: MediaKind) -> bool {
        true
    }

    fn detector_info(&self) -> DetectorInfo {
        DetectorInfo::new(
            "demo",
            &[MediaKind::Image, MediaKind::Video, MediaKind::Audio],
        )
    }
}
