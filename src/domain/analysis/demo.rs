//! Randomized demo scores.
//!
//! Used when a media kind has no vendor credentials configured, or when the
//! vendor call fails. Scores are drawn uniformly from fixed ranges chosen to
//! look plausible in the UI.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use std::sync::Mutex;

use super::{AudioScores, Confidence, DetectionScores, ImageScores, MediaKind, VideoScores};

pub const IMAGE_AI_GENERATED_RANGE: Range<f64> = 0.05..0.95;
pub const IMAGE_DEEPFAKE_RANGE: Range<f64> = 0.02..0.90;
pub const IMAGE_FACE_MANIPULATION_RANGE: Range<f64> = 0.01..0.80;
pub const IMAGE_QUALITY_RANGE: Range<f64> = 0.60..0.99;
pub const VIDEO_FRAME_RANGE: Range<f64> = 0.05..0.95;
pub const VIDEO_FRAME_COUNT: Range<usize> = 8..25;
pub const AUDIO_VOICE_CLONE_RANGE: Range<f64> = 0.05..0.95;
pub const AUDIO_SEGMENT_COUNT: Range<usize> = 4..13;
/// Segment scores stay within this distance of the aggregated score.
pub const AUDIO_SEGMENT_SPREAD: f64 = 0.15;

/// Thread-safe generator of plausible-looking detection scores.
#[derive(Debug)]
pub struct DemoScoreGenerator {
    rng: Mutex<SmallRng>,
}

impl DemoScoreGenerator {
    /// Generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Deterministic generator for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    pub fn generate(&self, kind: MediaKind) -> DetectionScores {
        // RNG state stays valid after a poisoning panic.
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        match kind {
            MediaKind::Image => DetectionScores::Image(ImageScores {
                ai_generated: draw(&mut *rng, IMAGE_AI_GENERATED_RANGE),
                deepfake: draw(&mut *rng, IMAGE_DEEPFAKE_RANGE),
                face_manipulation: Some(draw(&mut *rng, IMAGE_FACE_MANIPULATION_RANGE)),
                quality_score: Some(draw(&mut *rng, IMAGE_QUALITY_RANGE)),
            }),
            MediaKind::Video => {
                let frames = rng.gen_range(VIDEO_FRAME_COUNT);
                DetectionScores::Video(VideoScores {
                    frame_scores: (0..frames)
                        .map(|_| draw(&mut *rng, VIDEO_FRAME_RANGE))
                        .collect(),
                })
            }
            MediaKind::Audio => {
                let aggregated = draw(&mut *rng, AUDIO_VOICE_CLONE_RANGE);
                let segments = rng.gen_range(AUDIO_SEGMENT_COUNT);
                let segment_scores = (0..segments)
                    .map(|_| {
                        let offset = rng.gen_range(-AUDIO_SEGMENT_SPREAD..=AUDIO_SEGMENT_SPREAD);
                        Confidence::new(aggregated.value() + offset)
                    })
                    .collect();
                DetectionScores::Audio(AudioScores {
                    aggregated,
                    segment_scores,
                })
            }
        }
    }
}

impl Default for DemoScoreGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn draw<R: Rng>(rng: &mut R, range: Range<f64>) -> Confidence {
    Confidence::new(rng.gen_range(range))
}
