//! Analysis results: raw detection scores in, presentational result out.
//!
//! An `AnalysisResult` is produced once per request from a `Detection` and the
//! stored file it describes, and is never mutated afterwards. The wire shape is
//! a union tagged on `type` (`image`, `video`, `audio`).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AnalysisId, Timestamp};

use super::{
    recommendations_for, Confidence, ConfidenceCategory, MediaKind, RiskLevel,
};

// ════════════════════════════════════════════════════════════════════════════
// Raw scores
// ════════════════════════════════════════════════════════════════════════════

/// Scores returned for a still image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageScores {
    pub ai_generated: Confidence,
    pub deepfake: Confidence,
    pub face_manipulation: Option<Confidence>,
    pub quality_score: Option<Confidence>,
}

/// Per-frame scores returned for a video.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoScores {
    pub frame_scores: Vec<Confidence>,
}

/// Scores returned for an audio clip.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioScores {
    pub aggregated: Confidence,
    pub segment_scores: Vec<Confidence>,
}

/// Raw scores for one of the three media kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionScores {
    Image(ImageScores),
    Video(VideoScores),
    Audio(AudioScores),
}

impl DetectionScores {
    pub fn kind(&self) -> MediaKind {
        match self {
            DetectionScores::Image(_) => MediaKind::Image,
            DetectionScores::Video(_) => MediaKind::Video,
            DetectionScores::Audio(_) => MediaKind::Audio,
        }
    }

    /// Overall probability of manipulation.
    ///
    /// Image: the higher of the AI-generated and deepfake scores.
    /// Video: the worst frame. Audio: the aggregated score.
    pub fn confidence(&self) -> Confidence {
        match self {
            DetectionScores::Image(s) => Confidence::max_of(&[s.ai_generated, s.deepfake]),
            DetectionScores::Video(s) => Confidence::max_of(&s.frame_scores),
            DetectionScores::Audio(s) => s.aggregated,
        }
    }
}

/// Outcome of running a detector over an upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub scores: DetectionScores,
    /// Name of the service that produced the scores (`sightengine`, `resemble`, `demo`).
    pub provider: String,
    pub demo_mode: bool,
    /// Why demo data was substituted, when it was.
    pub fallback_reason: Option<String>,
}

impl Detection {
    /// Scores produced by a real vendor.
    pub fn vendor(provider: impl Into<String>, scores: DetectionScores) -> Self {
        Self {
            scores,
            provider: provider.into(),
            demo_mode: false,
            fallback_reason: None,
        }
    }

    /// Randomized demo scores.
    pub fn demo(scores: DetectionScores) -> Self {
        Self {
            scores,
            provider: "demo".to_string(),
            demo_mode: true,
            fallback_reason: None,
        }
    }

    pub fn with_fallback_reason(mut self, reason: impl Into<String>) -> Self {
        self.fallback_reason = Some(reason.into());
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Result shapes
// ════════════════════════════════════════════════════════════════════════════

/// The stored upload an analysis refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    /// Client-supplied file name.
    pub name: String,
    /// Name the file is stored under.
    pub stored_name: String,
    /// Path the file can be fetched from.
    pub url: String,
    /// Size in bytes.
    pub size: u64,
    pub mime_type: String,
    /// Hex-encoded SHA-256 of the file contents.
    pub sha256: String,
}

/// Fields shared by every result shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub id: AnalysisId,
    pub confidence: Confidence,
    pub is_deepfake: bool,
    pub risk_level: RiskLevel,
    pub confidence_category: ConfidenceCategory,
    pub recommendations: Vec<String>,
    pub provider: String,
    pub demo_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub processing_time_ms: u64,
    pub analyzed_at: Timestamp,
    pub file: MediaFile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetails {
    pub ai_generated: Confidence,
    pub deepfake: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_manipulation: Option<Confidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<Confidence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub frames_analyzed: usize,
    pub frame_scores: Vec<Confidence>,
    pub average_score: Confidence,
    pub max_score: Confidence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioDetails {
    pub voice_clone_score: Confidence,
    pub synthetic_speech: bool,
    pub segment_scores: Vec<Confidence>,
    /// `fake` or `real`.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    #[serde(flatten)]
    pub summary: AnalysisSummary,
    pub details: ImageDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAnalysis {
    #[serde(flatten)]
    pub summary: AnalysisSummary,
    pub details: VideoDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioAnalysis {
    #[serde(flatten)]
    pub summary: AnalysisSummary,
    pub details: AudioDetails,
}

/// Result of analyzing one upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnalysisResult {
    Image(ImageAnalysis),
    Video(VideoAnalysis),
    Audio(AudioAnalysis),
}

impl AnalysisResult {
    /// Derives every presentational field from the detection scores.
    pub fn from_detection(
        id: AnalysisId,
        detection: Detection,
        file: MediaFile,
        processing_time_ms: u64,
        analyzed_at: Timestamp,
    ) -> Self {
        let kind = detection.scores.kind();
        let confidence = detection.scores.confidence();
        let category = ConfidenceCategory::from_confidence(confidence);

        let summary = AnalysisSummary {
            id,
            confidence,
            is_deepfake: confidence.is_deepfake(),
            risk_level: RiskLevel::from_confidence(confidence),
            confidence_category: category,
            recommendations: recommendations_for(kind, category),
            provider: detection.provider,
            demo_mode: detection.demo_mode,
            fallback_reason: detection.fallback_reason,
            processing_time_ms,
            analyzed_at,
            file,
        };

        match detection.scores {
            DetectionScores::Image(scores) => AnalysisResult::Image(ImageAnalysis {
                summary,
                details: ImageDetails {
                    ai_generated: scores.ai_generated,
                    deepfake: scores.deepfake,
                    face_manipulation: scores.face_manipulation,
                    quality_score: scores.quality_score,
                },
            }),
            DetectionScores::Video(scores) => AnalysisResult::Video(VideoAnalysis {
                summary,
                details: VideoDetails {
                    frames_analyzed: scores.frame_scores.len(),
                    average_score: Confidence::mean_of(&scores.frame_scores),
                    max_score: Confidence::max_of(&scores.frame_scores),
                    frame_scores: scores.frame_scores,
                },
            }),
            DetectionScores::Audio(scores) => AnalysisResult::Audio(AudioAnalysis {
                summary,
                details: AudioDetails {
                    voice_clone_score: scores.aggregated,
                    synthetic_speech: scores.aggregated.is_deepfake(),
                    segment_scores: scores.segment_scores,
                    label: if scores.aggregated.is_deepfake() { "fake" } else { "real" }
                        .to_string(),
                },
            }),
        }
    }

    pub fn summary(&self) -> &AnalysisSummary {
        match self {
            AnalysisResult::Image(a) => &a.summary,
            AnalysisResult::Video(a) => &a.summary,
            AnalysisResult::Audio(a) => &a.summary,
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            AnalysisResult::Image(_) => MediaKind::Image,
            AnalysisResult::Video(_) => MediaKind::Video,
            AnalysisResult::Audio(_) => MediaKind::Audio,
        }
    }
}
