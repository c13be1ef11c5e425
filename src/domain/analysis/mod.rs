//! Analysis Module - Pure domain services for deepfake analysis results.
//!
//! # Components
//!
//! - `MediaKind` / `MediaFormat` - Upload whitelist and size validation
//! - `Confidence` - Clamped probability of manipulation
//! - `RiskLevel` / `ConfidenceCategory` - Static threshold bucketing
//! - `recommendations_for` - Advice text per category and media kind
//! - `AnalysisResult` - The image/video/audio result union
//! - `DemoScoreGenerator` - Randomized scores for demo mode
//!
//! Everything here is free of I/O; vendor calls live behind the
//! `DeepfakeDetector` port.

mod confidence;
mod demo;
mod media;
mod recommendations;
mod result;
mod risk;

pub use confidence::{Confidence, DEEPFAKE_THRESHOLD};
pub use demo::DemoScoreGenerator;
pub use media::{validate_upload_size, MediaFormat, MediaKind};
pub use recommendations::recommendations_for;
pub use result::{
    AnalysisResult, AnalysisSummary, AudioAnalysis, AudioDetails, AudioScores, Detection,
    DetectionScores, ImageAnalysis, ImageDetails, ImageScores, MediaFile, VideoAnalysis,
    VideoDetails, VideoScores,
};
pub use risk::{
    ConfidenceCategory, RiskLevel, THRESHOLD_CRITICAL, THRESHOLD_HIGH, THRESHOLD_LOW,
    THRESHOLD_MEDIUM,
};
