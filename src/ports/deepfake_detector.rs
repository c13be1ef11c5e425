//! Deepfake Detector Port - Interface for detection vendor integrations.
//!
//! This port abstracts the third-party detection APIs (Sightengine for image
//! and video, Resemble AI for audio), so the analysis handler can score an
//! upload without coupling to a specific vendor.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct AlwaysReal;
//!
//! #[async_trait]
//! impl DeepfakeDetector for AlwaysReal {
//!     async fn detect(&self, media: &MediaUpload) -> Result<Detection, DetectionError> {
//!         // ... score the media
//!     }
//!     // ... other methods
//! }
//! ```

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::analysis::{Detection, MediaKind};

/// Port for deepfake detection.
///
/// Implementations call an external service (or generate demo data) and
/// translate its response into domain `Detection` scores.
#[async_trait]
pub trait DeepfakeDetector: Send + Sync {
    /// Score a single upload.
    ///
    /// The returned scores must match `media.kind`.
    async fn detect(&self, media: &MediaUpload) -> Result<Detection, DetectionError>;

    /// Whether this detector can score the given kind of media.
    fn supports(&self, kind: MediaKind) -> bool;

    /// Detector name and supported kinds.
    fn detector_info(&self) -> DetectorInfo;
}

/// A validated upload handed to a detector.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub kind: MediaKind,
    /// Name the file was stored under.
    pub file_name: String,
    /// Canonical MIME type.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    pub fn new(
        kind: MediaKind,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            kind,
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Detector information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectorInfo {
    /// Vendor name (e.g., "sightengine", "resemble", "demo").
    pub name: String,
    /// Kinds of media this detector scores.
    pub kinds: Vec<MediaKind>,
}

impl DetectorInfo {
    pub fn new(name: impl Into<String>, kinds: &[MediaKind]) -> Self {
        Self {
            name: name.into(),
            kinds: kinds.to_vec(),
        }
    }
}

/// Detection vendor errors.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    /// Credentials rejected by the vendor.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by the vendor.
    #[error("rate limited by vendor")]
    RateLimited,

    /// Vendor returned a server error.
    #[error("vendor unavailable: {message}")]
    Unavailable { message: String },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Failed to parse vendor response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Vendor accepted the request but refused to score the media.
    #[error("rejected by vendor: {0}")]
    Rejected(String),

    /// Detector does not handle this kind of media.
    #[error("unsupported media kind: {0}")]
    Unsupported(MediaKind),
}

impl DetectionError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Returns true if the same request might succeed later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DetectionError::RateLimited
                | DetectionError::Unavailable { .. }
                | DetectionError::Network(_)
                | DetectionError::Timeout { .. }
        )
    }
}
