//! Detection vendor configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Extra time a vendor call gets past its own HTTP timeout before the
/// fallback detector abandons it.
pub const VENDOR_DEADLINE_GRACE_SECS: u64 = 5;

/// Detection vendor configuration (Sightengine for image/video, Resemble for audio)
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    /// Sightengine API user
    pub sightengine_api_user: Option<String>,

    /// Sightengine API secret
    pub sightengine_api_secret: Option<String>,

    /// Resemble AI API key
    pub resemble_api_key: Option<String>,

    /// Sightengine API base URL
    #[serde(default = "default_sightengine_base_url")]
    pub sightengine_base_url: String,

    /// Resemble API base URL
    #[serde(default = "default_resemble_base_url")]
    pub resemble_base_url: String,

    /// Sightengine models requested for images
    #[serde(default = "default_image_models")]
    pub image_models: String,

    /// Sightengine models requested for videos
    #[serde(default = "default_video_models")]
    pub video_models: String,

    /// Image request timeout in seconds
    #[serde(default = "default_image_timeout")]
    pub image_timeout_secs: u64,

    /// Video request timeout in seconds
    #[serde(default = "default_video_timeout")]
    pub video_timeout_secs: u64,

    /// Audio request timeout in seconds
    #[serde(default = "default_audio_timeout")]
    pub audio_timeout_secs: u64,
}

impl DetectionConfig {
    /// Check if Sightengine is configured (both user and secret present)
    pub fn has_sightengine(&self) -> bool {
        non_empty(&self.sightengine_api_user) && non_empty(&self.sightengine_api_secret)
    }

    /// Check if Resemble is configured
    pub fn has_resemble(&self) -> bool {
        non_empty(&self.resemble_api_key)
    }

    /// True when no vendor credentials are configured at all.
    pub fn demo_mode(&self) -> bool {
        !self.has_sightengine() && !self.has_resemble()
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }

    pub fn video_timeout(&self) -> Duration {
        Duration::from_secs(self.video_timeout_secs)
    }

    pub fn audio_timeout(&self) -> Duration {
        Duration::from_secs(self.audio_timeout_secs)
    }

    /// The longest of the per-kind vendor timeouts.
    pub fn slowest_timeout(&self) -> Duration {
        [self.image_timeout(), self.video_timeout(), self.audio_timeout()]
            .into_iter()
            .max()
            .unwrap_or_default()
    }

    /// Hard cap on any single vendor call.
    pub fn vendor_deadline(&self) -> Duration {
        self.slowest_timeout() + Duration::from_secs(VENDOR_DEADLINE_GRACE_SECS)
    }

    /// Validate detection configuration
    ///
    /// Missing credentials are not an error: the affected media kinds run in demo mode.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.image_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("detection.image_timeout_secs"));
        }
        if self.video_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("detection.video_timeout_secs"));
        }
        if self.audio_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("detection.audio_timeout_secs"));
        }
        if !is_http_url(&self.sightengine_base_url) {
            return Err(ValidationError::InvalidBaseUrl("detection.sightengine_base_url"));
        }
        if !is_http_url(&self.resemble_base_url) {
            return Err(ValidationError::InvalidBaseUrl("detection.resemble_base_url"));
        }
        Ok(())
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            sightengine_api_user: None,
            sightengine_api_secret: None,
            resemble_api_key: None,
            sightengine_base_url: default_sightengine_base_url(),
            resemble_base_url: default_resemble_base_url(),
            image_models: default_image_models(),
            video_models: default_video_models(),
            image_timeout_secs: default_image_timeout(),
            video_timeout_secs: default_video_timeout(),
            audio_timeout_secs: default_audio_timeout(),
        }
    }
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_ref().is_some_and(|v| !v.trim().is_empty())
}

pub(crate) fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_sightengine_base_url() -> String {
    "https://api.sightengine.com".to_string()
}

fn default_resemble_base_url() -> String {
    "https://app.resemble.ai".to_string()
}

fn default_image_models() -> String {
    "genai,deepfake".to_string()
}

fn default_video_models() -> String {
    "deepfake".to_string()
}

fn default_image_timeout() -> u64 {
    30
}

fn default_video_timeout() -> u64 {
    120
}

fn default_audio_timeout() -> u64 {
    60
}
