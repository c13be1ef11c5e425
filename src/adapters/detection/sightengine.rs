//! Sightengine Detector - Image and video scoring via the Sightengine API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = SightengineConfig::new(api_user, api_secret)
//!     .with_base_url("https://api.sightengine.com")
//!     .with_image_timeout(Duration::from_secs(30));
//!
//! let detector = SightengineDetector::new(config);
//! ```
//!
//! Images go to `/1.0/check.json` with the `genai` and `deepfake` models.
//! Videos go to `/1.0/video/check-sync.json`, which scores sampled frames
//! and answers in one response.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::analysis::{
    Confidence, Detection, DetectionScores, ImageScores, MediaKind, VideoScores,
};
use crate::ports::{DeepfakeDetector, DetectionError, DetectorInfo, MediaUpload};

use super::vendor_status::status_error;

const PROVIDER: &str = "sightengine";

/// Configuration for the Sightengine detector.
#[derive(Debug, Clone)]
pub struct SightengineConfig {
    pub api_user: String,
    api_secret: Secret<String>,
    /// Base URL for the API (default: https://api.sightengine.com).
    pub base_url: String,
    /// Comma-separated models requested for images.
    pub image_models: String,
    /// Comma-separated models requested for videos.
    pub video_models: String,
    pub image_timeout: Duration,
    pub video_timeout: Duration,
}

impl SightengineConfig {
    pub fn new(api_user: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_user: api_user.into(),
            api_secret: Secret::new(api_secret.into()),
            base_url: "https://api.sightengine.com".to_string(),
            image_models: "genai,deepfake".to_string(),
            video_models: "deepfake".to_string(),
            image_timeout: Duration::from_secs(30),
            video_timeout: Duration::from_secs(120),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_image_models(mut self, models: impl Into<String>) -> Self {
        self.image_models = models.into();
        self
    }

    pub fn with_video_models(mut self, models: impl Into<String>) -> Self {
        self.video_models = models.into();
        self
    }

    pub fn with_image_timeout(mut self, timeout: Duration) -> Self {
        self.image_timeout = timeout;
        self
    }

    pub fn with_video_timeout(mut self, timeout: Duration) -> Self {
        self.video_timeout = timeout;
        self
    }

    fn api_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

/// Sightengine implementation of the `DeepfakeDetector` port.
pub struct SightengineDetector {
    config: SightengineConfig,
    client: Client,
}

impl SightengineDetector {
    pub fn new(config: SightengineConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn image_url(&self) -> String {
        format!("{}/1.0/check.json", self.config.base_url)
    }

    fn video_url(&self) -> String {
        format!("{}/1.0/video/check-sync.json", self.config.base_url)
    }

    fn build_form(&self, media: &MediaUpload, models: &str) -> Result<Form, DetectionError> {
        let part = Part::bytes(media.bytes.clone())
            .file_name(media.file_name.clone())
            .mime_str(&media.mime_type)
            .map_err(|e| DetectionError::network(format!("Invalid media part: {}", e)))?;

        Ok(Form::new()
            .text("models", models.to_string())
            .text("api_user", self.config.api_user.clone())
            .text("api_secret", self.config.api_secret().to_string())
            .part("media", part))
    }

    async fn send(
        &self,
        url: String,
        form: Form,
        timeout: Duration,
    ) -> Result<SightengineResponse, DetectionError> {
        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DetectionError::Timeout {
                        timeout_secs: timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    DetectionError::network(format!("Connection failed: {}", e))
                } else {
                    DetectionError::network(e.to_string())
                }
            })?;

        handle_response(response).await
    }
}

/// Maps HTTP status and body to a parsed response or a typed error.
async fn handle_response(response: Response) -> Result<SightengineResponse, DetectionError> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if !status.is_success() {
        // Sightengine reports bad media as a 4xx with a failure body.
        if status.is_client_error() && !matches!(status.as_u16(), 401 | 403 | 429) {
            if let Ok(parsed) = serde_json::from_str::<SightengineResponse>(&body) {
                parsed.ensure_success()?;
            }
        }
        return Err(status_error(PROVIDER, status, &body));
    }

    let parsed: SightengineResponse = serde_json::from_str(&body)
        .map_err(|e| DetectionError::parse(format!("Failed to parse response: {}", e)))?;
    parsed.ensure_success()?;
    Ok(parsed)
}

/// Extracts image scores from a successful `check.json` response.
pub(crate) fn image_scores(response: &SightengineResponse) -> Result<ImageScores, DetectionError> {
    let scores = response
        .scores
        .as_ref()
        .ok_or_else(|| DetectionError::parse("Missing 'type' scores in response"))?;

    if scores.ai_generated.is_none() && scores.deepfake.is_none() {
        return Err(DetectionError::parse("Response contains no detection scores"));
    }

    Ok(ImageScores {
        ai_generated: scores.ai_generated.map(Confidence::new).unwrap_or(Confidence::ZERO),
        deepfake: scores.deepfake.map(Confidence::new).unwrap_or(Confidence::ZERO),
        face_manipulation: None,
        quality_score: None,
    })
}

/// Extracts per-frame deepfake scores from a `check-sync.json` response.
pub(crate) fn video_scores(response: &SightengineResponse) -> Result<VideoScores, DetectionError> {
    let frames = response
        .data
        .as_ref()
        .map(|data| data.frames.as_slice())
        .unwrap_or_default();

    let frame_scores: Vec<Confidence> = frames
        .iter()
        .filter_map(|frame| frame.scores.deepfake)
        .map(Confidence::new)
        .collect();

    if frame_scores.is_empty() {
        return Err(DetectionError::parse("Response contains no scored frames"));
    }

    Ok(VideoScores { frame_scores })
}

#[async_trait]
impl DeepfakeDetector for SightengineDetector {
    async fn detect(&self, media: &MediaUpload) -> Result<Detection, DetectionError> {
        let scores = match media.kind {
            MediaKind::Image => {
                let form = self.build_form(media, &self.config.image_models)?;
                let response = self
                    .send(self.image_url(), form, self.config.image_timeout)
                    .await?;
                DetectionScores::Image(image_scores(&response)?)
            }
            MediaKind::Video => {
                let form = self.build_form(media, &self.config.video_models)?;
                let response = self
                    .send(self.video_url(), form, self.config.video_timeout)
                    .await?;
                DetectionScores::Video(video_scores(&response)?)
            }
            MediaKind::Audio => return Err(DetectionError::Unsupported(MediaKind::Audio)),
        };

        Ok(Detection::vendor(PROVIDER, scores))
    }

    fn supports(&self, kind: MediaKind) -> bool {
        matches!(kind, MediaKind::Image | MediaKind::Video)
    }

    fn detector_info(&self) -> DetectorInfo {
        DetectorInfo::new(PROVIDER, &[MediaKind::Image, MediaKind::Video])
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Sightengine API Types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub(crate) struct SightengineResponse {
    status: String,
    #[serde(default)]
    error: Option<SightengineErrorBody>,
    #[serde(rename = "type", default)]
    scores: Option<TypeScores>,
    #[serde(default)]
    data: Option<VideoData>,
}

impl SightengineResponse {
    fn ensure_success(&self) -> Result<(), DetectionError> {
        if self.status == "success" {
            return Ok(());
        }
        let message = self
            .error
            .as_ref()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| format!("status '{}'", self.status));
        Err(DetectionError::rejected(message))
    }
}

#[derive(Debug, Deserialize)]
struct SightengineErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct TypeScores {
    #[serde(default)]
    ai_generated: Option<f64>,
    #[serde(default)]
    deepfake: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct VideoData {
    #[serde(default)]
    frames: Vec<Frame>,
}

#[derive(Debug, Deserialize)]
struct Frame {
    #[serde(rename = "type", default)]
    scores: TypeScores,
}
