//! Resemble Detector - Synthetic voice detection via Resemble AI.
//!
//! Audio is uploaded to `/api/v2/detect` and scored in one call. The
//! response carries an aggregated score plus per-segment scores, which the
//! API sometimes encodes as strings.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::analysis::{AudioScores, Confidence, Detection, DetectionScores, MediaKind};
use crate::ports::{DeepfakeDetector, DetectionError, DetectorInfo, MediaUpload};

use super::vendor_status::status_error;

const PROVIDER: &str = "resemble";

/// Configuration for the Resemble detector.
#[derive(Debug, Clone)]
pub struct ResembleConfig {
    api_key: Secret<String>,
    /// Base URL for the API (default: https://app.resemble.ai).
    pub base_url: String,
    pub timeout: Duration,
}

impl ResembleConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://app.resemble.ai".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Resemble AI implementation of the `DeepfakeDetector` port.
pub struct ResembleDetector {
    config: ResembleConfig,
    client: Client,
}

impl ResembleDetector {
    pub fn new(config: ResembleConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn detect_url(&self) -> String {
        format!("{}/api/v2/detect", self.config.base_url)
    }

    async fn send(&self, media: &MediaUpload) -> Result<Response, DetectionError> {
        let part = Part::bytes(media.bytes.clone())
            .file_name(media.file_name.clone())
            .mime_str(&media.mime_type)
            .map_err(|e| DetectionError::network(format!("Invalid media part: {}", e)))?;

        self.client
            .post(self.detect_url())
            .timeout(self.config.timeout)
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .multipart(Form::new().part("file", part))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DetectionError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    DetectionError::network(format!("Connection failed: {}", e))
                } else {
                    DetectionError::network(e.to_string())
                }
            })
    }
}

async fn handle_response(response: Response) -> Result<ResembleResponse, DetectionError> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if !status.is_success() {
        return Err(status_error(PROVIDER, status, &body));
    }
    serde_json::from_str(&body)
        .map_err(|e| DetectionError::parse(format!("Failed to parse response: {}", e)))
}

/// Converts a Resemble response into audio scores.
pub(crate) fn audio_scores(response: ResembleResponse) -> Result<AudioScores, DetectionError> {
    if !response.success {
        return Err(DetectionError::rejected(
            response
                .message
                .unwrap_or_else(|| "detection unsuccessful".to_string()),
        ));
    }

    let metrics = response
        .item
        .and_then(|item| item.metrics)
        .ok_or_else(|| DetectionError::parse("Missing 'item.metrics' in response"))?;

    let segment_scores: Vec<Confidence> = metrics
        .score
        .iter()
        .map(Score::value)
        .collect::<Result<_, _>>()?;

    let aggregated = match metrics.aggregated_score {
        Some(score) => score.value()?,
        None if !segment_scores.is_empty() => Confidence::mean_of(&segment_scores),
        None => return Err(DetectionError::parse("Response contains no scores")),
    };

    Ok(AudioScores {
        aggregated,
        segment_scores,
    })
}

#[async_trait]
impl DeepfakeDetector for ResembleDetector {
    async fn detect(&self, media: &MediaUpload) -> Result<Detection, DetectionError> {
        if media.kind != MediaKind::Audio {
            return Err(DetectionError::Unsupported(media.kind));
        }

        let response = self.send(media).await?;
        let parsed = handle_response(response).await?;
        let scores = audio_scores(parsed)?;

        Ok(Detection::vendor(PROVIDER, DetectionScores::Audio(scores)))
    }

    fn supports(&self, kind: MediaKind) -> bool {
        kind == MediaKind::Audio
    }

    fn detector_info(&self) -> DetectorInfo {
        DetectorInfo::new(PROVIDER, &[MediaKind::Audio])
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Resemble API Types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub(crate) struct ResembleResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    item: Option<ResembleItem>,
}

#[derive(Debug, Deserialize)]
struct ResembleItem {
    #[serde(default)]
    metrics: Option<ResembleMetrics>,
}

#[derive(Debug, Deserialize)]
struct ResembleMetrics {
    #[serde(default)]
    aggregated_score: Option<Score>,
    #[serde(default)]
    score: Vec<Score>,
}

/// A score encoded either as a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Score {
    Number(f64),
    Text(String),
}

impl Score {
    fn value(&self) -> Result<Confidence, DetectionError> {
        match self {
            Score::Number(n) => Ok(Confidence::new(*n)),
            Score::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(Confidence::new)
                .map_err(|_| DetectionError::parse(format!("Invalid score '{}'", s))),
        }
    }
}
