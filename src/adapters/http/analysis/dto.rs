//! Data Transfer Objects for analysis endpoints.
//!
//! Every JSON body carries a `success` flag. Failures use the shared
//! `{ success: false, error: { code, message } }` shape.

use serde::{Deserialize, Serialize};

use crate::application::ServiceStatus;
use crate::domain::analysis::{AnalysisResult, MediaKind, RiskLevel};
use crate::domain::foundation::{AnalysisId, Timestamp};
use crate::domain::history::HistoryEntry;
use crate::ports::CleanupReport;

// ════════════════════════════════════════════════════════════════════════════════
// Envelopes
// ════════════════════════════════════════════════════════════════════════════════

/// Error code and human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Response to `POST /api/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AnalysisResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl AnalysisResponse {
    pub fn ok(result: AnalysisResult) -> Self {
        Self {
            success: true,
            data: Some(result),
            error: None,
        }
    }
}

/// Failure body shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Status
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct VendorStatus {
    pub configured: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryBackendStatus {
    pub backend: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServicesStatus {
    pub sightengine: VendorStatus,
    pub resemble: VendorStatus,
    pub history: HistoryBackendStatus,
}

/// Response to `GET /api/status`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub success: bool,
    pub status: &'static str,
    pub demo_mode: bool,
    pub services: ServicesStatus,
    pub version: &'static str,
    pub timestamp: Timestamp,
}

impl From<ServiceStatus> for StatusResponse {
    fn from(status: ServiceStatus) -> Self {
        Self {
            success: true,
            status: "ok",
            demo_mode: status.demo_mode,
            services: ServicesStatus {
                sightengine: VendorStatus {
                    configured: status.sightengine_configured,
                },
                resemble: VendorStatus {
                    configured: status.resemble_configured,
                },
                history: HistoryBackendStatus {
                    backend: status.history_backend,
                },
            },
            version: status.version,
            timestamp: status.timestamp,
        }
    }
}

/// Response to `GET /api/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// ════════════════════════════════════════════════════════════════════════════════
// Cleanup
// ════════════════════════════════════════════════════════════════════════════════

/// Response to `POST /api/cleanup`.
#[derive(Debug, Clone, Serialize)]
pub struct CleanupResponse {
    pub success: bool,
    pub deleted: usize,
    pub retained: usize,
    pub failed: usize,
}

impl From<CleanupReport> for CleanupResponse {
    fn from(report: CleanupReport) -> Self {
        Self {
            success: true,
            deleted: report.deleted,
            retained: report.retained,
            failed: report.failed,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// History
// ════════════════════════════════════════════════════════════════════════════════

/// Query parameters for `GET /api/history`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItemResponse {
    pub id: AnalysisId,
    pub media_type: MediaKind,
    pub file_name: String,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub is_deepfake: bool,
    pub demo_mode: bool,
    pub created_at: Timestamp,
    pub result: serde_json::Value,
}

impl From<HistoryEntry> for HistoryItemResponse {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: entry.id,
            media_type: entry.media_type,
            file_name: entry.file_name,
            confidence: entry.confidence,
            risk_level: entry.risk_level,
            is_deepfake: entry.is_deepfake,
            demo_mode: entry.demo_mode,
            created_at: entry.created_at,
            result: entry.result,
        }
    }
}

/// Response to `GET /api/history`.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<HistoryItemResponse>,
}

impl From<Vec<HistoryEntry>> for HistoryListResponse {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        let data: Vec<HistoryItemResponse> = entries.into_iter().map(Into::into).collect();
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_has_envelope_shape() {
        let json = serde_json::to_value(ErrorResponse::new("FILE_TOO_LARGE", "too big")).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "error": { "code": "FILE_TOO_LARGE", "message": "too big" }
            })
        );
    }

    #[test]
    fn status_response_uses_camel_case() {
        let status = ServiceStatus {
            demo_mode: true,
            sightengine_configured: false,
            resemble_configured: false,
            history_backend: "memory",
            version: "0.1.0",
            timestamp: Timestamp::now(),
        };

        let json = serde_json::to_value(StatusResponse::from(status)).unwrap();

        assert_eq!(json["demoMode"], true);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["services"]["sightengine"]["configured"], false);
        assert_eq!(json["services"]["history"]["backend"], "memory");
    }

    #[test]
    fn cleanup_response_copies_report() {
        let response = CleanupResponse::from(CleanupReport {
            deleted: 3,
            retained: 2,
            failed: 1,
        });
        assert!(response.success);
        assert_eq!((response.deleted, response.retained, response.failed), (3, 2, 1));
    }

    #[test]
    fn history_query_limit_is_optional() {
        let query: HistoryQuery = serde_json::from_str("{}").unwrap();
        assert!(query.limit.is_none());
    }
}
