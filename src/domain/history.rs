//! Analysis history rows.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{AnalysisResult, MediaKind, RiskLevel};
use crate::domain::foundation::{AnalysisId, Timestamp, UserId};

/// One row of the `analysis_history` table.
///
/// Field names match the table's snake_case columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: AnalysisId,
    pub user_id: UserId,
    pub media_type: MediaKind,
    pub file_name: String,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub is_deepfake: bool,
    pub demo_mode: bool,
    /// The full result as returned to the client.
    pub result: serde_json::Value,
    pub created_at: Timestamp,
}

impl HistoryEntry {
    /// Builds the history row for a completed analysis.
    pub fn from_result(user_id: UserId, result: &AnalysisResult) -> Result<Self, serde_json::Error> {
        let summary = result.summary();
        Ok(Self {
            id: summary.id,
            user_id,
            media_type: result.kind(),
            file_name: summary.file.name.clone(),
            confidence: summary.confidence.value(),
            risk_level: summary.risk_level,
            is_deepfake: summary.is_deepfake,
            demo_mode: summary.demo_mode,
            result: serde_json::to_value(result)?,
            created_at: summary.analyzed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{
        Confidence, Detection, DetectionScores, ImageScores, MediaFile,
    };

    #[test]
    fn history_entry_copies_summary_fields() {
        let result = AnalysisResult::from_detection(
            AnalysisId::new(),
            Detection::vendor(
                "sightengine",
                DetectionScores::Image(ImageScores {
                    ai_generated: Confidence::new(0.65),
                    deepfake: Confidence::new(0.1),
                    face_manipulation: None,
                    quality_score: None,
                }),
            ),
            MediaFile {
                name: "portrait.png".to_string(),
                stored_name: "x.png".to_string(),
                url: "/api/files/x.png".to_string(),
                size: 10,
                mime_type: "image/png".to_string(),
                sha256: String::new(),
            },
            12,
            Timestamp::now(),
        );

        let entry = HistoryEntry::from_result(UserId::new("user-1").unwrap(), &result).unwrap();

        assert_eq!(entry.id, result.summary().id);
        assert_eq!(entry.media_type, MediaKind::Image);
        assert_eq!(entry.file_name, "portrait.png");
        assert_eq!(entry.confidence, 0.65);
        assert_eq!(entry.risk_level, RiskLevel::High);
        assert!(entry.is_deepfake);
        assert_eq!(entry.result["type"], "image");
    }

    #[test]
    fn history_entry_serializes_with_snake_case_columns() {
        let json = serde_json::json!({
            "id": "6f1c2c54-6a4d-4c0e-9a51-3f8f1f3c2a10",
            "user_id": "user-1",
            "media_type": "audio",
            "file_name": "call.mp3",
            "confidence": 0.2,
            "risk_level": "LOW",
            "is_deepfake": false,
            "demo_mode": true,
            "result": {},
            "created_at": "2024-05-01T12:00:00Z"
        });

        let entry: HistoryEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.media_type, MediaKind::Audio);
        assert_eq!(entry.user_id.as_str(), "user-1");
        assert!(entry.demo_mode);
    }
}
