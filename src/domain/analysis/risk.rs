//! Risk level and confidence category bucketing.
//!
//! Both are static threshold lookups over the confidence score. A score that
//! lands exactly on a threshold belongs to the higher bucket.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Confidence;

/// Lower edges of the confidence buckets.
pub const THRESHOLD_LOW: f64 = 0.2;
pub const THRESHOLD_MEDIUM: f64 = 0.4;
pub const THRESHOLD_HIGH: f64 = 0.6;
pub const THRESHOLD_CRITICAL: f64 = 0.8;

/// Risk presented to the user for an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_confidence(confidence: Confidence) -> Self {
        let c = confidence.value();
        if c >= THRESHOLD_CRITICAL {
            RiskLevel::Critical
        } else if c >= THRESHOLD_HIGH {
            RiskLevel::High
        } else if c >= THRESHOLD_MEDIUM {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Five-way bucketing of the confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceCategory {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceCategory {
    pub fn from_confidence(confidence: Confidence) -> Self {
        let c = confidence.value();
        if c >= THRESHOLD_CRITICAL {
            ConfidenceCategory::VeryHigh
        } else if c >= THRESHOLD_HIGH {
            ConfidenceCategory::High
        } else if c >= THRESHOLD_MEDIUM {
            ConfidenceCategory::Medium
        } else if c >= THRESHOLD_LOW {
            ConfidenceCategory::Low
        } else {
            ConfidenceCategory::VeryLow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceCategory::VeryLow => "VERY_LOW",
            ConfidenceCategory::Low => "LOW",
            ConfidenceCategory::Medium => "MEDIUM",
            ConfidenceCategory::High => "HIGH",
            ConfidenceCategory::VeryHigh => "VERY_HIGH",
        }
    }
}

impl fmt::Display for ConfidenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
