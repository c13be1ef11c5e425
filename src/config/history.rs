//! Analysis history persistence configuration

use serde::Deserialize;
use std::time::Duration;

use super::detection::is_http_url;
use super::error::ValidationError;

/// Supabase connection for the `analysis_history` table.
///
/// When unset, history is kept in memory for the lifetime of the process.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Supabase project URL (e.g. `https://xyz.supabase.co`)
    pub supabase_url: Option<String>,

    /// Supabase service role key
    pub supabase_service_key: Option<String>,

    /// Table analysis rows are written to
    #[serde(default = "default_table")]
    pub table: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Entries kept across all users by the in-memory fallback
    #[serde(default = "default_memory_max_entries")]
    pub memory_max_entries: usize,
}

impl HistoryConfig {
    pub fn has_supabase(&self) -> bool {
        self.supabase_url.as_ref().is_some_and(|u| !u.is_empty())
            && self.supabase_service_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let has_url = self.supabase_url.as_ref().is_some_and(|u| !u.is_empty());
        let has_key = self.supabase_service_key.as_ref().is_some_and(|k| !k.is_empty());
        if has_url != has_key {
            return Err(ValidationError::IncompleteSupabaseConfig);
        }
        if let Some(url) = self.supabase_url.as_deref().filter(|u| !u.is_empty()) {
            if !is_http_url(url) {
                return Err(ValidationError::InvalidBaseUrl("history.supabase_url"));
            }
        }
        if self.table.trim().is_empty() {
            return Err(ValidationError::EmptyHistoryTable);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("history.timeout_secs"));
        }
        if self.memory_max_entries == 0 {
            return Err(ValidationError::InvalidHistoryCapacity);
        }
        Ok(())
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_service_key: None,
            table: default_table(),
            timeout_secs: default_timeout(),
            memory_max_entries: default_memory_max_entries(),
        }
    }
}

fn default_table() -> String {
    "analysis_history".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_memory_max_entries() -> usize {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_defaults_to_in_memory() {
        let config = HistoryConfig::default();
        assert!(!config.has_supabase());
        assert_eq!(config.table, "analysis_history");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_supabase_requires_url_and_key() {
        let config = HistoryConfig {
            supabase_url: Some("https://xyz.supabase.co".to_string()),
            ..Default::default()
        };
        assert!(!config.has_supabase());
        assert!(matches!(
            config.validate(),
            Err(ValidationError::IncompleteSupabaseConfig)
        ));

        let config = HistoryConfig {
            supabase_url: Some("https://xyz.supabase.co".to_string()),
            supabase_service_key: Some("service-key".to_string()),
            ..Default::default()
        };
        assert!(config.has_supabase());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_memory_capacity_must_be_positive() {
        let config = HistoryConfig {
            memory_max_entries: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidHistoryCapacity)
        ));
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        let config = HistoryConfig {
            supabase_url: Some("xyz.supabase.co".to_string()),
            supabase_service_key: Some("service-key".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
