//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind host: {0}")]
    InvalidHost(String),

    #[error("Invalid timeout for {0}")]
    InvalidTimeout(&'static str),

    #[error("Invalid base URL for {0}: must start with http:// or https://")]
    InvalidBaseUrl(&'static str),

    #[error("Request timeout of {request_secs}s must be at least {required_secs}s to outlast vendor calls")]
    RequestTimeoutTooShort { request_secs: u64, required_secs: u64 },

    #[error("Maximum upload size must be greater than zero")]
    InvalidUploadLimit,

    #[error("Upload retention must be greater than zero")]
    InvalidRetention,

    #[error("Supabase URL and service key must be set together")]
    IncompleteSupabaseConfig,

    #[error("In-memory history capacity must be greater than zero")]
    InvalidHistoryCapacity,

    #[error("History table name cannot be empty")]
    EmptyHistoryTable,
}
