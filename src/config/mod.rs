//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DEEPFAKE_SHIELD` prefix and nested values use double underscores as separators.
//!
//! Every section has defaults, so an empty environment yields a server that runs
//! entirely in demo mode.
//!
//! # Example
//!
//! ```no_run
//! use deepfake_shield::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod detection;
mod error;
mod history;
mod server;
mod storage;

pub use detection::{DetectionConfig, VENDOR_DEADLINE_GRACE_SECS};
pub use error::{ConfigError, ValidationError};
pub use history::HistoryConfig;
pub use server::{Environment, ServerConfig, REQUEST_TIMEOUT_HEADROOM_SECS};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Detection vendor credentials and timeouts (Sightengine/Resemble)
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Upload storage (directory, size limit, retention)
    #[serde(default)]
    pub storage: StorageConfig,

    /// Analysis history persistence (Supabase)
    #[serde(default)]
    pub history: HistoryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DEEPFAKE_SHIELD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DEEPFAKE_SHIELD__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `DEEPFAKE_SHIELD__DETECTION__RESEMBLE_API_KEY=...` -> `detection.resemble_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DEEPFAKE_SHIELD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.detection.validate()?;
        self.storage.validate()?;
        self.history.validate()?;
        self.server.ensure_outlasts(self.detection.vendor_deadline())?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "DEEPFAKE_SHIELD__SERVER__PORT",
        "DEEPFAKE_SHIELD__SERVER__ENVIRONMENT",
        "DEEPFAKE_SHIELD__DETECTION__SIGHTENGINE_API_USER",
        "DEEPFAKE_SHIELD__DETECTION__SIGHTENGINE_API_SECRET",
        "DEEPFAKE_SHIELD__DETECTION__RESEMBLE_API_KEY",
        "DEEPFAKE_SHIELD__STORAGE__UPLOAD_DIR",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_is_demo_mode() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert!(config.detection.demo_mode());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_vendor_credentials() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("DEEPFAKE_SHIELD__DETECTION__SIGHTENGINE_API_USER", "1234");
        env::set_var("DEEPFAKE_SHIELD__DETECTION__SIGHTENGINE_API_SECRET", "secret");
        env::set_var("DEEPFAKE_SHIELD__DETECTION__RESEMBLE_API_KEY", "rsm_key");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.detection.has_sightengine());
        assert!(config.detection.has_resemble());
        assert!(!config.detection.demo_mode());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_request_timeout_shorter_than_vendor_deadline_is_rejected() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.server.request_timeout_secs = config.detection.video_timeout_secs;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::RequestTimeoutTooShort { .. })
        ));
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("DEEPFAKE_SHIELD__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }

    #[test]
    fn test_custom_port_and_upload_dir() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("DEEPFAKE_SHIELD__SERVER__PORT", "3000");
        env::set_var("DEEPFAKE_SHIELD__STORAGE__UPLOAD_DIR", "/tmp/shield");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.upload_dir.to_str(), Some("/tmp/shield"));
    }
}
