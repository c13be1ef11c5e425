//! HTTP listener settings

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

/// Seconds a request must outlive the slowest vendor call, so a stalled
/// vendor degrades to demo scores before the request itself is cut off.
pub const REQUEST_TIMEOUT_HEADROOM_SECS: u64 = 15;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Where and how the API listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub log_level: String,
    /// Whole-request deadline, enforced at the router.
    pub request_timeout_secs: u64,
    /// Comma-separated allowed origins. Unset or empty allows any origin.
    pub cors_origins: Option<String>,
}

/// Deployment environment; production switches logs to JSON.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ValidationError::InvalidHost(self.host.clone()))
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Origins for the CORS layer, blanks dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = self.cors_origins.as_deref() else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout("server.request_timeout_secs"));
        }
        self.socket_addr().map(|_| ())
    }

    /// Checks that the request deadline leaves room for the slowest vendor
    /// call plus [`REQUEST_TIMEOUT_HEADROOM_SECS`].
    pub fn ensure_outlasts(&self, slowest_vendor: Duration) -> Result<(), ValidationError> {
        let required = slowest_vendor.as_secs() + REQUEST_TIMEOUT_HEADROOM_SECS;
        if self.request_timeout_secs < required {
            return Err(ValidationError::RequestTimeoutTooShort {
                request_secs: self.request_timeout_secs,
                required_secs: required,
            });
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            environment: Environment::Development,
            log_level: "info,deepfake_shield=debug,tower_http=info".to_string(),
            request_timeout_secs: 150,
            cors_origins: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:5000");
        assert_eq!(config.environment, Environment::Development);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn hostname_is_not_a_bind_address() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidHost(_))
        ));
    }

    #[test]
    fn production_is_detected() {
        let config = ServerConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert!(config.is_production());
        assert!(!ServerConfig::default().is_production());
    }

    #[test]
    fn blank_cors_entries_are_dropped() {
        let config = ServerConfig {
            cors_origins: Some(" https://a.example ,, https://b.example,".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.cors_origins_list(),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(ServerConfig::default().cors_origins_list().is_empty());
    }

    #[test]
    fn zero_port_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidPort)));
    }

    #[test]
    fn request_timeout_must_be_in_range() {
        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{} accepted", secs);
        }
    }

    #[test]
    fn request_timeout_must_outlast_vendor_with_headroom() {
        let config = ServerConfig {
            request_timeout_secs: 120,
            ..Default::default()
        };

        assert!(config.ensure_outlasts(Duration::from_secs(120)).is_err());
        assert!(config
            .ensure_outlasts(Duration::from_secs(120 - REQUEST_TIMEOUT_HEADROOM_SECS))
            .is_ok());
    }
}
