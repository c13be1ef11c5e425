//! GetServiceStatus - Query handler reporting which detection services are live.

use std::sync::Arc;

use crate::config::DetectionConfig;
use crate::domain::foundation::Timestamp;
use crate::ports::HistoryRepository;

/// Snapshot of service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    pub demo_mode: bool,
    pub sightengine_configured: bool,
    pub resemble_configured: bool,
    pub history_backend: &'static str,
    pub version: &'static str,
    pub timestamp: Timestamp,
}

/// Handler for service status queries.
pub struct GetServiceStatusHandler {
    sightengine_configured: bool,
    resemble_configured: bool,
    history: Arc<dyn HistoryRepository>,
}

impl GetServiceStatusHandler {
    pub fn new(detection: &DetectionConfig, history: Arc<dyn HistoryRepository>) -> Self {
        Self {
            sightengine_configured: detection.has_sightengine(),
            resemble_configured: detection.has_resemble(),
            history,
        }
    }

    pub fn handle(&self) -> ServiceStatus {
        ServiceStatus {
            demo_mode: !self.sightengine_configured && !self.resemble_configured,
            sightengine_configured: self.sightengine_configured,
            resemble_configured: self.resemble_configured,
            history_backend: self.history.backend_name(),
            version: env!("CARGO_PKG_VERSION"),
            timestamp: Timestamp::now(),
        }
    }
}
