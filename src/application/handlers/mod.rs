//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod analysis;
pub mod history;

pub use analysis::{
    AnalyzeMediaCommand, AnalyzeMediaHandler, CleanupUploadsHandler, GetServiceStatusHandler,
    ServiceStatus, FILES_ROUTE_PREFIX,
};
pub use history::{
    ListHistoryHandler, ListHistoryQuery, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT,
};
