//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (analyze, cleanup) change state; query handlers
//! (status, history) only read.

pub mod handlers;

pub use handlers::{
    AnalyzeMediaCommand, AnalyzeMediaHandler, CleanupUploadsHandler, GetServiceStatusHandler,
    ListHistoryHandler, ListHistoryQuery, ServiceStatus,
};
