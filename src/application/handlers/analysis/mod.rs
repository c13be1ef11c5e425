//! Analysis handlers.
//!
//! Commands and queries around uploaded media: analyze, report service
//! status, and clean up expired uploads.

mod analyze_media;
mod cleanup_uploads;
mod get_service_status;

pub use analyze_media::{AnalyzeMediaCommand, AnalyzeMediaHandler, FILES_ROUTE_PREFIX};
pub use cleanup_uploads::CleanupUploadsHandler;
pub use get_service_status::{GetServiceStatusHandler, ServiceStatus};
