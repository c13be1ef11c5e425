//! HTTP adapters - REST API implementations.
//!
//! `analysis` holds the endpoints; `router` wraps them in the shared layers.

pub mod analysis;
mod router;

pub use analysis::{analysis_router, AnalysisAppState};
pub use router::{app_router, MULTIPART_OVERHEAD_BYTES};
