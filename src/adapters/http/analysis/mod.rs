//! HTTP adapter for analysis endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnalysisResponse, CleanupResponse, ErrorBody, ErrorResponse, HealthResponse,
    HistoryItemResponse, HistoryListResponse, HistoryQuery, StatusResponse,
};
pub use handlers::{AnalysisApiError, AnalysisAppState, IdentifiedUser, USER_ID_HEADER};
pub use routes::analysis_router;
