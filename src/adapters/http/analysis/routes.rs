//! Route configuration for analysis endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    analyze_media, cleanup_uploads, get_file, get_status, health, list_history, AnalysisAppState,
};

/// Creates the analysis router with all endpoints.
///
/// Routes:
/// - `POST /api/analyze` - Analyze an uploaded file (multipart `file` or `media`)
/// - `GET /api/status` - Configured services and demo mode
/// - `GET /api/files/:filename` - Serve a stored upload
/// - `POST /api/cleanup` - Delete expired uploads
/// - `GET /api/history` - Recent analyses for the `x-user-id` user
/// - `GET /api/health` - Liveness check
pub fn analysis_router() -> Router<AnalysisAppState> {
    Router::new()
        .route("/api/analyze", post(analyze_media))
        .route("/api/status", get(get_status))
        .route("/api/files/:filename", get(get_file))
        .route("/api/cleanup", post(cleanup_uploads))
        .route("/api/history", get(list_history))
        .route("/api/health", get(health))
}
