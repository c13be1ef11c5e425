//! Application router with cross-cutting HTTP layers.

use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::{BoxError, Router};
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

use super::analysis::{analysis_router, AnalysisApiError, AnalysisAppState};

/// Room for multipart boundaries and headers on top of the file itself.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Builds the full application router.
///
/// The body limit is the upload limit plus multipart overhead; the exact
/// per-file limit is enforced while reading the file field.
pub fn app_router(state: AnalysisAppState, server: &ServerConfig) -> Router {
    let body_limit = usize::try_from(state.max_upload_bytes())
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    analysis_router()
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(middleware_error))
                .layer(TimeoutLayer::new(server.request_timeout())),
        )
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Renders middleware failures with the same error envelope as handlers.
async fn middleware_error(err: BoxError) -> Response {
    let error = if err.is::<Elapsed>() {
        DomainError::new(
            ErrorCode::RequestTimeout,
            "Request exceeded the server deadline",
        )
    } else {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Unhandled middleware error: {}", err),
        )
    };
    AnalysisApiError::from(error).into_response()
}

/// Any origin when the list is empty, otherwise exactly the listed origins.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}
