//! HTTP handlers for analysis endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Json, Multipart, Path, Query, State};
use axum::http::{header, request::Parts, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::{
    AnalyzeMediaCommand, AnalyzeMediaHandler, CleanupUploadsHandler, GetServiceStatusHandler,
    ListHistoryHandler, ListHistoryQuery,
};
use crate::config::{DetectionConfig, StorageConfig};
use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};
use crate::ports::{DeepfakeDetector, HistoryRepository, StorageError, UploadStorage};

use super::dto::{
    AnalysisResponse, CleanupResponse, ErrorResponse, HealthResponse, HistoryListResponse,
    HistoryQuery, StatusResponse,
};

/// Header that attributes a request to a user.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Multipart field names accepted for the upload.
const FILE_FIELDS: [&str; 2] = ["file", "media"];

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all handlers.
///
/// Cloned for each request; everything inside is Arc-wrapped.
#[derive(Clone)]
pub struct AnalysisAppState {
    pub analyze_handler: Arc<AnalyzeMediaHandler>,
    pub status_handler: Arc<GetServiceStatusHandler>,
    pub cleanup_handler: Arc<CleanupUploadsHandler>,
    pub history_handler: Arc<ListHistoryHandler>,
    pub storage: Arc<dyn UploadStorage>,
}

impl AnalysisAppState {
    pub fn new(
        detector: Arc<dyn DeepfakeDetector>,
        storage: Arc<dyn UploadStorage>,
        history: Arc<dyn HistoryRepository>,
        detection_config: &DetectionConfig,
        storage_config: &StorageConfig,
    ) -> Self {
        Self {
            analyze_handler: Arc::new(AnalyzeMediaHandler::new(
                detector,
                storage.clone(),
                history.clone(),
                storage_config.max_upload_bytes,
            )),
            status_handler: Arc::new(GetServiceStatusHandler::new(
                detection_config,
                history.clone(),
            )),
            cleanup_handler: Arc::new(CleanupUploadsHandler::new(
                storage.clone(),
                storage_config.retention(),
            )),
            history_handler: Arc::new(ListHistoryHandler::new(history)),
            storage,
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.analyze_handler.max_upload_bytes()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// User Context
// ════════════════════════════════════════════════════════════════════════════════

/// User identified by the `x-user-id` header.
///
/// Authentication happens upstream; this service trusts the header.
#[derive(Debug, Clone)]
pub struct IdentifiedUser {
    pub user_id: UserId,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for IdentifiedUser
where
    S: Send + Sync,
{
    type Rejection = AnalysisApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        optional_user(&parts.headers)?
            .map(|user_id| IdentifiedUser { user_id })
            .ok_or(AnalysisApiError::Unauthorized)
    }
}

/// Reads the optional user header; a present but malformed value is an error.
fn optional_user(headers: &HeaderMap) -> Result<Option<UserId>, AnalysisApiError> {
    let Some(value) = headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| {
        AnalysisApiError::from(ValidationError::invalid_format(
            "user_id",
            "header is not valid ASCII",
        ))
    })?;
    Ok(Some(UserId::new(value)?))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/analyze - Analyze an uploaded image, video or audio file
pub async fn analyze_media(
    State(state): State<AnalysisAppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AnalysisApiError> {
    let user_id = optional_user(&headers)?;
    let mut multipart =
        multipart.map_err(|rejection| AnalysisApiError::InvalidMultipart(rejection.body_text()))?;

    let max_bytes = state.max_upload_bytes();
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name().is_some_and(|name| FILE_FIELDS.contains(&name)) {
            upload = Some(read_upload(field, max_bytes).await?);
            break;
        }
    }
    let (file_name, mime_type, bytes) = upload.ok_or(AnalysisApiError::NoFileUploaded)?;

    let cmd = AnalyzeMediaCommand {
        file_name,
        mime_type,
        bytes,
        user_id,
    };
    let result = state.analyze_handler.handle(cmd).await?;

    Ok(Json(AnalysisResponse::ok(result)))
}

/// Reads one file field, stopping as soon as it exceeds the limit.
async fn read_upload(
    mut field: Field<'_>,
    max_bytes: u64,
) -> Result<(String, String, Vec<u8>), AnalysisApiError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let mime_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let mut bytes = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        let size = (bytes.len() + chunk.len()) as u64;
        if size > max_bytes {
            return Err(ValidationError::file_too_large(size, max_bytes).into());
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok((file_name, mime_type, bytes))
}

fn multipart_error(err: MultipartError) -> AnalysisApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AnalysisApiError::PayloadTooLarge
    } else {
        AnalysisApiError::InvalidMultipart(err.body_text())
    }
}

/// POST /api/cleanup - Delete uploads older than the retention window
pub async fn cleanup_uploads(
    State(state): State<AnalysisAppState>,
) -> Result<impl IntoResponse, AnalysisApiError> {
    let report = state.cleanup_handler.handle().await?;
    Ok(Json(CleanupResponse::from(report)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/status - Which detection services are configured
pub async fn get_status(State(state): State<AnalysisAppState>) -> impl IntoResponse {
    Json(StatusResponse::from(state.status_handler.handle()))
}

/// GET /api/health - Liveness check
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// GET /api/files/:filename - Serve a stored upload
pub async fn get_file(
    State(state): State<AnalysisAppState>,
    Path(filename): Path<String>,
) -> Result<Response, AnalysisApiError> {
    let file = state.storage.read(&filename).await?;

    Ok((
        [
            (header::CONTENT_TYPE, file.format.mime),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            (header::CACHE_CONTROL, "private, max-age=3600"),
        ],
        file.bytes,
    )
        .into_response())
}

/// GET /api/history - Recent analyses for the identified user
pub async fn list_history(
    State(state): State<AnalysisAppState>,
    user: IdentifiedUser,
    params: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AnalysisApiError> {
    let Query(params) = params.map_err(|rejection| {
        AnalysisApiError::from(ValidationError::invalid_format(
            "limit",
            rejection.body_text(),
        ))
    })?;
    let query = ListHistoryQuery {
        user_id: user.user_id,
        limit: params.limit,
    };
    let entries = state.history_handler.handle(query).await?;
    Ok(Json(HistoryListResponse::from(entries)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain and storage errors to HTTP responses.
#[derive(Debug)]
pub enum AnalysisApiError {
    Domain(DomainError),
    Storage(StorageError),
    NoFileUploaded,
    PayloadTooLarge,
    InvalidMultipart(String),
    Unauthorized,
}

impl From<DomainError> for AnalysisApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<ValidationError> for AnalysisApiError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<StorageError> for AnalysisApiError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::InvalidFormat
        | ErrorCode::NoFileUploaded
        | ErrorCode::EmptyFile
        | ErrorCode::UnsupportedMediaType => StatusCode::BAD_REQUEST,
        ErrorCode::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorCode::FileNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
        ErrorCode::DetectionFailed
        | ErrorCode::StorageError
        | ErrorCode::DatabaseError
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl AnalysisApiError {
    fn code_and_message(&self) -> (ErrorCode, String) {
        match self {
            AnalysisApiError::Domain(err) => (err.code, err.message.clone()),
            AnalysisApiError::Storage(err @ StorageError::NotFound { .. }) => {
                (ErrorCode::FileNotFound, err.to_string())
            }
            AnalysisApiError::Storage(err @ StorageError::InvalidName { .. }) => {
                (ErrorCode::InvalidFormat, err.to_string())
            }
            AnalysisApiError::Storage(err @ StorageError::Io { .. }) => {
                (ErrorCode::StorageError, err.to_string())
            }
            AnalysisApiError::NoFileUploaded => (
                ErrorCode::NoFileUploaded,
                format!("No file uploaded; send it in the '{}' field", FILE_FIELDS[0]),
            ),
            AnalysisApiError::PayloadTooLarge => (
                ErrorCode::FileTooLarge,
                "Request body exceeds the upload limit".to_string(),
            ),
            AnalysisApiError::InvalidMultipart(reason) => (
                ErrorCode::ValidationFailed,
                format!("Invalid multipart request: {}", reason),
            ),
            AnalysisApiError::Unauthorized => (
                ErrorCode::Unauthorized,
                format!("The {} header is required", USER_ID_HEADER),
            ),
        }
    }
}

impl IntoResponse for AnalysisApiError {
    fn into_response(self) -> Response {
        let (code, message) = self.code_and_message();
        let status = status_for(code);

        if status.is_server_error() {
            tracing::error!(code = %code, error = %message, "Request failed");
        } else {
            tracing::debug!(code = %code, error = %message, "Request rejected");
        }

        (status, Json(ErrorResponse::new(code.to_string(), message))).into_response()
    }
}
