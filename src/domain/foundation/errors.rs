//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Unsupported media type: {mime}")]
    UnsupportedMediaType { mime: String },

    #[error("File of {actual} bytes exceeds the {max} byte limit")]
    FileTooLarge { actual: u64, max: u64 },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported_media_type(mime: impl Into<String>) -> Self {
        ValidationError::UnsupportedMediaType { mime: mime.into() }
    }

    pub fn file_too_large(actual: u64, max: u64) -> Self {
        ValidationError::FileTooLarge { actual, max }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::EmptyField { field } if field == "file" => ErrorCode::EmptyFile,
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            ValidationError::UnsupportedMediaType { .. } => ErrorCode::UnsupportedMediaType,
            ValidationError::FileTooLarge { .. } => ErrorCode::FileTooLarge,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    InvalidFormat,
    NoFileUploaded,
    EmptyFile,
    UnsupportedMediaType,
    FileTooLarge,

    // Not found errors
    FileNotFound,

    // Authorization errors
    Unauthorized,

    // Vendor errors
    DetectionFailed,
    RequestTimeout,

    // Infrastructure errors
    StorageError,
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::NoFileUploaded => "NO_FILE_UPLOADED",
            ErrorCode::EmptyFile => "EMPTY_FILE",
            ErrorCode::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            ErrorCode::FileTooLarge => "FILE_TOO_LARGE",
            ErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::DetectionFailed => "DETECTION_FAILED",
            ErrorCode::RequestTimeout => "REQUEST_TIMEOUT",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("username");
        assert_eq!(format!("{}", err), "Field 'username' cannot be empty");
    }

    #[test]
    fn validation_error_file_too_large_displays_sizes() {
        let err = ValidationError::file_too_large(11, 10);
        assert_eq!(format!("{}", err), "File of 11 bytes exceeds the 10 byte limit");
        assert_eq!(err.code(), ErrorCode::FileTooLarge);
    }

    #[test]
    fn empty_file_field_maps_to_empty_file_code() {
        assert_eq!(ValidationError::empty_field("file").code(), ErrorCode::EmptyFile);
        assert_eq!(ValidationError::empty_field("user_id").code(), ErrorCode::EmptyField);
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::FileNotFound, "File not found");
        assert_eq!(format!("{}", err), "[FILE_NOT_FOUND] File not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "file");
        assert_eq!(err.details.get("field"), Some(&"file".to_string()));
    }

    #[test]
    fn domain_error_from_validation_error_keeps_code() {
        let err: DomainError = ValidationError::unsupported_media_type("text/plain").into();
        assert_eq!(err.code, ErrorCode::UnsupportedMediaType);
        assert!(err.message.contains("text/plain"));
    }
}
