//! Error mapping for non-success vendor responses.
//!
//! Response bodies only go to the logs. The resulting error text ends up in
//! `fallbackReason` and history rows, so it carries the status alone.

use reqwest::StatusCode;

use crate::ports::DetectionError;

/// Longest body excerpt written to the logs.
const LOGGED_BODY_CHARS: usize = 512;

/// Maps a non-2xx vendor status to a typed error, logging a body excerpt.
pub(crate) fn status_error(provider: &str, status: StatusCode, body: &str) -> DetectionError {
    tracing::warn!(
        provider,
        status = status.as_u16(),
        body = %excerpt(body),
        "Vendor returned an error status"
    );

    match status.as_u16() {
        401 | 403 => DetectionError::AuthenticationFailed,
        429 => DetectionError::RateLimited,
        500..=599 => DetectionError::unavailable(format!("Server error {}", status.as_u16())),
        code => DetectionError::network(format!("Unexpected status {}", code)),
    }
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(LOGGED_BODY_CHARS) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_omits_body() {
        let err = status_error(
            "sightengine",
            StatusCode::BAD_GATEWAY,
            "<html><title>internal-host-17 upstream failure</title></html>",
        );

        assert!(matches!(err, DetectionError::Unavailable { .. }));
        assert_eq!(err.to_string(), "vendor unavailable: Server error 502");
    }

    #[test]
    fn unexpected_status_omits_body() {
        let err = status_error("resemble", StatusCode::IM_A_TEAPOT, "stack trace here");

        assert_eq!(err.to_string(), "network error: Unexpected status 418");
    }

    #[test]
    fn auth_and_rate_limit_statuses_are_typed() {
        assert!(matches!(
            status_error("resemble", StatusCode::FORBIDDEN, ""),
            DetectionError::AuthenticationFailed
        ));
        assert!(matches!(
            status_error("resemble", StatusCode::TOO_MANY_REQUESTS, ""),
            DetectionError::RateLimited
        ));
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        let body = "é".repeat(LOGGED_BODY_CHARS + 10);
        assert_eq!(excerpt(&body).chars().count(), LOGGED_BODY_CHARS);
        assert_eq!(excerpt("short"), "short");
    }
}
