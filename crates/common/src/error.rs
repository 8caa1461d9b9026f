//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::NotFound`] → 404
/// - [`ServiceError::Internal`] → 500
///
/// Cryptographic failures (bad key encoding, corrupted padding, unsupported
/// mode) are caller-input failures and therefore [`ServiceError::BadRequest`].
/// They must never be conflated with "resource not found" semantics.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed — invalid JSON, unknown encryption mode, or
    /// key/payload material the codec rejected.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A referenced entity (content, protection system) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code used in error response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServiceError::BadRequest("x".into()).http_status(), 400);
        assert_eq!(ServiceError::NotFound("x".into()).http_status(), 404);
        assert_eq!(ServiceError::Internal("x".into()).http_status(), 500);
    }

    #[test]
    fn codes_match_variants() {
        assert_eq!(ServiceError::BadRequest("x".into()).code(), "bad_request");
        assert_eq!(ServiceError::NotFound("x".into()).code(), "not_found");
        assert_eq!(ServiceError::Internal("x".into()).code(), "internal_error");
    }

    #[test]
    fn display_includes_message() {
        let e = ServiceError::BadRequest("unsupported encryption mode".into());
        assert!(e.to_string().contains("unsupported encryption mode"));
    }
}
