//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::InvalidFormat`] → 400
/// - [`ServiceError::IntegrityFailure`] → 422
/// - [`ServiceError::KeyConfiguration`] → 500
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed (empty secret, oversized batch, bad template id).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A phone number is not in canonical `+<digits>` form.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// A stored credential envelope failed authentication.
    #[error("integrity failure: {0}")]
    IntegrityFailure(String),

    /// The credential passphrase is missing or too short.
    #[error("key configuration error: {0}")]
    KeyConfiguration(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::InvalidFormat(_) => 400,
            ServiceError::IntegrityFailure(_) => 422,
            ServiceError::KeyConfiguration(_) => 500,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code used in [`ErrorResponse`](crate::protocol::ErrorResponse).
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::InvalidFormat(_) => "invalid_format",
            ServiceError::IntegrityFailure(_) => "integrity_failure",
            ServiceError::KeyConfiguration(_) => "key_configuration",
            ServiceError::Internal(_) => "internal_error",
        }
    }

    /// `true` for errors caused by the caller's input rather than by the
    /// service's keys or stored data.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::BadRequest(_) | ServiceError::InvalidFormat(_)
        )
    }
}
