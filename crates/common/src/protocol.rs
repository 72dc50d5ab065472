//! Request and response types exchanged with the gateway.
//!
//! These types are serialised as JSON over the public HTTP API. None of them
//! carries a passphrase, and only the seal request carries a plaintext secret.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Learner identifier pre-check
// ---------------------------------------------------------------------------

/// Request body for `POST /v1/learner-ids/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyIdentifierRequest {
    pub identifier: String,
}

/// Why an identifier was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    WrongLength,
    InvalidSymbol,
    CheckSymbolMismatch,
}

/// Response body for `POST /v1/learner-ids/verify`.
///
/// A rejected identifier is a normal `200` response with `valid: false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierVerdict {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectionReason>,
}

impl IdentifierVerdict {
    pub fn accepted() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn rejected(reason: RejectionReason) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }
}

/// Request body for `POST /v1/learner-ids/verify-batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchVerifyRequest {
    pub identifiers: Vec<String>,
}

/// One entry of a [`BatchVerifyResponse`], echoing the submitted identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchVerdict {
    pub identifier: String,
    #[serde(flatten)]
    pub verdict: IdentifierVerdict,
}

/// Response body for `POST /v1/learner-ids/verify-batch`. Results keep input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchVerifyResponse {
    pub results: Vec<BatchVerdict>,
    pub valid_count: usize,
    pub invalid_count: usize,
}

// ---------------------------------------------------------------------------
// Messaging destination
// ---------------------------------------------------------------------------

/// Request body for `POST /v1/phone-numbers/normalize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizePhoneRequest {
    pub raw: String,
}

/// Response body for `POST /v1/phone-numbers/normalize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizePhoneResponse {
    pub canonical: String,
}

// ---------------------------------------------------------------------------
// Provider credentials
// ---------------------------------------------------------------------------

/// Request body for `POST /v1/credentials/seal`.
#[derive(Clone, Serialize, Deserialize)]
pub struct SealCredentialRequest {
    /// Plaintext provider secret. Never logged.
    pub secret: String,
    /// Message template identifiers to be stored next to the envelope.
    #[serde(default)]
    pub template_ids: Vec<String>,
}

impl std::fmt::Debug for SealCredentialRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SealCredentialRequest")
            .field("secret", &"[REDACTED]")
            .field("template_ids", &self.template_ids)
            .finish()
    }
}

/// Response body for `POST /v1/credentials/seal`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealCredentialResponse {
    /// Text-encoded envelope to persist in place of the secret.
    pub envelope: String,
    /// Display form exposing only the last four characters.
    pub masked: String,
}

/// Request body for `POST /v1/credentials/inspect`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectCredentialRequest {
    pub envelope: String,
}

/// Response body for `POST /v1/credentials/inspect`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectCredentialResponse {
    pub masked: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"invalid_format"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::ServiceError> for ErrorResponse {
    fn from(err: &crate::ServiceError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: always `"ok"` once the process is serving.
    pub status: String,
    /// Crate version of the running binary.
    pub version: String,
}
