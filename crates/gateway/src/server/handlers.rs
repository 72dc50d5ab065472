//! Axum request handlers for all service endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{
    BatchVerdict, BatchVerifyRequest, BatchVerifyResponse, ErrorResponse, HealthResponse,
    IdentifierVerdict, InspectCredentialRequest, InspectCredentialResponse,
    NormalizePhoneRequest, NormalizePhoneResponse, RejectionReason, SealCredentialRequest,
    SealCredentialResponse, VerifyIdentifierRequest,
};
use common::ServiceError;
use integrity::{checksum, is_valid_template_id, mask, ChecksumError, CipherError, PhoneError};
use tracing::{debug, error, info, warn};

use super::state::AppState;

/// A [`ServiceError`] rendered as a JSON [`ErrorResponse`].
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if self.0.is_client_error() {
            debug!(code = self.0.code(), "request rejected");
        } else {
            error!(code = self.0.code(), error = %self.0, "request failed");
        }
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

fn rejection_reason(err: &ChecksumError) -> RejectionReason {
    match err {
        ChecksumError::WrongLength { .. } => RejectionReason::WrongLength,
        ChecksumError::InvalidSymbol { .. } => RejectionReason::InvalidSymbol,
        ChecksumError::Mismatch { .. } => RejectionReason::CheckSymbolMismatch,
    }
}

fn verdict_for(identifier: &str) -> IdentifierVerdict {
    match checksum::check(identifier) {
        Ok(()) => IdentifierVerdict::accepted(),
        Err(e) => IdentifierVerdict::rejected(rejection_reason(&e)),
    }
}

fn cipher_failure(err: CipherError) -> ServiceError {
    match err {
        CipherError::KeyConfiguration(msg) => ServiceError::KeyConfiguration(msg),
        CipherError::Integrity => {
            ServiceError::IntegrityFailure("credential envelope failed authentication".into())
        }
        CipherError::Encryption => ServiceError::Internal("encryption failed".into()),
    }
}

/// `POST /v1/learner-ids/verify`: local check-symbol pre-check.
///
/// A bad identifier is not an HTTP error: the response is `200` with
/// `valid: false` and the rejection reason, and no registry call is made.
pub async fn verify_identifier(Json(req): Json<VerifyIdentifierRequest>) -> Json<IdentifierVerdict> {
    let verdict = verdict_for(&req.identifier);
    if let Some(reason) = verdict.reason {
        debug!(?reason, "learner identifier rejected");
    }
    Json(verdict)
}

/// `POST /v1/learner-ids/verify-batch`: pre-check many identifiers at once.
pub async fn verify_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchVerifyRequest>,
) -> Result<Json<BatchVerifyResponse>, ApiError> {
    if req.identifiers.len() > state.max_batch_size {
        return Err(ServiceError::BadRequest(format!(
            "batch of {} identifiers exceeds the limit of {}",
            req.identifiers.len(),
            state.max_batch_size
        ))
        .into());
    }

    let results: Vec<BatchVerdict> = req
        .identifiers
        .into_iter()
        .map(|identifier| {
            let verdict = verdict_for(&identifier);
            BatchVerdict {
                identifier,
                verdict,
            }
        })
        .collect();

    let valid_count = results.iter().filter(|r| r.verdict.valid).count();
    let invalid_count = results.len() - valid_count;
    info!(valid_count, invalid_count, "batch verification complete");

    Ok(Json(BatchVerifyResponse {
        results,
        valid_count,
        invalid_count,
    }))
}

/// `POST /v1/phone-numbers/normalize`: canonicalise a messaging destination.
///
/// Returns `400 invalid_format` so the caller can abort the send before any
/// provider call is made.
pub async fn normalize_phone(
    Json(req): Json<NormalizePhoneRequest>,
) -> Result<Json<NormalizePhoneResponse>, ApiError> {
    let canonical = integrity::normalize(&req.raw).map_err(|e| match e {
        PhoneError::InvalidFormat(msg) => ServiceError::InvalidFormat(msg),
    })?;
    Ok(Json(NormalizePhoneResponse { canonical }))
}

/// `POST /v1/credentials/seal`: encrypt a provider secret for storage.
///
/// Only the envelope and the masked display form are returned; the caller
/// persists the envelope and discards the plaintext.
pub async fn seal_credential(
    State(state): State<AppState>,
    Json(req): Json<SealCredentialRequest>,
) -> Result<Json<SealCredentialResponse>, ApiError> {
    if req.secret.trim().is_empty() {
        return Err(ServiceError::BadRequest("secret must not be empty".into()).into());
    }
    if let Some(bad) = req.template_ids.iter().find(|id| !is_valid_template_id(id)) {
        return Err(ServiceError::BadRequest(format!("malformed template id: {bad:?}")).into());
    }

    let envelope = state
        .cipher
        .seal(req.secret.as_bytes())
        .map_err(cipher_failure)?;
    info!(
        template_ids = req.template_ids.len(),
        "provider credential sealed"
    );

    Ok(Json(SealCredentialResponse {
        envelope,
        masked: mask(&req.secret),
    }))
}

/// `POST /v1/credentials/inspect`: decrypt a stored envelope and return its
/// masked form.
///
/// A failed integrity check is a hard `422`; nothing derived from the
/// envelope's contents is returned.
pub async fn inspect_credential(
    State(state): State<AppState>,
    Json(req): Json<InspectCredentialRequest>,
) -> Result<Json<InspectCredentialResponse>, ApiError> {
    let plaintext = state.cipher.open(&req.envelope).map_err(|e| {
        warn!(error = %e, "stored credential could not be opened");
        cipher_failure(e)
    })?;
    let secret = String::from_utf8_lossy(&plaintext);
    Ok(Json(InspectCredentialResponse {
        masked: mask(&secret),
    }))
}

/// `GET /health`: liveness check.
///
/// The cipher is built before the listener binds, so a serving process is
/// always ready.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::router;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn post_json(state: AppState, uri: &str, body: Value) -> (StatusCode, Value) {
        let app = router::build(state);
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn verify_accepts_valid_identifier() {
        let (status, body) = post_json(
            AppState::for_tests(),
            "/v1/learner-ids/verify",
            json!({"identifier": "23456789aa"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"valid": true}));
    }

    #[tokio::test]
    async fn verify_rejects_with_reason() {
        let cases = [
            ("23456789AB", "check_symbol_mismatch"),
            ("23456789A", "wrong_length"),
            ("0234567891", "invalid_symbol"),
        ];
        for (identifier, reason) in cases {
            let (status, body) = post_json(
                AppState::for_tests(),
                "/v1/learner-ids/verify",
                json!({ "identifier": identifier }),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"valid": false, "reason": reason}));
        }
    }

    #[tokio::test]
    async fn batch_preserves_order_and_counts() {
        let (status, body) = post_json(
            AppState::for_tests(),
            "/v1/learner-ids/verify-batch",
            json!({"identifiers": ["2222222222", "23456789AB", "23456789AA"]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid_count"], 2);
        assert_eq!(body["invalid_count"], 1);
        let results = body["results"].as_array().unwrap();
        assert_eq!(results[0]["identifier"], "2222222222");
        assert_eq!(results[1]["valid"], false);
        assert_eq!(results[1]["reason"], "check_symbol_mismatch");
        assert_eq!(results[2]["valid"], true);
    }

    #[tokio::test]
    async fn batch_over_limit_is_bad_request() {
        let ids: Vec<String> = (0..5).map(|_| "2222222222".to_string()).collect();
        let (status, body) = post_json(
            AppState::for_tests(),
            "/v1/learner-ids/verify-batch",
            json!({ "identifiers": ids }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "bad_request");
    }

    #[tokio::test]
    async fn normalize_strips_channel_prefix() {
        let (status, body) = post_json(
            AppState::for_tests(),
            "/v1/phone-numbers/normalize",
            json!({"raw": "whatsapp:+61412345678"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["canonical"], "+61412345678");
    }

    #[tokio::test]
    async fn normalize_rejects_national_number() {
        let (status, body) = post_json(
            AppState::for_tests(),
            "/v1/phone-numbers/normalize",
            json!({"raw": "0412345678"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_format");
    }

    #[tokio::test]
    async fn seal_then_inspect_round_trip() {
        let state = AppState::for_tests();
        let (status, sealed) = post_json(
            state.clone(),
            "/v1/credentials/seal",
            json!({"secret": "auth_token_ABCD9876", "template_ids": ["HX0123456789"]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sealed["masked"], "****9876");
        let envelope = sealed["envelope"].as_str().unwrap();
        assert!(!envelope.contains("auth_token"));

        let plaintext = state.cipher.open(envelope).unwrap();
        assert_eq!(plaintext, b"auth_token_ABCD9876");

        let (status, inspected) = post_json(
            state,
            "/v1/credentials/inspect",
            json!({ "envelope": envelope }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(inspected, json!({"masked": "****9876"}));
    }

    #[tokio::test]
    async fn seal_rejects_empty_secret() {
        let (status, body) = post_json(
            AppState::for_tests(),
            "/v1/credentials/seal",
            json!({"secret": "   "}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "bad_request");
    }

    #[tokio::test]
    async fn seal_rejects_malformed_template_id() {
        let (status, body) = post_json(
            AppState::for_tests(),
            "/v1/credentials/seal",
            json!({"secret": "auth_token_1234", "template_ids": ["bad id"]}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("template id"));
    }

    #[tokio::test]
    async fn inspect_rejects_tampered_envelope() {
        let state = AppState::for_tests();
        let envelope = state.cipher.seal(b"auth_token_1234").unwrap();
        let mut bytes = envelope.into_bytes();
        // Swap one base64 symbol for another valid one.
        let i = bytes.len() / 2;
        bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        let (status, body) = post_json(
            state,
            "/v1/credentials/inspect",
            json!({ "envelope": tampered }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "integrity_failure");
        assert!(body.get("masked").is_none());
    }

    #[tokio::test]
    async fn inspect_rejects_garbage() {
        let (status, body) = post_json(
            AppState::for_tests(),
            "/v1/credentials/inspect",
            json!({"envelope": "not-an-envelope"}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "integrity_failure");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let Json(body) = health().await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn cipher_failures_map_to_service_errors() {
        assert!(matches!(
            cipher_failure(CipherError::Integrity),
            ServiceError::IntegrityFailure(_)
        ));
        assert!(matches!(
            cipher_failure(CipherError::KeyConfiguration("short".into())),
            ServiceError::KeyConfiguration(_)
        ));
        assert!(matches!(
            cipher_failure(CipherError::Encryption),
            ServiceError::Internal(_)
        ));
    }
}
