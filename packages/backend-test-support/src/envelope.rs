//! Response envelope test helpers
//!
//! Asserts the uniform `{error, status_code, message, data}` contract without
//! depending on backend types.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Local envelope struct that mirrors the backend's wire shape.
/// `D` is the shape of `data`; token payloads unless a test says otherwise.
#[derive(Debug, Deserialize)]
#[serde(bound = "D: DeserializeOwned")]
pub struct EnvelopeLike<D = TokenDataLike> {
    pub error: bool,
    pub status_code: u16,
    pub message: String,
    pub data: Option<D>,
}

#[derive(Debug, Deserialize)]
pub struct TokenDataLike {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Read a ServiceResponse and assert it is a well-formed envelope.
///
/// Validates:
/// - HTTP status matches expected
/// - body `status_code` equals the HTTP status
/// - `error` is false exactly when the status is 200
/// - `data` key is always present (null when absent)
/// - x-trace-id header is present on error responses
pub async fn read_envelope(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
) -> EnvelopeLike {
    read_envelope_as(resp, expected_status).await
}

/// [`read_envelope`] with a caller-chosen `data` shape.
pub async fn read_envelope_as<D: DeserializeOwned>(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
) -> EnvelopeLike<D> {
    let status = resp.status();
    assert_eq!(status, expected_status);

    let is_error = status != StatusCode::OK;
    if is_error {
        let trace_id = resp
            .headers()
            .get("x-trace-id")
            .expect("x-trace-id header should be present on errors")
            .to_str()
            .expect("x-trace-id header should be valid UTF-8");
        assert!(!trace_id.is_empty());
    }

    let body = actix_web::test::read_body(resp).await;
    let raw: Value = serde_json::from_slice(&body).expect("body should be JSON");
    assert!(
        raw.get("data").is_some(),
        "envelope must always carry a data key: {raw}"
    );

    let envelope: EnvelopeLike<D> =
        serde_json::from_value(raw).expect("body should match the envelope shape");
    assert_eq!(envelope.status_code, status.as_u16());
    assert_eq!(envelope.error, is_error);
    if is_error {
        assert!(envelope.data.is_none(), "errors never carry data");
    }

    envelope
}

/// Assert an error envelope with the given status and exact message.
pub async fn assert_error_envelope(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_message: &str,
) {
    let envelope = read_envelope(resp, expected_status).await;
    assert_eq!(envelope.message, expected_message);
}
