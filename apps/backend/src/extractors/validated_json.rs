use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::future::LocalBoxFuture;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::logging::pii::Redacted;

/// Request bodies larger than this are rejected before parsing.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// JSON body extractor whose failures render as the standard 400 envelope
/// instead of actix's plain-text `JsonPayloadError`.
///
/// Handlers that validate field-by-field take `ValidatedJson<serde_json::Value>`
/// so that shape problems are reported by the validator, not serde.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("")
            .to_string();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(error = %e, "Failed to read request body chunk");
                    AppError::bad_request("Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request("Request body is too large"));
                }
                body.extend_from_slice(&chunk);
            }

            let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
                debug!(
                    error = %Redacted(&e.to_string()),
                    content_type = %content_type,
                    body_size = body.len(),
                    "JSON parsing failed"
                );
                AppError::bad_request(classify_json_error(&e))
            })?;

            Ok(ValidatedJson(parsed))
        })
    }
}

/// Client-safe description of a parse failure. Never echoes body content.
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            let line = error.line();
            format!("Invalid JSON at line {line}")
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "Invalid JSON: wrong types for one or more fields".to_string()
        }
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::errors::ErrorCode;

    #[derive(Debug, Deserialize, Serialize)]
    struct TestStruct {
        pub name: String,
        pub age: u32,
    }

    #[test]
    fn test_classify_json_error_syntax() {
        let json = r#"{"name": "test", "age": }"#;
        let error = serde_json::from_str::<TestStruct>(json).unwrap_err();
        let detail = classify_json_error(&error);
        assert!(detail.contains("Invalid JSON"));
        assert!(detail.contains("line") || detail.contains("syntax"));
    }

    #[test]
    fn test_classify_json_error_eof() {
        let json = r#"{"name": "test""#;
        let error = serde_json::from_str::<TestStruct>(json).unwrap_err();
        let detail = classify_json_error(&error);
        assert!(detail.contains("unexpected end of input"));
    }

    #[test]
    fn test_classify_json_error_data() {
        let json = r#"{"name": 123, "age": "invalid"}"#;
        let error = serde_json::from_str::<TestStruct>(json).unwrap_err();
        let detail = classify_json_error(&error);
        assert!(detail.contains("wrong types"));
    }

    async fn extract(body: &'static str) -> Result<ValidatedJson<serde_json::Value>, AppError> {
        let (req, mut payload) = TestRequest::post()
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload(body)
            .to_http_parts();
        ValidatedJson::<serde_json::Value>::from_request(&req, &mut payload).await
    }

    #[actix_web::test]
    async fn test_extracts_any_json_value() {
        let value = extract(r#"{"email": "ann@example.com"}"#).await.unwrap();
        assert_eq!(value["email"], "ann@example.com");
        assert!(extract("[1, 2]").await.unwrap().is_array());
    }

    #[actix_web::test]
    async fn test_malformed_json_is_400() {
        let err = extract(r#"{"email": "#).await.unwrap_err();
        assert_eq!(err.status(), actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert!(err.message().starts_with("Invalid JSON"));
    }

    #[actix_web::test]
    async fn test_empty_body_is_400() {
        let err = extract("").await.unwrap_err();
        assert_eq!(err.message(), "Invalid JSON: unexpected end of input");
    }
}
