//! Uniform response envelope.
//!
//! Every response body, success or failure, has the same four keys:
//! `{error, status_code, message, data}`. The `status_code` in the body is
//! always the HTTP status of the response, and `error` is false exactly
//! when that status is 200.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

use crate::auth::jwt::IssuedToken;
use crate::repos::users::User;

pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// Token payload carried in `data` on sign-up, login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the access token expires.
    pub expires_in: u64,
}

impl From<IssuedToken> for TokenData {
    fn from(token: IssuedToken) -> Self {
        Self {
            access_token: token.access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: token.expires_in,
        }
    }
}

/// Public fields of the authenticated user. The password digest never
/// leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
    /// RFC 3339
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        let stamp = |t: time::OffsetDateTime| t.format(&Rfc3339).unwrap_or_default();
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            created_at: stamp(user.created_at),
            updated_at: stamp(user.updated_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvelopeData {
    Token(TokenData),
    User(UserData),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub error: bool,
    pub status_code: u16,
    pub message: String,
    /// Serialized as `null` when absent; the key is never omitted.
    pub data: Option<EnvelopeData>,
}

impl Envelope {
    /// Build an envelope. `error` is derived from the status so the two
    /// can never disagree.
    pub fn format(
        status: StatusCode,
        message: impl Into<String>,
        data: Option<EnvelopeData>,
    ) -> Self {
        let error = status != StatusCode::OK;
        Self {
            error,
            status_code: status.as_u16(),
            message: message.into(),
            // Failures never carry a payload.
            data: if error { None } else { data },
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::format(StatusCode::OK, message, None)
    }

    pub fn with_token(message: impl Into<String>, token: impl Into<TokenData>) -> Self {
        Self::format(StatusCode::OK, message, Some(EnvelopeData::Token(token.into())))
    }

    pub fn with_user(message: impl Into<String>, user: impl Into<UserData>) -> Self {
        Self::format(StatusCode::OK, message, Some(EnvelopeData::User(user.into())))
    }

    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self::format(status, message, None)
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Render as an HTTP response whose status matches `status_code`.
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(self.status()).json(self)
    }
}
