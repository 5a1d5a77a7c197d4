use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::http::Envelope;
use crate::web::trace_ctx;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect email or password";
pub const MISSING_TOKEN_MESSAGE: &str = "Token does not exist.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Token does not exist.")]
    MissingToken,
    #[error("Invalid token: {detail}")]
    InvalidToken { code: ErrorCode, detail: String },
    #[error("Store error: {detail}")]
    Store { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AppError::MissingToken => ErrorCode::MissingToken,
            AppError::InvalidToken { code, .. } => *code,
            AppError::Store { code, .. } => *code,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Message placed in the envelope. Server-side failures get a generic
    /// message; their detail only goes to the log.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::Conflict { detail, .. } => detail.clone(),
            AppError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            AppError::MissingToken => MISSING_TOKEN_MESSAGE.to_string(),
            AppError::InvalidToken { detail, .. } => detail.clone(),
            AppError::Store { detail, .. } => detail.clone(),
            AppError::Internal { .. } | AppError::Config { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    /// Get the HTTP status code for this error. Every client-input class
    /// is a 400, conflicts included.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. }
            | AppError::Conflict { .. }
            | AppError::InvalidCredentials
            | AppError::MissingToken
            | AppError::InvalidToken { .. } => StatusCode::BAD_REQUEST,
            AppError::Store { .. } | AppError::Internal { .. } | AppError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::ValidationError,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::BadRequest,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn missing_token() -> Self {
        Self::MissingToken
    }

    pub fn invalid_token(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::InvalidToken {
            code,
            detail: detail.into(),
        }
    }

    pub fn store(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Store {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::Internal,
            detail: detail.into(),
        }
    }

    pub fn hashing(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::HashingFailed,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable() -> Self {
        Self::store(ErrorCode::DbUnavailable, "Database unavailable")
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Conflict(ConflictKind::UniqueEmail, detail) => {
                AppError::conflict(ErrorCode::UniqueEmail, detail)
            }
            DomainError::Conflict(_, detail) => AppError::conflict(ErrorCode::Conflict, detail),
            // users are only looked up by token subject
            DomainError::NotFound(NotFoundKind::User, detail) => {
                AppError::invalid_token(ErrorCode::InvalidToken, detail)
            }
            DomainError::NotFound(NotFoundKind::Other(_), detail) => {
                AppError::store(ErrorCode::RecordNotFound, detail)
            }
            DomainError::Infra(InfraErrorKind::DbUnavailable, detail) => {
                AppError::store(ErrorCode::DbUnavailable, detail)
            }
            DomainError::Infra(InfraErrorKind::Timeout, detail) => {
                AppError::store(ErrorCode::DbTimeout, detail)
            }
            DomainError::Infra(InfraErrorKind::Other(_), detail) => {
                AppError::store(ErrorCode::DbError, detail)
            }
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(DomainError::from(e))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            error!(trace_id = %trace_id, code = %code, error = %self, "request failed");
        } else {
            warn!(trace_id = %trace_id, code = %code, "request rejected");
        }

        HttpResponse::build(status)
            .insert_header(("x-trace-id", trace_id))
            .json(Envelope::failure(status, self.message()))
    }
}
