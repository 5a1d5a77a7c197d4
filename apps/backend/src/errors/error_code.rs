//! Error codes for the auth backend.
//!
//! Codes never reach the response body (the envelope carries only a
//! message), but every failure is logged with one so operators can tell
//! failure classes apart. Add new codes here; never pass ad-hoc strings.

use core::fmt;

/// Centralized error codes. Each variant maps to a canonical
/// SCREAMING_SNAKE_CASE string used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// One or more payload fields failed their rules
    ValidationError,
    /// Body could not be read or parsed as JSON
    BadRequest,

    // Credentials & Tokens
    /// Email/password pair did not match a user
    InvalidCredentials,
    /// No bearer token on a request that needs one
    MissingToken,
    /// Token signature did not verify
    InvalidTokenSignature,
    /// Token past its expiry (or its refresh window)
    TokenExpired,
    /// Token was revoked or already rotated
    TokenBlacklisted,
    /// Token is malformed or carries unexpected claims
    InvalidToken,

    // Conflicts
    /// Email already registered
    UniqueEmail,
    /// Generic conflict (fallback for unmatched unique violations)
    Conflict,

    // Store
    /// User row could not be written
    UserCreateFailed,
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Record not found
    RecordNotFound,

    // System
    /// Internal server error
    Internal,
    /// Password hashing failure or unreadable stored digest
    HashingFailed,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidTokenSignature => "INVALID_TOKEN_SIGNATURE",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenBlacklisted => "TOKEN_BLACKLISTED",
            Self::InvalidToken => "INVALID_TOKEN",

            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::Conflict => "CONFLICT",

            Self::UserCreateFailed => "USER_CREATE_FAILED",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            Self::Internal => "INTERNAL",
            Self::HashingFailed => "HASHING_FAILED",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
