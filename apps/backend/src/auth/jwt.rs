use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, info};
use uuid::Uuid;

use super::claims::Claims;
use super::denylist::TokenDenylist;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::security_config::SecurityConfig;

pub const TOKEN_EXPIRED: &str = "Token has expired";
pub const TOKEN_NOT_REFRESHABLE: &str = "Token has expired and can no longer be refreshed";
pub const TOKEN_BLACKLISTED: &str = "The token has been blacklisted";
pub const TOKEN_BAD_SIGNATURE: &str = "Token Signature could not be verified.";
pub const TOKEN_UNTRUSTED_ISSUER: &str = "Token issuer is not trusted.";
pub const TOKEN_UNDECODABLE: &str = "Could not decode token.";

/// A freshly minted access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    /// Seconds until expiry (TTL minutes × 60)
    pub expires_in: u64,
    pub claims: Claims,
}

fn unix_secs(now: SystemTime) -> Result<i64, AppError> {
    now.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .map_err(|_| AppError::internal("Failed to get current time"))
}

fn offset(base: i64, secs: u64) -> Option<i64> {
    i64::try_from(secs).ok().and_then(|s| base.checked_add(s))
}

/// Mint a signed access token for `user_id`, valid for the configured TTL.
/// Starts a new refresh chain.
pub fn mint_access_token(
    user_id: Uuid,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<IssuedToken, AppError> {
    mint(user_id, now, None, security)
}

fn mint(
    user_id: Uuid,
    now: SystemTime,
    orig_iat: Option<i64>,
    security: &SecurityConfig,
) -> Result<IssuedToken, AppError> {
    let iat = unix_secs(now)?;
    let ttl = security.access_ttl_secs();
    let exp = offset(iat, ttl).ok_or_else(|| AppError::internal("Token lifetime out of range"))?;

    let claims = Claims {
        sub: user_id.to_string(),
        iss: security.issuer.clone(),
        iat,
        exp,
        orig_iat: orig_iat.unwrap_or(iat),
        jti: Uuid::new_v4().simple().to_string(),
    };

    let access_token = encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))?;

    Ok(IssuedToken {
        access_token,
        expires_in: ttl,
        claims,
    })
}

/// Check signature, algorithm and issuer. Expiry is left to callers, since
/// verify and refresh apply different windows.
fn decode_signed(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;
    validation.set_issuer(&[security.issuer.as_str()]);
    validation.required_spec_claims = ["exp", "iat", "iss", "sub"]
        .into_iter()
        .map(String::from)
        .collect::<HashSet<_>>();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => {
            AppError::invalid_token(ErrorCode::InvalidTokenSignature, TOKEN_BAD_SIGNATURE)
        }
        ErrorKind::InvalidIssuer => {
            AppError::invalid_token(ErrorCode::InvalidToken, TOKEN_UNTRUSTED_ISSUER)
        }
        _ => AppError::invalid_token(ErrorCode::InvalidToken, TOKEN_UNDECODABLE),
    })
}

fn subject(claims: &Claims) -> Result<Uuid, AppError> {
    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::invalid_token(ErrorCode::InvalidToken, TOKEN_UNDECODABLE))
}

/// Last instant (exclusive) at which `claims` may be exchanged for a new token.
/// Fixed for the whole chain, so refreshing never extends it.
fn refresh_deadline(claims: &Claims, security: &SecurityConfig) -> i64 {
    offset(claims.orig_iat, security.refresh_ttl_secs()).unwrap_or(i64::MAX)
}

/// Verify a token and return the user id it was issued for.
///
/// Valid means: good signature, trusted issuer, `now < exp`, and not revoked.
pub fn verify_access_token(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
    denylist: &TokenDenylist,
) -> Result<Uuid, AppError> {
    let claims = decode_signed(token, security)?;
    let now = unix_secs(now)?;

    if now >= claims.exp {
        return Err(AppError::invalid_token(ErrorCode::TokenExpired, TOKEN_EXPIRED));
    }
    if denylist.is_revoked(&claims.jti, now) {
        return Err(AppError::invalid_token(
            ErrorCode::TokenBlacklisted,
            TOKEN_BLACKLISTED,
        ));
    }

    subject(&claims)
}

/// Exchange a valid, or expired-but-refreshable, token for a new one.
///
/// The old token id is revoked in the same step, so it can be refreshed at
/// most once and stops verifying immediately.
pub fn refresh_access_token(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
    denylist: &TokenDenylist,
) -> Result<IssuedToken, AppError> {
    let claims = decode_signed(token, security)?;
    let user_id = subject(&claims)?;
    let now_secs = unix_secs(now)?;
    let deadline = refresh_deadline(&claims, security);

    if now_secs >= deadline {
        return Err(AppError::invalid_token(
            ErrorCode::TokenExpired,
            TOKEN_NOT_REFRESHABLE,
        ));
    }
    if !denylist.revoke(&claims.jti, deadline, now_secs) {
        return Err(AppError::invalid_token(
            ErrorCode::TokenBlacklisted,
            TOKEN_BLACKLISTED,
        ));
    }

    let issued = mint(user_id, now, Some(claims.orig_iat), security)?;
    debug!(
        user_id = %user_id,
        old_jti = %claims.jti,
        new_jti = %issued.claims.jti,
        "access token rotated"
    );
    Ok(issued)
}

/// Best-effort revocation for logout. Tokens that do not decode, or that
/// are already past their refresh window, are ignored. Returns whether a
/// denylist entry was added.
pub fn revoke_access_token(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
    denylist: &TokenDenylist,
) -> bool {
    let Ok(claims) = decode_signed(token, security) else {
        return false;
    };
    let Ok(now) = unix_secs(now) else {
        return false;
    };

    let deadline = refresh_deadline(&claims, security);
    if now >= deadline {
        return false;
    }

    let revoked = denylist.revoke(&claims.jti, deadline, now);
    if revoked {
        info!(user_id = %claims.sub, "access token revoked");
    }
    revoked
}
