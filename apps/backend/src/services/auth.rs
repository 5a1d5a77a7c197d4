//! Sign-up, login, logout and refresh, composed from the validator, the
//! user store, the password hasher and the token issuer.

use std::time::SystemTime;

use sea_orm::ConnectionTrait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::jwt::{self, IssuedToken};
use crate::auth::password;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::errors::ErrorCode;
use crate::infra::require_db;
use crate::logging::pii::Redacted;
use crate::repos::users;
use crate::state::app_state::AppState;
use crate::state::HashingConfig;
use crate::validation::{self, SignUpInput};

pub const SIGN_UP_MESSAGE: &str = "User created successfully.";
pub const LOGIN_MESSAGE: &str = "Login successfully.";
pub const LOGOUT_MESSAGE: &str = "Logout successfully.";
pub const REFRESH_MESSAGE: &str = "Token has been refreshed.";
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create user.";
pub const CURRENT_USER_MESSAGE: &str = "User retrieved successfully.";
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found.";

/// Register a user and issue their first token.
pub async fn sign_up(state: &AppState, payload: &Value) -> Result<IssuedToken, AppError> {
    let db = require_db(state)?;
    let input =
        validation::validate_sign_up_with_store(db, payload, &state.security.password_policy)
            .await?;

    let user = register(db, input, state.security.hashing).await?;
    info!(user_id = %user.id, email = %Redacted(&user.email), "user signed up");
    jwt::mint_access_token(user.id, SystemTime::now(), &state.security)
}

/// Hash and insert an already validated sign-up. The unique index decides
/// races that got past the validator's lookup.
async fn register<C: ConnectionTrait + Send + Sync>(
    db: &C,
    input: SignUpInput,
    hashing: HashingConfig,
) -> Result<users::User, AppError> {
    let digest = password::hash_password_blocking(input.password, hashing).await?;

    users::create_user(db, &input.name, &input.email, &digest)
        .await
        .map_err(|e| match e {
            DomainError::Conflict(..) => AppError::from(e),
            other => {
                warn!(email = %Redacted(&input.email), error = %other, "user insert failed");
                AppError::store(ErrorCode::UserCreateFailed, CREATE_FAILED_MESSAGE)
            }
        })
}

/// Check a password against a throwaway digest so that unknown emails take
/// as long as wrong passwords.
async fn burn_verification(plain: String, hashing: HashingConfig) -> Result<(), AppError> {
    tokio::task::spawn_blocking(move || {
        let digest = password::dummy_digest(&hashing)?;
        password::verify_password(&plain, digest).map(|_| ())
    })
    .await
    .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))?
}

/// Authenticate by email and password. Unknown email and wrong password
/// are indistinguishable to the caller.
pub async fn login(state: &AppState, payload: &Value) -> Result<IssuedToken, AppError> {
    let db = require_db(state)?;
    let input = validation::validate_login(payload)?;

    let Some(user) = users::find_user_by_email(db, &input.email).await? else {
        burn_verification(input.password, state.security.hashing).await?;
        debug!(email = %Redacted(&input.email), "login for unknown email");
        return Err(AppError::invalid_credentials());
    };

    if !password::verify_password_blocking(input.password, user.password_hash.clone()).await? {
        debug!(user_id = %user.id, "login with wrong password");
        return Err(AppError::invalid_credentials());
    }

    info!(user_id = %user.id, "user logged in");
    jwt::mint_access_token(user.id, SystemTime::now(), &state.security)
}

/// Revoke the presented token, if any. Always succeeds.
pub fn logout(state: &AppState, bearer: Option<&str>) {
    match bearer {
        Some(token) => {
            let revoked = jwt::revoke_access_token(
                token,
                SystemTime::now(),
                &state.security,
                &state.denylist,
            );
            debug!(revoked, "logout");
        }
        None => debug!("logout without token"),
    }
}

/// Exchange the presented token for a fresh one.
pub fn refresh_token(state: &AppState, bearer: Option<&str>) -> Result<IssuedToken, AppError> {
    let token = bearer.ok_or_else(AppError::missing_token)?;
    jwt::refresh_access_token(token, SystemTime::now(), &state.security, &state.denylist)
}

/// Resolve the presented token to the user it was issued for.
pub async fn current_user(
    state: &AppState,
    bearer: Option<&str>,
) -> Result<users::User, AppError> {
    let token = bearer.ok_or_else(AppError::missing_token)?;
    let user_id =
        jwt::verify_access_token(token, SystemTime::now(), &state.security, &state.denylist)?;
    let db = require_db(state)?;

    users::find_user_by_id(db, user_id).await?.ok_or_else(|| {
        debug!(user_id = %user_id, "token subject has no user");
        AppError::from(DomainError::not_found(
            NotFoundKind::User,
            USER_NOT_FOUND_MESSAGE,
        ))
    })
}
