use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use once_cell::sync::OnceCell;

use crate::error::AppError;
use crate::state::HashingConfig;

fn hasher(config: &HashingConfig) -> Result<Argon2<'static>, AppError> {
    let params = Params::new(
        config.memory_kib,
        config.iterations,
        config.parallelism,
        None,
    )
    .map_err(|e| AppError::hashing(format!("Invalid argon2 parameters: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password with argon2id and a random salt. Returns a PHC string.
pub fn hash_password(plain: &str, config: &HashingConfig) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher(config)?
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::hashing(format!("Failed to hash password: {e}")))
}

/// Verify a password against a stored PHC string.
///
/// Cost parameters are read from the digest itself, so digests produced
/// under older settings keep verifying.
pub fn verify_password(plain: &str, digest: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(digest)
        .map_err(|e| AppError::hashing(format!("Invalid password hash: {e}")))?;

    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::hashing(format!("Failed to verify password: {e}"))),
    }
}

/// Digest checked against when the account does not exist, so that a
/// login for an unknown email costs about as much as a wrong password.
pub fn dummy_digest(config: &HashingConfig) -> Result<&'static str, AppError> {
    static DUMMY: OnceCell<String> = OnceCell::new();
    DUMMY
        .get_or_try_init(|| hash_password("dummy-password-never-matches", config))
        .map(String::as_str)
}

/// `hash_password` on the blocking pool.
pub async fn hash_password_blocking(
    plain: String,
    config: HashingConfig,
) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&plain, &config))
        .await
        .map_err(|e| AppError::internal(format!("Hashing task failed: {e}")))?
}

/// `verify_password` on the blocking pool.
pub async fn verify_password_blocking(plain: String, digest: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &digest))
        .await
        .map_err(|e| AppError::internal(format!("Verification task failed: {e}")))?
}
