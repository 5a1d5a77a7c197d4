use jsonwebtoken::Algorithm;

use crate::config::env::{must_var, var_or};
use crate::config::PasswordPolicy;
use crate::error::AppError;

pub const DEFAULT_ISSUER: &str = "auth-backend";
pub const DEFAULT_ACCESS_TTL_MINUTES: u64 = 60;
/// Two weeks, measured from the token's issue time.
pub const DEFAULT_REFRESH_TTL_MINUTES: u64 = 20_160;
/// Ten years. Larger values would overflow claim arithmetic.
pub const MAX_TTL_MINUTES: u64 = 5_256_000;

/// Argon2id cost parameters. One value is shared by the whole process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        // argon2 crate defaults (OWASP minimum for argon2id)
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl HashingConfig {
    /// Cheapest parameters argon2 accepts. Tests only.
    pub fn fast_for_tests() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }
}

/// Token signing and credential settings
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (HS256)
    pub algorithm: Algorithm,
    /// Value of the `iss` claim; tokens from any other issuer are rejected
    pub issuer: String,
    pub access_ttl_minutes: u64,
    /// Window after `iat` during which an expired token can still be refreshed
    pub refresh_ttl_minutes: u64,
    pub hashing: HashingConfig,
    pub password_policy: PasswordPolicy,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret and defaults elsewhere
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            issuer: DEFAULT_ISSUER.to_string(),
            access_ttl_minutes: DEFAULT_ACCESS_TTL_MINUTES,
            refresh_ttl_minutes: DEFAULT_REFRESH_TTL_MINUTES,
            hashing: HashingConfig::default(),
            password_policy: PasswordPolicy::default(),
        }
    }

    pub fn with_ttls(mut self, access_ttl_minutes: u64, refresh_ttl_minutes: u64) -> Self {
        self.access_ttl_minutes = access_ttl_minutes;
        self.refresh_ttl_minutes = refresh_ttl_minutes;
        self
    }

    pub fn with_hashing(mut self, hashing: HashingConfig) -> Self {
        self.hashing = hashing;
        self
    }

    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.password_policy = policy;
        self
    }

    /// Seconds reported to clients as `expires_in`.
    pub fn access_ttl_secs(&self) -> u64 {
        self.access_ttl_minutes.saturating_mul(60)
    }

    pub fn refresh_ttl_secs(&self) -> u64 {
        self.refresh_ttl_minutes.saturating_mul(60)
    }

    /// Load from BACKEND_JWT_* / BACKEND_HASH_* / PASSWORD_* variables.
    pub fn from_env() -> Result<Self, AppError> {
        let secret = must_var("BACKEND_JWT_SECRET")?;
        if secret.trim().is_empty() {
            return Err(AppError::config("BACKEND_JWT_SECRET must not be empty"));
        }

        let defaults = HashingConfig::default();
        let hashing = HashingConfig {
            memory_kib: var_or("BACKEND_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: var_or("BACKEND_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: var_or("BACKEND_HASH_PARALLELISM", defaults.parallelism)?,
        };

        let access = var_or("BACKEND_JWT_TTL_MINUTES", DEFAULT_ACCESS_TTL_MINUTES)?;
        let refresh = var_or("BACKEND_JWT_REFRESH_TTL_MINUTES", DEFAULT_REFRESH_TTL_MINUTES)?;
        for (name, minutes) in [
            ("BACKEND_JWT_TTL_MINUTES", access),
            ("BACKEND_JWT_REFRESH_TTL_MINUTES", refresh),
        ] {
            if minutes > MAX_TTL_MINUTES {
                return Err(AppError::config(format!(
                    "{name} must not exceed {MAX_TTL_MINUTES}"
                )));
            }
        }
        if access == 0 {
            return Err(AppError::config("BACKEND_JWT_TTL_MINUTES must be at least 1"));
        }
        if refresh < access {
            return Err(AppError::config(
                "BACKEND_JWT_REFRESH_TTL_MINUTES must not be shorter than BACKEND_JWT_TTL_MINUTES",
            ));
        }

        let mut config = Self::new(secret.into_bytes())
            .with_ttls(access, refresh)
            .with_hashing(hashing)
            .with_password_policy(PasswordPolicy::from_env()?);
        config.issuer = var_or("BACKEND_JWT_ISSUER", DEFAULT_ISSUER.to_string())?;
        Ok(config)
    }

    /// Random secret and cheap hashing, for tests.
    pub fn for_tests() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string().into_bytes())
            .with_hashing(HashingConfig::fast_for_tests())
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
