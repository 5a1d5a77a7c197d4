use super::env::{flag_or, var_or};
use crate::error::AppError;

/// Password strength rules applied on sign-up.
///
/// Kept as data so tests and deployments can tighten or relax it without
/// touching the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    /// At least one uppercase and one lowercase letter
    pub require_mixed_case: bool,
    pub require_numbers: bool,
    /// Punctuation, symbols and whitespace all count
    pub require_symbols: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_mixed_case: true,
            require_numbers: true,
            require_symbols: true,
        }
    }
}

impl PasswordPolicy {
    /// Defaults overridden by PASSWORD_MIN_LENGTH, PASSWORD_REQUIRE_MIXED_CASE,
    /// PASSWORD_REQUIRE_NUMBERS and PASSWORD_REQUIRE_SYMBOLS.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let policy = Self {
            min_length: var_or("PASSWORD_MIN_LENGTH", defaults.min_length)?,
            require_mixed_case: flag_or(
                "PASSWORD_REQUIRE_MIXED_CASE",
                defaults.require_mixed_case,
            )?,
            require_numbers: flag_or("PASSWORD_REQUIRE_NUMBERS", defaults.require_numbers)?,
            require_symbols: flag_or("PASSWORD_REQUIRE_SYMBOLS", defaults.require_symbols)?,
        };

        if policy.min_length == 0 {
            return Err(AppError::config("PASSWORD_MIN_LENGTH must be at least 1"));
        }
        Ok(policy)
    }
}
