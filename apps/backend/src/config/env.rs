use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Get required environment variable or return error
pub fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

/// Parse an optional variable, falling back to `default` when unset.
/// A set-but-unparsable value is a configuration error, not a silent default.
pub fn var_or<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|e| {
            AppError::config(format!("Environment variable '{name}' is invalid: {e}"))
        }),
        Err(_) => Ok(default),
    }
}

/// Boolean flag accepting true/false, 1/0, yes/no, on/off.
pub fn flag_or(name: &str, default: bool) -> Result<bool, AppError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            other => Err(AppError::config(format!(
                "Environment variable '{name}' must be a boolean, got '{other}'"
            ))),
        },
        Err(_) => Ok(default),
    }
}
