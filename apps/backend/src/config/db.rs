use std::env;

use super::env::must_var;
use crate::error::AppError;

/// Which database backend the process talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// Production Postgres, configured from POSTGRES_* / PROD_DB / APP_DB_*
    Postgres,
    /// Private in-memory SQLite; used by tests and local smoke runs
    SqliteMemory,
}

impl DbKind {
    /// Read `BACKEND_DB` (`postgres` | `sqlite-memory`), defaulting to Postgres.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("BACKEND_DB") {
            Err(_) => Ok(DbKind::Postgres),
            Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "postgres" | "postgresql" => Ok(DbKind::Postgres),
                "sqlite-memory" | "sqlite::memory:" => Ok(DbKind::SqliteMemory),
                other => Err(AppError::config(format!(
                    "BACKEND_DB must be 'postgres' or 'sqlite-memory', got '{other}'"
                ))),
            },
        }
    }
}

/// Builds the Postgres URL from environment variables.
pub fn db_url() -> Result<String, AppError> {
    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = must_var("PROD_DB")?;
    let username = must_var("APP_DB_USER")?;
    let password = must_var("APP_DB_PASSWORD")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

/// Connection string for a DbKind.
pub fn connection_url(kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => db_url(),
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}
