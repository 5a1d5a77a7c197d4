use auth_backend::config::db::DbKind;
use auth_backend::error::AppError;
use auth_backend::infra::state::{build_state, StateBuilder};
use auth_backend::state::{AppState, SecurityConfig};

/// Builder preloaded with a private in-memory database and cheap hashing.
pub fn test_state_builder() -> StateBuilder {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_security(SecurityConfig::for_tests())
}

pub async fn build_test_state() -> Result<AppState, AppError> {
    test_state_builder().build().await
}
