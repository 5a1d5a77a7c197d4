//! Infrastructure layer: database bootstrap, state construction and
//! DbErr translation.

pub mod db;
pub mod db_errors;
pub mod state;

use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Borrow the database connection from AppState, or fail with a 500
/// `DB_UNAVAILABLE` when the state was built without one.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db().ok_or_else(AppError::db_unavailable)
}
