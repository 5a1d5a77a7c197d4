//! Business logic; handlers stay thin and call into here.

pub mod auth;
