//! Process configuration read from the environment at startup.

pub mod db;
pub mod env;
pub mod password_policy;

pub use password_policy::PasswordPolicy;
