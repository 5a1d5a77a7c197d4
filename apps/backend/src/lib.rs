#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod validation;
pub mod web;

// Re-exports for public API
pub use auth::{Claims, IssuedToken};
pub use config::db::DbKind;
pub use error::AppError;
pub use extractors::{BearerToken, ValidatedJson};
pub use http::{Envelope, EnvelopeData, TokenData, UserData};
pub use infra::state::{build_state, StateBuilder};
pub use middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
pub use state::{AppState, SecurityConfig};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
