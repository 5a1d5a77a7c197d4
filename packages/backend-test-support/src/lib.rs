//! Backend test support utilities
//!
//! Shared helpers for the backend's integration tests: unified logging
//! initialization, unique test data, and response envelope assertions.

pub mod envelope;
pub mod logging;
pub mod unique_helpers;
