//! Test logging bootstrap shared by the backend's test binaries.
//!
//! Filter precedence: `TEST_LOG`, then `RUST_LOG`, then `warn`. Setting
//! `TEST_LOG_FORMAT=json` switches to the same JSON layout production uses,
//! which helps when checking structured fields on auth events.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

fn filter_from_env() -> EnvFilter {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the test subscriber once per process. Safe to call repeatedly.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let json = std::env::var("TEST_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let builder = fmt()
            .with_env_filter(filter_from_env())
            .with_test_writer()
            .without_time();

        // try_init: another harness may already own the global subscriber
        if json {
            builder.json().try_init().ok();
        } else {
            builder.try_init().ok();
        }
    });
}
