use std::future::Future;
use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{connection_url, DbKind};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 500;

fn engine(kind: DbKind) -> &'static str {
    match kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteMemory => "sqlite",
    }
}

/// Retry with a fixed interval; returns the last error once attempts run out.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

fn connect_options(kind: DbKind, url: String) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url);
    opt.acquire_timeout(Duration::from_secs(5)).sqlx_logging(false);
    match kind {
        // every sqlite::memory: connection is its own database, so the
        // migrated connection must be the only one
        DbKind::SqliteMemory => {
            opt.min_connections(1).max_connections(1);
        }
        DbKind::Postgres => {
            opt.min_connections(1).max_connections(10);
        }
    }
    opt
}

/// Connect and apply pending migrations. The returned pool is ready to serve.
pub async fn bootstrap_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = connection_url(kind)?;
    info!(db_kind = ?kind, engine = engine(kind), "bootstrap=start");

    let conn = match kind {
        DbKind::Postgres => {
            retry_connection(
                || {
                    let url = url.clone();
                    async move {
                        Database::connect(connect_options(kind, url))
                            .await
                            .map_err(AppError::from)
                    }
                },
                CONNECT_ATTEMPTS,
                CONNECT_INTERVAL_MS,
            )
            .await?
        }
        DbKind::SqliteMemory => Database::connect(connect_options(kind, url)).await?,
    };

    migration::migrate(&conn, MigrationCommand::Up).await?;

    info!("bootstrap=ready");
    Ok(conn)
}
