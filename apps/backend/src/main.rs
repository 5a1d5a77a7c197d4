use actix_web::{web, App, HttpServer};
use auth_backend::config::db::DbKind;
use auth_backend::config::env::var_or;
use auth_backend::error::AppError;
use auth_backend::infra::state::build_state;
use auth_backend::middleware::{
    cors_middleware, RequestTrace, StructuredLogger, TraceSpan,
};
use auth_backend::routes;
use auth_backend::state::security_config::SecurityConfig;
use auth_backend::telemetry;
use tracing::{error, info};

fn exit_on_config_error<T>(result: Result<T, AppError>) -> T {
    result.unwrap_or_else(|e| {
        error!(error = %e, "startup configuration invalid");
        eprintln!("❌ {e}");
        std::process::exit(1);
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let host: String = exit_on_config_error(var_or("BACKEND_HOST", "0.0.0.0".to_string()));
    let port: u16 = exit_on_config_error(var_or("BACKEND_PORT", 3001));
    let security_config = exit_on_config_error(SecurityConfig::from_env());
    let db_kind = exit_on_config_error(DbKind::from_env());

    let app_state = match build_state()
        .with_db(db_kind)
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    info!(host = %host, port, db_kind = ?db_kind, "starting auth backend");
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
