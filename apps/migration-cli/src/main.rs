use auth_backend::config::db::db_url;
use clap::{Parser, ValueEnum};
use migration::MigrationCommand;
use sea_orm::Database;
use tracing::error;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

/// Runs schema migrations against the Postgres database configured by
/// POSTGRES_HOST, POSTGRES_PORT, PROD_DB, APP_DB_USER and APP_DB_PASSWORD.
#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Auth backend database migration tool")]
struct Args {
    #[arg(value_enum)]
    command: Command,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("error,migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let url = match db_url() {
        Ok(url) => url,
        Err(e) => {
            error!(error = %e, "invalid database configuration");
            std::process::exit(2);
        }
    };

    let db = match Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "could not connect to database");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate(&db, args.command.into()).await {
        error!(error = %e, "migration failed");
        std::process::exit(1);
    }
}
