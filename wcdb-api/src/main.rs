//! World Cup history service (wcdb-api) - Main entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};

use wcdb_api::{build_router, logging, AppState};
use wcdb_common::config::{CliOverrides, Settings, TomlConfig};
use wcdb_common::db::{init_database, SqliteRepository};
use wcdb_common::Repository;

/// Command-line arguments for wcdb-api
#[derive(Parser, Debug)]
#[command(name = "wcdb-api")]
#[command(about = "World Cup history HTTP service")]
#[command(version)]
struct Args {
    /// Config file (default: ~/.config/wcdb/config.toml, then /etc/wcdb/config.toml)
    #[arg(short, long, env = "WCDB_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Loaded before tracing exists; the source is logged once the subscriber is up
    let (toml_config, config_source) = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load config file")?;

    let settings = Settings::resolve(
        CliOverrides {
            database_path: args.database,
            host: args.host,
            port: args.port,
        },
        &toml_config,
    )
    .context("Invalid configuration")?;

    logging::init_tracing(&settings.log_level);

    info!("Starting wcdb-api {}", logging::build_info());
    config_source.log();
    info!("Database: {}", settings.database_path.display());

    let pool = init_database(&settings.database_path)
        .await
        .context("Failed to initialize database")?;
    let repository = Arc::new(SqliteRepository::new(pool.clone()));

    let winners = repository.count_winners().await?;
    if winners == 0 {
        warn!("Database has no winners; run `wcdb-seed seed` to load historical data");
    } else {
        info!("Database holds {} winners", winners);
    }

    let app = build_router(AppState::new(repository));

    let addr = settings.bind_address();
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
