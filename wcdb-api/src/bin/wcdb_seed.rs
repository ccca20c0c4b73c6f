//! Database maintenance utility
//!
//! **Usage:**
//! ```bash
//! wcdb-seed sync [--force]
//! wcdb-seed seed [--clear] [--data-dir ./data]
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use wcdb_api::logging;
use wcdb_common::config::{CliOverrides, Settings, TomlConfig};
use wcdb_common::db::{init_database, reset_schema, SqliteRepository};
use wcdb_common::seed::{seed_database, SeedData};

/// Schema and seed data management for the wcdb database
#[derive(Parser, Debug)]
#[command(name = "wcdb-seed")]
#[command(about = "Create the wcdb schema and load historical data")]
#[command(version)]
struct Args {
    /// Config file (default: ~/.config/wcdb/config.toml, then /etc/wcdb/config.toml)
    #[arg(short, long, env = "WCDB_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create missing tables and indexes
    Sync {
        /// Drop and recreate every table (destroys all data)
        #[arg(long)]
        force: bool,
    },

    /// Load winners.json and matches.json
    Seed {
        /// Delete all rows before seeding
        #[arg(long)]
        clear: bool,

        /// Directory holding the seed files
        #[arg(long, value_name = "DIR", default_value = "./data")]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (toml_config, config_source) = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load config file")?;
    let settings = Settings::resolve(
        CliOverrides {
            database_path: args.database,
            ..Default::default()
        },
        &toml_config,
    )
    .context("Invalid configuration")?;

    logging::init_tracing(&settings.log_level);
    info!("wcdb-seed {}", logging::build_info());
    config_source.log();
    info!("Database: {}", settings.database_path.display());

    // Creates the schema when missing
    let pool = init_database(&settings.database_path)
        .await
        .context("Failed to open database")?;

    match args.command {
        Command::Sync { force } => {
            if force {
                warn!("Dropping and recreating all tables");
                reset_schema(&pool).await.context("Schema reset failed")?;
            }
            info!("Schema synchronized");
        }
        Command::Seed { clear, data_dir } => {
            info!("Reading seed data from {}", data_dir.display());
            let data = SeedData::load(&data_dir).context("Failed to load seed data")?;

            let repository = SqliteRepository::new(pool.clone());
            let report = seed_database(&repository, &data, clear)
                .await
                .context("Seeding failed")?;

            info!(
                "Seed complete: {} winners and {} matches inserted ({} winners, {} matches total)",
                report.winners_inserted,
                report.matches_inserted,
                report.total_winners,
                report.total_matches
            );
        }
    }

    pool.close().await;
    Ok(())
}
