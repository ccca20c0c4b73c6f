//! Database initialization
//!
//! Opens (or creates) the SQLite database and makes sure the `winners` and
//! `matches` tables exist. Table creation is idempotent and runs on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::{info, warn};

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Private in-memory database with the full schema
///
/// Limited to one connection: every SQLite `:memory:` connection is its own database.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    create_schema(&pool).await?;
    Ok(pool)
}

/// Create all tables and indexes (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_winners_table(pool).await?;
    create_matches_table(pool).await?;
    Ok(())
}

/// Drop and recreate all tables. Destroys every stored row.
pub async fn reset_schema(pool: &SqlitePool) -> Result<()> {
    warn!("Dropping winners and matches tables");

    sqlx::query("DROP TABLE IF EXISTS matches")
        .execute(pool)
        .await?;
    sqlx::query("DROP TABLE IF EXISTS winners")
        .execute(pool)
        .await?;

    create_schema(pool).await
}

async fn create_winners_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS winners (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            year INTEGER NOT NULL UNIQUE CHECK (year >= 1950),
            winner TEXT NOT NULL CHECK (winner <> ''),
            host_country TEXT NOT NULL CHECK (host_country <> ''),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_matches_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS matches (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            year INTEGER NOT NULL CHECK (year >= 1950),
            stage TEXT NOT NULL CHECK (stage <> ''),
            date TEXT NOT NULL,
            team1 TEXT NOT NULL CHECK (team1 <> ''),
            team2 TEXT NOT NULL CHECK (team2 <> ''),
            team1_key TEXT NOT NULL,
            team2_key TEXT NOT NULL,
            score1 INTEGER NOT NULL CHECK (score1 >= 0),
            score2 INTEGER NOT NULL CHECK (score2 >= 0),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_matches_team1_key ON matches(team1_key)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_matches_team2_key ON matches(team2_key)")
        .execute(pool)
        .await?;

    // Natural key used by seeding to skip matches that are already stored
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_matches_natural_key
        ON matches(year, date, team1, team2)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
