//! # wcdb Common Library
//!
//! Shared code for the wcdb service and tools including:
//! - Winner and match records with their data invariants
//! - The `Repository` abstraction plus SQLite and in-memory stores
//! - Database initialization and schema sync
//! - Configuration loading
//! - Seed data loading

pub mod config;
pub mod db;
pub mod error;
pub mod seed;

pub use db::models::{Match, Winner};
pub use db::repository::Repository;
pub use error::{Error, Result};

/// Last tournament year with real results. Winners at or before this year are historical.
pub const HISTORICAL_CUTOFF_YEAR: i32 = 2022;

/// First tournament year tracked by the database.
pub const FIRST_TOURNAMENT_YEAR: i32 = 1950;

/// Host country recorded for simulated winners.
pub const SIMULATED_HOST_COUNTRY: &str = "TBD";
