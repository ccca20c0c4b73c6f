//! Common error types for wcdb

use thiserror::Error;

/// Common result type for wcdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across wcdb crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record violates a data-model invariant
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insert rejected by a uniqueness constraint
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map a sqlx error to `Duplicate` when the store reports a uniqueness violation.
    pub fn from_insert(err: sqlx::Error, what: impl Into<String>) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Error::Duplicate(what.into())
            }
            _ => Error::Database(err),
        }
    }
}
