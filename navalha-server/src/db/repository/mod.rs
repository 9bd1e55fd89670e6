//! Repository Module
//!
//! Module-level async CRUD functions over the SQLite pools. Handlers
//! convert dates to milli ranges before calling in; repositories never
//! parse wall-clock strings themselves.
//!
//! Functions that participate in write transactions take
//! `impl SqliteExecutor<'_>` so the same query runs against a pool or
//! inside a transaction; plain CRUD takes `&SqlitePool`.

pub mod appointment;
pub mod blocked_time;
pub mod plan;
pub mod service;
pub mod shop;
pub mod subscription;
pub mod user;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::Duplicate(db_err.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
