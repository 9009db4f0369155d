//! Core error types for the tickerbar engine.
//!
//! Storage-specific errors (Diesel, r2d2, SQLite) are converted to
//! [`DatabaseError`] by the storage layer so this crate stays
//! database-agnostic.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
///
/// Per-symbol fetch failures never show up here: they are logged at the
/// refresh boundary and dropped.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Ticker limit reached: at most {limit} tickers")]
    LimitExceeded { limit: usize },

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Invalid value for setting '{key}': {message}")]
    InvalidSettingValue { key: String, message: String },

    #[error("Ticker engine is not running")]
    EngineStopped,
}

/// Database-agnostic error type for storage operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// Requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}
