//! SQLite storage implementation for Tickerbar.
//!
//! This crate provides the persistence side of the settings port using Diesel
//! ORM with SQLite:
//! - Database connection pooling and management
//! - Diesel migrations
//! - `SettingsRepositoryTrait` implementation over the `app_settings` table
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies
//! exist. `core` is database-agnostic and works with traits.
//!
//! ```text
//!          core (engine)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod settings;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use settings::SettingsRepository;

// Re-export from tickerbar-core for convenience
pub use tickerbar_core::errors::{DatabaseError, Error, Result};
