//! The ticker engine task and its handle.

mod actor;
mod commands;
mod config;
mod handle;

pub use actor::TickerEngine;
pub use commands::{TickerCommand, TickerSnapshot};
pub use config::EngineConfig;
pub use handle::TickerHandle;
