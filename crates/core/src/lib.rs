//! Tickerbar Core - ticker list, quote cache, refresh and display engine.
//!
//! This crate owns the status-line state and drives it from timers and user
//! commands. It is storage-agnostic: persistence goes through
//! [`settings::SettingsRepositoryTrait`], implemented by the
//! `storage-sqlite` crate, and quotes come from any
//! [`tickerbar_market_data::QuoteSource`].

pub mod constants;
pub mod display;
pub mod engine;
pub mod errors;
pub mod quotes;
pub mod refresh;
pub mod settings;
pub mod tickers;

#[cfg(test)]
mod test_support;

pub use display::{DisplayMode, RenderOutput, RenderSink};
pub use engine::{EngineConfig, TickerEngine, TickerHandle, TickerSnapshot};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
