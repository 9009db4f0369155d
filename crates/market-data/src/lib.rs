//! Tickerbar Market Data Crate
//!
//! This crate fetches and normalizes single-symbol quotes for the status-bar
//! ticker. It knows nothing about ticker lists, caches or timers.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |     Symbol       | --> |  Symbol mapping  |  (alias -> provider query key)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   QuoteSource    |  (Yahoo chart, demo)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  Previous close  |  (fallback chain)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |      Quote       |  (price, change, percent)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Symbol`] - Normalized (trimmed, uppercase) user-facing ticker alias
//! - [`Quote`] - Price with change and percent change against the resolved previous close
//! - [`QuoteSource`] - Trait implemented by every upstream provider
//! - [`MarketDataError`] - Fetch failures, classified by [`FetchErrorKind`]

pub mod errors;
pub mod models;
pub mod provider;
pub mod resolver;

pub use errors::{FetchErrorKind, MarketDataError};
pub use models::{InvalidSymbolError, Quote, Symbol};
pub use provider::demo::DemoProvider;
pub use provider::yahoo::{YahooProvider, YAHOO_BASE_URL};
pub use provider::QuoteSource;
pub use resolver::yahoo_query_key;
