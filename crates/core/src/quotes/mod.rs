//! In-memory quote storage, keyed by the user-facing symbol.

mod cache;

pub use cache::QuoteCache;
