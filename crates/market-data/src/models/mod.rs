//! Market data models
//!
//! This module contains the core data types for quote fetching:
//! - `symbol` - Normalized ticker alias (Symbol)
//! - `quote` - Normalized quote with derived change fields (Quote)

mod quote;
mod symbol;

pub use quote::Quote;
pub use symbol::{InvalidSymbolError, Symbol};
