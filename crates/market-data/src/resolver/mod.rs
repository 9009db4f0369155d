//! Symbol resolution from user-facing aliases to provider query keys.
//!
//! The mapping is one-directional: quotes are always reported under the
//! alias, the query key never leaves the provider.

mod symbol_map;

pub use symbol_map::{yahoo_query_key, YAHOO_INDEX_ALIASES};
