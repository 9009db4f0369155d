//! Quote source abstractions and implementations.
//!
//! This module contains:
//! - The `QuoteSource` trait that all providers implement
//! - The Yahoo Finance chart provider
//! - An offline demo provider
//!
//! Providers receive the user-facing [`Symbol`](crate::Symbol); mapping it to a
//! provider query key is the provider's own business (see [`crate::resolver`]).

mod traits;

pub mod demo;
pub mod yahoo;

pub use traits::QuoteSource;
