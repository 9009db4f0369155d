//! Error types for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The error enum for all quote fetches
//! - [`FetchErrorKind`]: Network vs. parse classification

mod kind;

pub use kind::FetchErrorKind;

use thiserror::Error;

/// Errors that can occur while fetching a quote.
///
/// Each variant is classified into a [`FetchErrorKind`] via
/// [`kind`](Self::kind).
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The request URL could not be built for this symbol.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with something other than 200 OK.
    #[error("Unexpected HTTP status {status} from {provider}")]
    HttpStatus {
        /// The provider that answered
        provider: String,
        /// The HTTP status code received
        status: u16,
    },

    /// The payload could not be decoded into the expected shape.
    #[error("Failed to parse {provider} response: {message}")]
    Parse {
        /// The provider whose payload failed to decode
        provider: String,
        /// Decoder message
        message: String,
    },

    /// The payload decoded but carried no result entry.
    #[error("No result returned for {0}")]
    NoResult(String),
}

impl MarketDataError {
    /// Returns whether this is a network-class or parse-class failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use tickerbar_market_data::errors::{FetchErrorKind, MarketDataError};
    ///
    /// let error = MarketDataError::HttpStatus { provider: "YAHOO".to_string(), status: 404 };
    /// assert_eq!(error.kind(), FetchErrorKind::Network);
    ///
    /// let error = MarketDataError::NoResult("AAPL".to_string());
    /// assert_eq!(error.kind(), FetchErrorKind::Parse);
    /// ```
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::InvalidUrl(_) | Self::Network(_) | Self::HttpStatus { .. } => {
                FetchErrorKind::Network
            }
            Self::Parse { .. } | Self::NoResult(_) => FetchErrorKind::Parse,
        }
    }
}
