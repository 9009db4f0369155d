use serde::{Deserialize, Serialize};

use super::symbol::Symbol;

/// Normalized quote for one symbol.
///
/// `change` and `percent_change` are fixed at construction from whichever
/// previous close the provider resolved; they are never recomputed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// The alias the caller asked for, not the provider query key
    pub symbol: Symbol,

    /// Latest regular-market price
    pub price: f64,

    /// `price - previous_close`
    pub change: f64,

    /// `change / previous_close * 100`, or `0.0` when the previous close is zero
    pub percent_change: f64,
}

impl Quote {
    /// Build a quote from a price and an already-resolved previous close.
    pub fn from_previous_close(symbol: Symbol, price: f64, previous_close: f64) -> Self {
        let change = price - previous_close;
        let percent_change = if previous_close != 0.0 {
            change / previous_close * 100.0
        } else {
            0.0
        };

        Self {
            symbol,
            price,
            change,
            percent_change,
        }
    }

    /// Non-negative change counts as up.
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}
