use serde::{Deserialize, Serialize};
use tickerbar_market_data::Symbol;

use crate::constants::{DEFAULT_TICKERS, MAX_TICKERS};

/// Ordered, duplicate-free list of at most [`MAX_TICKERS`] symbols.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickerList {
    symbols: Vec<Symbol>,
}

impl TickerList {
    /// The list shown on first launch.
    pub fn default_list() -> Self {
        Self::from_symbols(DEFAULT_TICKERS.iter().filter_map(|s| Symbol::parse(s)))
    }

    /// Builds a list keeping the first occurrence of each symbol, silently
    /// dropping everything past the limit.
    pub fn from_symbols<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        let mut unique: Vec<Symbol> = Vec::with_capacity(MAX_TICKERS);
        for symbol in symbols {
            if unique.len() == MAX_TICKERS {
                break;
            }
            if !unique.contains(&symbol) {
                unique.push(symbol);
            }
        }
        Self { symbols: unique }
    }

    /// Parses free-form text: one symbol per line or comma separated.
    pub fn parse_text(text: &str) -> Self {
        Self::from_symbols(
            text.split(|c| matches!(c, ',' | '\n' | '\r'))
                .filter_map(Symbol::parse),
        )
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.symbols.len() >= MAX_TICKERS
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn position(&self, symbol: &Symbol) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    /// Symbol at `index` modulo the list length.
    pub fn get_wrapped(&self, index: usize) -> Option<&Symbol> {
        if self.symbols.is_empty() {
            None
        } else {
            self.symbols.get(index % self.symbols.len())
        }
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.symbols.iter().map(|s| s.to_string()).collect()
    }

    pub(crate) fn with_pushed(&self, symbol: Symbol) -> Self {
        let mut symbols = self.symbols.clone();
        symbols.push(symbol);
        Self { symbols }
    }

    pub(crate) fn without(&self, symbol: &Symbol) -> Self {
        Self {
            symbols: self
                .symbols
                .iter()
                .filter(|s| *s != symbol)
                .cloned()
                .collect(),
        }
    }
}
