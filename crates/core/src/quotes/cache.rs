use std::collections::HashMap;

use tickerbar_market_data::{Quote, Symbol};

use crate::tickers::TickerList;

/// Last successful quote per symbol.
///
/// Entries never expire. A failed fetch simply never reaches the cache, so
/// the previous value (or its absence) stays in place. Each entry remembers
/// the refresh cycle it came from, and a quote from an older cycle never
/// replaces one from a newer cycle.
#[derive(Debug, Clone, Default)]
pub struct QuoteCache {
    quotes: HashMap<Symbol, CachedQuote>,
}

#[derive(Debug, Clone)]
struct CachedQuote {
    quote: Quote,
    cycle: u64,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `quote` fetched by refresh cycle `cycle`.
    ///
    /// Returns `false`, leaving the entry untouched, when the cached quote
    /// came from a later cycle.
    pub fn insert(&mut self, quote: Quote, cycle: u64) -> bool {
        if let Some(existing) = self.quotes.get(&quote.symbol) {
            if existing.cycle > cycle {
                return false;
            }
        }
        self.quotes
            .insert(quote.symbol.clone(), CachedQuote { quote, cycle });
        true
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&Quote> {
        self.quotes.get(symbol).map(|entry| &entry.quote)
    }

    pub fn remove(&mut self, symbol: &Symbol) -> Option<Quote> {
        self.quotes.remove(symbol).map(|entry| entry.quote)
    }

    /// Drops entries for symbols that left the list.
    pub fn retain_listed(&mut self, list: &TickerList) -> usize {
        let before = self.quotes.len();
        self.quotes.retain(|symbol, _| list.contains(symbol));
        before - self.quotes.len()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Cached quotes in list order, skipping uncached symbols.
    pub fn quotes_for(&self, list: &TickerList) -> Vec<Quote> {
        list.symbols()
            .iter()
            .filter_map(|symbol| self.get(symbol).cloned())
            .collect()
    }
}
