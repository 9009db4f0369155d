use std::sync::Arc;

use log::{debug, warn};
use tickerbar_market_data::Symbol;

use super::TickerList;
use crate::constants::{MAX_TICKERS, SAVED_TICKERS_KEY};
use crate::errors::{Error, Result};
use crate::settings::SettingsRepositoryTrait;

/// Owns the ticker list and writes every change through the settings port.
///
/// A mutation is committed in memory only after the write succeeded, so a
/// failing store leaves the list exactly as it was.
pub struct TickerListStore {
    list: TickerList,
    settings: Arc<dyn SettingsRepositoryTrait>,
}

impl TickerListStore {
    /// Restores the persisted list, falling back to the defaults when nothing
    /// was saved yet or the saved value is unreadable.
    pub fn load(settings: Arc<dyn SettingsRepositoryTrait>) -> Self {
        let list = match settings.get_string_list(SAVED_TICKERS_KEY) {
            Ok(Some(saved)) => {
                TickerList::from_symbols(saved.iter().filter_map(|s| Symbol::parse(s)))
            }
            Ok(None) => {
                debug!("No saved tickers, using defaults");
                TickerList::default_list()
            }
            Err(e) => {
                warn!("Failed to read saved tickers, using defaults: {}", e);
                TickerList::default_list()
            }
        };
        Self { list, settings }
    }

    pub fn list(&self) -> &TickerList {
        &self.list
    }

    /// Appends `raw` to the list.
    ///
    /// Returns `Ok(None)` when the input is blank or already present, and the
    /// normalized symbol when the list changed.
    pub async fn add(&mut self, raw: &str) -> Result<Option<Symbol>> {
        if self.list.is_full() {
            return Err(Error::LimitExceeded { limit: MAX_TICKERS });
        }
        let Some(symbol) = Symbol::parse(raw) else {
            return Ok(None);
        };
        if self.list.contains(&symbol) {
            return Ok(None);
        }
        self.commit(self.list.with_pushed(symbol.clone())).await?;
        Ok(Some(symbol))
    }

    /// Removes `symbol`. Returns whether it was present.
    pub async fn remove(&mut self, symbol: &Symbol) -> Result<bool> {
        if !self.list.contains(symbol) {
            return Ok(false);
        }
        self.commit(self.list.without(symbol)).await?;
        Ok(true)
    }

    /// Replaces the whole list with the symbols parsed from `text`.
    ///
    /// Text with no symbols in it keeps the current list and returns `false`.
    pub async fn replace_all(&mut self, text: &str) -> Result<bool> {
        let parsed = TickerList::parse_text(text);
        if parsed.is_empty() {
            debug!("Bulk edit contained no symbols, keeping current list");
            return Ok(false);
        }
        self.commit(parsed).await?;
        Ok(true)
    }

    /// Restores the default list.
    pub async fn reset(&mut self) -> Result<()> {
        self.commit(TickerList::default_list()).await
    }

    async fn commit(&mut self, next: TickerList) -> Result<()> {
        self.settings
            .set_string_list(SAVED_TICKERS_KEY, &next.to_strings())
            .await?;
        self.list = next;
        Ok(())
    }
}
