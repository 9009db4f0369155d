use serde::Serialize;
use tickerbar_market_data::{Quote, Symbol};
use tokio::sync::oneshot;

use crate::display::DisplayMode;
use crate::errors::Result;

/// Requests handled by the engine task, one at a time.
#[derive(Debug)]
pub enum TickerCommand {
    ToggleMarquee {
        reply: oneshot::Sender<DisplayMode>,
    },
    AddTicker {
        symbol: String,
        reply: oneshot::Sender<Result<bool>>,
    },
    RemoveCurrentTicker {
        reply: oneshot::Sender<Result<Option<Symbol>>>,
    },
    ManageTickers {
        text: String,
        reply: oneshot::Sender<Result<bool>>,
    },
    ResetTickers {
        reply: oneshot::Sender<Result<()>>,
    },
    RefreshNow,
    SelectTicker {
        index: usize,
        reply: oneshot::Sender<bool>,
    },
    Snapshot {
        reply: oneshot::Sender<TickerSnapshot>,
    },
    Quit {
        reply: oneshot::Sender<()>,
    },
}

/// Read-only view of the engine state, for building menus and listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSnapshot {
    pub symbols: Vec<Symbol>,
    /// Cached quotes in list order; uncached symbols are absent
    pub quotes: Vec<Quote>,
    pub selected_index: Option<usize>,
    pub mode: DisplayMode,
}

impl TickerSnapshot {
    pub fn quote_for(&self, symbol: &Symbol) -> Option<&Quote> {
        self.quotes.iter().find(|q| &q.symbol == symbol)
    }
}
