use tickerbar_market_data::Symbol;
use tokio::sync::{mpsc, oneshot};

use super::{TickerCommand, TickerSnapshot};
use crate::display::DisplayMode;
use crate::errors::{Error, Result};

/// Cloneable front door to a running engine.
///
/// Every method fails with [`Error::EngineStopped`] once the engine task has
/// exited.
#[derive(Clone, Debug)]
pub struct TickerHandle {
    tx: mpsc::Sender<TickerCommand>,
}

impl TickerHandle {
    pub(crate) fn new(tx: mpsc::Sender<TickerCommand>) -> Self {
        Self { tx }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> TickerCommand,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(make(reply_tx))
            .await
            .map_err(|_| Error::EngineStopped)?;
        reply_rx.await.map_err(|_| Error::EngineStopped)
    }

    /// Flips between rotate and marquee mode; returns the new mode.
    pub async fn toggle_marquee(&self) -> Result<DisplayMode> {
        self.request(|reply| TickerCommand::ToggleMarquee { reply })
            .await
    }

    /// Adds a symbol. `Ok(false)` when it was blank or already listed.
    pub async fn add_ticker(&self, symbol: &str) -> Result<bool> {
        let symbol = symbol.to_string();
        self.request(|reply| TickerCommand::AddTicker { symbol, reply })
            .await?
    }

    /// Removes the symbol rotate mode is pointing at, if any.
    pub async fn remove_current_ticker(&self) -> Result<Option<Symbol>> {
        self.request(|reply| TickerCommand::RemoveCurrentTicker { reply })
            .await?
    }

    /// Replaces the list from free-form text. `Ok(false)` when the text held
    /// no symbols and the list was kept.
    pub async fn manage_tickers(&self, text: &str) -> Result<bool> {
        let text = text.to_string();
        self.request(|reply| TickerCommand::ManageTickers { text, reply })
            .await?
    }

    pub async fn reset_tickers(&self) -> Result<()> {
        self.request(|reply| TickerCommand::ResetTickers { reply })
            .await?
    }

    /// Starts a refresh of every symbol without waiting for it.
    pub async fn refresh_now(&self) -> Result<()> {
        self.tx
            .send(TickerCommand::RefreshNow)
            .await
            .map_err(|_| Error::EngineStopped)
    }

    /// Shows the symbol at `index`. `Ok(false)` in marquee mode or when the
    /// index is out of range.
    pub async fn select_ticker(&self, index: usize) -> Result<bool> {
        self.request(|reply| TickerCommand::SelectTicker { index, reply })
            .await
    }

    pub async fn snapshot(&self) -> Result<TickerSnapshot> {
        self.request(|reply| TickerCommand::Snapshot { reply })
            .await
    }

    /// Stops the engine and waits until it acknowledged.
    pub async fn quit(&self) -> Result<()> {
        self.request(|reply| TickerCommand::Quit { reply }).await
    }
}
