use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tickerbar_market_data::{QuoteSource, Symbol};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use super::{EngineConfig, TickerCommand, TickerHandle, TickerSnapshot};
use crate::constants::{LOADING_TEXT, MARQUEE_MODE_KEY};
use crate::display::{DisplayEngine, DisplayMode, RenderOutput, RenderSink};
use crate::errors::Result;
use crate::quotes::QuoteCache;
use crate::refresh::{FetchBatch, RefreshScheduler, RefreshTrigger};
use crate::settings::SettingsRepositoryTrait;
use crate::tickers::TickerListStore;

/// Capacity of the command channel.
const COMMAND_BUFFER: usize = 32;

/// Shortest timer period; `interval_at` rejects a zero period.
const MIN_TIMER_PERIOD: Duration = Duration::from_millis(1);

/// Single owner of the ticker list, quote cache and display state.
///
/// Commands, timers and fetch results are all handled on one task, so no two
/// of them ever touch the state at the same time.
pub struct TickerEngine {
    config: EngineConfig,
    store: TickerListStore,
    cache: QuoteCache,
    display: DisplayEngine,
    scheduler: RefreshScheduler,
    settings: Arc<dyn SettingsRepositoryTrait>,
    sink: Arc<dyn RenderSink>,
}

impl TickerEngine {
    /// Restores the saved list and display mode. Nothing runs until
    /// [`spawn`](Self::spawn).
    pub fn new(
        config: EngineConfig,
        settings: Arc<dyn SettingsRepositoryTrait>,
        source: Arc<dyn QuoteSource>,
        sink: Arc<dyn RenderSink>,
    ) -> Self {
        let store = TickerListStore::load(settings.clone());
        let is_marquee = match settings.get_bool(MARQUEE_MODE_KEY) {
            Ok(value) => value.unwrap_or(false),
            Err(e) => {
                warn!("Failed to read display mode, using rotate: {}", e);
                false
            }
        };
        let display = DisplayEngine::new(
            DisplayMode::from_marquee_flag(is_marquee),
            config.marquee_width,
        );

        Self {
            config,
            store,
            cache: QuoteCache::new(),
            display,
            scheduler: RefreshScheduler::new(source),
            settings,
            sink,
        }
    }

    /// Starts the engine on the current tokio runtime.
    pub fn spawn(self) -> TickerHandle {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        tokio::spawn(self.run(rx));
        TickerHandle::new(tx)
    }

    async fn run(mut self, mut rx: mpsc::Receiver<TickerCommand>) {
        info!(
            "Ticker engine started with {} symbol(s) in {:?} mode",
            self.store.list().len(),
            self.display.mode()
        );

        self.sink.render(&RenderOutput::plain(LOADING_TEXT));
        self.scheduler
            .start_cycle(self.store.list(), RefreshTrigger::Startup);
        if self.display.mode().is_marquee() {
            self.display
                .set_mode(DisplayMode::Marquee, self.store.list(), &self.cache);
        }
        if self.store.list().is_empty() {
            let frame = self.display.render_current(self.store.list(), &self.cache);
            self.sink.render(&frame);
        }

        let mut refresh_timer = periodic(self.config.refresh_interval);
        let mut display_timer = periodic(self.display_period());

        loop {
            tokio::select! {
                command = rx.recv() => match command {
                    Some(command) => {
                        if self.handle_command(command, &mut display_timer).await.is_break() {
                            break;
                        }
                    }
                    None => {
                        debug!("All ticker handles dropped");
                        break;
                    }
                },
                _ = refresh_timer.tick() => {
                    self.scheduler
                        .start_cycle(self.store.list(), RefreshTrigger::Periodic);
                }
                _ = display_timer.tick() => {
                    let frame = self.display.tick(self.store.list(), &self.cache);
                    self.sink.render(&frame);
                }
                Some(batch) = self.scheduler.next_batch(), if self.scheduler.has_pending() => {
                    self.apply_batch(batch);
                }
            }
        }

        self.scheduler.shutdown();
        info!("Ticker engine stopped");
    }

    async fn handle_command(
        &mut self,
        command: TickerCommand,
        display_timer: &mut Interval,
    ) -> ControlFlow<()> {
        match command {
            TickerCommand::ToggleMarquee { reply } => {
                let mode = self.toggle_marquee().await;
                *display_timer = periodic(self.display_period());
                let _ = reply.send(mode);
            }
            TickerCommand::AddTicker { symbol, reply } => {
                let _ = reply.send(self.add_ticker(&symbol).await);
            }
            TickerCommand::RemoveCurrentTicker { reply } => {
                let _ = reply.send(self.remove_current_ticker().await);
            }
            TickerCommand::ManageTickers { text, reply } => {
                let _ = reply.send(self.manage_tickers(&text).await);
            }
            TickerCommand::ResetTickers { reply } => {
                let _ = reply.send(self.reset_tickers().await);
            }
            TickerCommand::RefreshNow => {
                self.scheduler
                    .start_cycle(self.store.list(), RefreshTrigger::Manual);
            }
            TickerCommand::SelectTicker { index, reply } => {
                let frame = self.display.select(index, self.store.list(), &self.cache);
                let selected = frame.is_some();
                self.render(frame);
                let _ = reply.send(selected);
            }
            TickerCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            TickerCommand::Quit { reply } => {
                self.scheduler.shutdown();
                let _ = reply.send(());
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    async fn toggle_marquee(&mut self) -> DisplayMode {
        let mode = self.display.mode().toggled();
        if let Err(e) = self
            .settings
            .set_bool(MARQUEE_MODE_KEY, mode.is_marquee())
            .await
        {
            warn!("Failed to save display mode: {}", e);
        }
        let frame = self.display.set_mode(mode, self.store.list(), &self.cache);
        self.sink.render(&frame);
        info!("Display mode switched to {:?}", mode);
        mode
    }

    async fn add_ticker(&mut self, raw: &str) -> Result<bool> {
        let Some(symbol) = self.store.add(raw).await? else {
            return Ok(false);
        };
        info!("Added ticker {}", symbol);

        let list = self.store.list();
        let mut frame = self.display.on_tickers_changed(list, &self.cache);
        if let Some(index) = list.position(&symbol) {
            if let Some(selected) = self.display.select(index, list, &self.cache) {
                frame = Some(selected);
            }
        }
        self.render(frame);

        self.scheduler
            .start_cycle(self.store.list(), RefreshTrigger::TickersChanged);
        self.scheduler.fetch_one(symbol);
        Ok(true)
    }

    async fn remove_current_ticker(&mut self) -> Result<Option<Symbol>> {
        let list = self.store.list();
        let Some(symbol) = self
            .display
            .selected_index(list)
            .and_then(|index| list.symbols().get(index).cloned())
        else {
            return Ok(None);
        };

        self.store.remove(&symbol).await?;
        self.cache.remove(&symbol);
        info!("Removed ticker {}", symbol);

        let frame = self.display.on_tickers_changed(self.store.list(), &self.cache);
        self.render(frame);
        Ok(Some(symbol))
    }

    async fn manage_tickers(&mut self, text: &str) -> Result<bool> {
        if !self.store.replace_all(text).await? {
            return Ok(false);
        }
        info!("Ticker list replaced: {:?}", self.store.list().to_strings());
        self.after_list_replaced();
        Ok(true)
    }

    async fn reset_tickers(&mut self) -> Result<()> {
        self.store.reset().await?;
        info!("Ticker list reset to defaults");
        self.after_list_replaced();
        Ok(())
    }

    fn after_list_replaced(&mut self) {
        let evicted = self.cache.retain_listed(self.store.list());
        if evicted > 0 {
            debug!("Evicted {} cached quote(s)", evicted);
        }
        let frame = self.display.on_tickers_changed(self.store.list(), &self.cache);
        self.render(frame);
        self.scheduler
            .start_cycle(self.store.list(), RefreshTrigger::TickersChanged);
    }

    fn apply_batch(&mut self, batch: FetchBatch) {
        let trigger = batch.trigger;
        let summary = batch.merge_into(&mut self.cache, self.store.list());
        debug!("Merged {:?} batch: {:?}", trigger, summary);

        let frame = self.display.on_data_changed(self.store.list(), &self.cache);
        self.render(frame);
    }

    fn snapshot(&self) -> TickerSnapshot {
        let list = self.store.list();
        TickerSnapshot {
            symbols: list.symbols().to_vec(),
            quotes: self.cache.quotes_for(list),
            selected_index: self.display.selected_index(list),
            mode: self.display.mode(),
        }
    }

    fn render(&self, frame: Option<RenderOutput>) {
        if let Some(frame) = frame {
            self.sink.render(&frame);
        }
    }

    fn display_period(&self) -> Duration {
        match self.display.mode() {
            DisplayMode::Rotate => self.config.rotate_interval,
            DisplayMode::Marquee => self.config.marquee_interval,
        }
    }
}

/// Interval whose first tick is one full period from now.
fn periodic(period: Duration) -> Interval {
    if period < MIN_TIMER_PERIOD {
        warn!("Timer period {:?} too short, using {:?}", period, MIN_TIMER_PERIOD);
    }
    let period = period.max(MIN_TIMER_PERIOD);
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
