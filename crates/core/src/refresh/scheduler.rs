use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use log::{debug, info, warn};
use tickerbar_market_data::{MarketDataError, Quote, QuoteSource, Symbol};
use tokio::task::JoinSet;

use crate::quotes::QuoteCache;
use crate::tickers::TickerList;

/// Why a fetch was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// First cycle after start-up
    Startup,
    /// The periodic refresh timer fired
    Periodic,
    /// The user asked for a refresh
    Manual,
    /// The list was replaced or reset
    TickersChanged,
    /// Immediate single-symbol fetch after an add
    Added,
}

/// Result of fetching one symbol.
#[derive(Debug)]
pub struct FetchOutcome {
    pub symbol: Symbol,
    pub result: Result<Quote, MarketDataError>,
}

/// Every outcome of one finished cycle (or one single-symbol fetch).
#[derive(Debug)]
pub struct FetchBatch {
    pub trigger: RefreshTrigger,
    /// Start order of the batch; later starts carry larger numbers.
    pub cycle: u64,
    pub outcomes: Vec<FetchOutcome>,
}

/// Counts produced by [`FetchBatch::merge_into`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeSummary {
    pub updated: usize,
    pub failed: usize,
    pub discarded: usize,
    /// Quotes older than the cached one, from a cycle that finished late.
    pub stale: usize,
}

impl FetchBatch {
    /// Writes successful quotes into `cache`.
    ///
    /// Failures are logged and dropped. Quotes for symbols that left the list
    /// while the fetch was in flight are discarded, and so are quotes that
    /// lost to a batch started later.
    pub fn merge_into(self, cache: &mut QuoteCache, list: &TickerList) -> MergeSummary {
        let mut summary = MergeSummary::default();
        for FetchOutcome { symbol, result } in self.outcomes {
            match result {
                Ok(quote) if list.contains(&symbol) => {
                    if cache.insert(quote, self.cycle) {
                        summary.updated += 1;
                    } else {
                        debug!("Keeping newer cached quote for {}", symbol);
                        summary.stale += 1;
                    }
                }
                Ok(_) => {
                    debug!("Discarding quote for {} which is no longer listed", symbol);
                    summary.discarded += 1;
                }
                Err(e) => {
                    warn!("Error fetching {} ({:?}): {}", symbol, e.kind(), e);
                    summary.failed += 1;
                }
            }
        }
        summary
    }
}

/// Runs fetches off the owning task and hands back finished batches.
///
/// The owner polls [`RefreshScheduler::next_batch`] from its select loop, so
/// results are merged on the same task that owns the cache.
pub struct RefreshScheduler {
    source: Arc<dyn QuoteSource>,
    tasks: JoinSet<FetchBatch>,
    last_cycle: u64,
}

impl RefreshScheduler {
    pub fn new(source: Arc<dyn QuoteSource>) -> Self {
        Self {
            source,
            tasks: JoinSet::new(),
            last_cycle: 0,
        }
    }

    fn next_cycle(&mut self) -> u64 {
        self.last_cycle += 1;
        self.last_cycle
    }

    /// Fetches every symbol of `list` concurrently as one cycle.
    pub fn start_cycle(&mut self, list: &TickerList, trigger: RefreshTrigger) {
        let symbols: Vec<Symbol> = list.symbols().to_vec();
        if symbols.is_empty() {
            debug!("Refresh ({:?}) skipped: no tickers", trigger);
            return;
        }

        let cycle = self.next_cycle();
        let source = self.source.clone();
        debug!(
            "Starting {:?} refresh of {} symbol(s) via {}",
            trigger,
            symbols.len(),
            source.id()
        );
        self.tasks.spawn(async move {
            let started = Instant::now();
            let outcomes = join_all(symbols.into_iter().map(|symbol| {
                let source = source.clone();
                async move {
                    let result = source.fetch(&symbol).await;
                    FetchOutcome { symbol, result }
                }
            }))
            .await;

            let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
            info!(
                "Refresh ({:?}) finished in {:?}: {} ok, {} failed",
                trigger,
                started.elapsed(),
                outcomes.len() - failed,
                failed
            );
            FetchBatch {
                trigger,
                cycle,
                outcomes,
            }
        });
    }

    /// Fetches a single symbol outside the regular cycle.
    pub fn fetch_one(&mut self, symbol: Symbol) {
        let cycle = self.next_cycle();
        let source = self.source.clone();
        self.tasks.spawn(async move {
            let result = source.fetch(&symbol).await;
            FetchBatch {
                trigger: RefreshTrigger::Added,
                cycle,
                outcomes: vec![FetchOutcome { symbol, result }],
            }
        });
    }

    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Waits for the next finished batch. Returns `None` once nothing is in
    /// flight. Cancel safe.
    pub async fn next_batch(&mut self) -> Option<FetchBatch> {
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(batch) => return Some(batch),
                Err(e) if e.is_cancelled() => continue,
                Err(e) => warn!("Refresh task failed: {}", e),
            }
        }
        None
    }

    /// Aborts every in-flight fetch.
    pub fn shutdown(&mut self) {
        if !self.tasks.is_empty() {
            debug!("Aborting {} in-flight refresh task(s)", self.tasks.len());
        }
        self.tasks.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockQuoteSource;

    fn sym(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_cycle_continues_past_failures() {
        let source = Arc::new(MockQuoteSource::new());
        source.set_price("AAPL", 105.0, 100.0);
        source.set_price("MSFT", 300.0, 310.0);
        source.fail_network("BAD");

        let mut scheduler = RefreshScheduler::new(source.clone());
        let list = TickerList::parse_text("AAPL,BAD,MSFT");
        scheduler.start_cycle(&list, RefreshTrigger::Manual);
        assert!(scheduler.has_pending());

        let batch = scheduler.next_batch().await.unwrap();
        assert_eq!(batch.trigger, RefreshTrigger::Manual);
        assert_eq!(batch.outcomes.len(), 3);

        let mut cache = QuoteCache::new();
        let summary = batch.merge_into(&mut cache, &list);
        assert_eq!(
            summary,
            MergeSummary {
                updated: 2,
                failed: 1,
                discarded: 0,
                stale: 0
            }
        );
        assert_eq!(cache.get(&sym("AAPL")).map(|q| q.change), Some(5.0));
        assert!(cache.get(&sym("BAD")).is_none());
        assert!(!scheduler.has_pending());
        assert!(scheduler.next_batch().await.is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_cache_value() {
        let source = Arc::new(MockQuoteSource::new());
        source.fail_parse("AAPL");
        let list = TickerList::parse_text("AAPL");

        let mut cache = QuoteCache::new();
        cache.insert(Quote::from_previous_close(sym("AAPL"), 99.0, 98.0), 0);

        let mut scheduler = RefreshScheduler::new(source);
        scheduler.start_cycle(&list, RefreshTrigger::Periodic);
        let batch = scheduler.next_batch().await.unwrap();
        batch.merge_into(&mut cache, &list);

        assert_eq!(cache.get(&sym("AAPL")).map(|q| q.price), Some(99.0));
    }

    #[tokio::test]
    async fn test_late_result_for_removed_symbol_is_discarded() {
        let source = Arc::new(MockQuoteSource::new());
        source.set_price("TSLA", 200.0, 190.0);

        let mut scheduler = RefreshScheduler::new(source);
        scheduler.fetch_one(sym("TSLA"));
        let batch = scheduler.next_batch().await.unwrap();
        assert_eq!(batch.trigger, RefreshTrigger::Added);

        let mut cache = QuoteCache::new();
        let summary = batch.merge_into(&mut cache, &TickerList::parse_text("AAPL"));
        assert_eq!(summary.discarded, 1);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_empty_list_starts_nothing() {
        let source = Arc::new(MockQuoteSource::new());
        let mut scheduler = RefreshScheduler::new(source.clone());
        scheduler.start_cycle(&TickerList::default(), RefreshTrigger::Periodic);
        assert!(!scheduler.has_pending());
        assert_eq!(source.fetch_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_aborts_in_flight_fetches() {
        let source = Arc::new(MockQuoteSource::with_latency(std::time::Duration::from_secs(30)));
        source.set_price("AAPL", 1.0, 1.0);

        let mut scheduler = RefreshScheduler::new(source);
        scheduler.start_cycle(&TickerList::parse_text("AAPL"), RefreshTrigger::Manual);
        scheduler.shutdown();
        assert!(scheduler.next_batch().await.is_none());
    }

    #[tokio::test]
    async fn test_older_cycle_finishing_late_keeps_newer_quote() {
        let source = Arc::new(MockQuoteSource::new());
        source.set_price("AAPL", 100.0, 99.0);
        let list = TickerList::parse_text("AAPL");

        let mut scheduler = RefreshScheduler::new(source.clone());
        scheduler.start_cycle(&list, RefreshTrigger::Periodic);
        let older = scheduler.next_batch().await.unwrap();

        source.set_price("AAPL", 110.0, 99.0);
        scheduler.start_cycle(&list, RefreshTrigger::Manual);
        let newer = scheduler.next_batch().await.unwrap();
        assert!(newer.cycle > older.cycle);

        let mut cache = QuoteCache::new();
        assert_eq!(newer.merge_into(&mut cache, &list).updated, 1);
        let summary = older.merge_into(&mut cache, &list);
        assert_eq!(summary.stale, 1);
        assert_eq!(summary.updated, 0);
        assert_eq!(cache.get(&sym("AAPL")).map(|q| q.price), Some(110.0));
    }
}
