//! Offline demo provider.
//!
//! Produces random prices after a short simulated latency so the ticker can
//! be exercised without network access.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{Quote, Symbol};
use crate::provider::QuoteSource;

const DEFAULT_LATENCY: Duration = Duration::from_millis(200);

/// Random demo quotes. Every fetch is independent of the previous one.
pub struct DemoProvider {
    latency: Duration,
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

impl DemoProvider {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl QuoteSource for DemoProvider {
    fn id(&self) -> &'static str {
        "DEMO"
    }

    async fn fetch(&self, symbol: &Symbol) -> Result<Quote, MarketDataError> {
        tokio::time::sleep(self.latency).await;

        let (price, change) = {
            let mut rng = rand::thread_rng();
            (rng.gen_range(100.0..5000.0), rng.gen_range(-50.0..50.0))
        };

        debug!("Demo quote for {}: {:.2} ({:+.2})", symbol, price, change);
        Ok(Quote::from_previous_close(symbol.clone(), price, price - change))
    }
}
