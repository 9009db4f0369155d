//! Shared collaborators for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tickerbar_market_data::{MarketDataError, Quote, QuoteSource, Symbol};

#[derive(Clone)]
enum Scripted {
    Price { price: f64, previous_close: f64 },
    NetworkFailure,
    ParseFailure,
}

/// Quote source answering from a scripted table.
///
/// Unscripted symbols fail with a parse error, like a provider that knows
/// nothing about them.
#[derive(Clone, Default)]
pub struct MockQuoteSource {
    script: Arc<Mutex<HashMap<String, Scripted>>>,
    calls: Arc<Mutex<Vec<String>>>,
    latency: Duration,
}

impl MockQuoteSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub fn set_price(&self, symbol: &str, price: f64, previous_close: f64) {
        self.script.lock().unwrap().insert(
            symbol.to_string(),
            Scripted::Price {
                price,
                previous_close,
            },
        );
    }

    pub fn fail_network(&self, symbol: &str) {
        self.script
            .lock()
            .unwrap()
            .insert(symbol.to_string(), Scripted::NetworkFailure);
    }

    pub fn fail_parse(&self, symbol: &str) {
        self.script
            .lock()
            .unwrap()
            .insert(symbol.to_string(), Scripted::ParseFailure);
    }

    pub fn fetch_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn fetched(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteSource for MockQuoteSource {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn fetch(&self, symbol: &Symbol) -> Result<Quote, MarketDataError> {
        self.calls.lock().unwrap().push(symbol.to_string());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let scripted = self.script.lock().unwrap().get(symbol.as_str()).cloned();
        match scripted {
            Some(Scripted::Price {
                price,
                previous_close,
            }) => Ok(Quote::from_previous_close(
                symbol.clone(),
                price,
                previous_close,
            )),
            Some(Scripted::NetworkFailure) => Err(MarketDataError::HttpStatus {
                provider: "MOCK".to_string(),
                status: 503,
            }),
            Some(Scripted::ParseFailure) | None => Err(MarketDataError::Parse {
                provider: "MOCK".to_string(),
                message: format!("no script for {}", symbol),
            }),
        }
    }
}
