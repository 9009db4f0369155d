//! Yahoo Finance chart API response models.
//!
//! Only the fields the ticker reads are modelled; everything else in the
//! payload is ignored by serde.

use serde::Deserialize;

/// Top-level wrapper for `/v8/finance/chart/{symbol}`
#[derive(Debug, Deserialize)]
pub struct YahooChartResponse {
    pub chart: YahooChart,
}

/// Chart container. `result` is null when Yahoo reports an error.
#[derive(Debug, Deserialize)]
pub struct YahooChart {
    #[serde(default)]
    pub result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    pub error: Option<YahooChartError>,
}

/// Error object Yahoo embeds next to a null result
#[derive(Debug, Deserialize)]
pub struct YahooChartError {
    pub code: Option<String>,
    pub description: Option<String>,
}

/// One chart series
#[derive(Debug, Deserialize)]
pub struct YahooChartResult {
    pub meta: YahooChartMeta,
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    #[serde(default)]
    pub indicators: Option<YahooIndicators>,
}

/// Series metadata carrying the live price and the previous-close fields
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooChartMeta {
    pub regular_market_price: f64,
    pub previous_close: Option<f64>,
    pub chart_previous_close: Option<f64>,
    pub symbol: String,
}

#[derive(Debug, Deserialize)]
pub struct YahooIndicators {
    #[serde(default)]
    pub quote: Vec<YahooIndicatorQuote>,
}

/// Daily OHLC arrays; only closes are read. Missing sessions are null.
#[derive(Debug, Deserialize)]
pub struct YahooIndicatorQuote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl YahooChartResult {
    /// Daily closes of the first indicator series, if any.
    pub fn closes(&self) -> Option<&[Option<f64>]> {
        self.indicators
            .as_ref()
            .and_then(|i| i.quote.first())
            .map(|q| q.close.as_slice())
    }
}
