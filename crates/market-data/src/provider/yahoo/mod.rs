//! Yahoo Finance chart provider.
//!
//! Fetches `/v8/finance/chart/{query}?interval=1d&range=5d` and turns the
//! first chart result into a [`Quote`]. Five daily sessions are enough for the
//! previous-close fallback chain in [`previous_close`].

mod models;
mod previous_close;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{Quote, Symbol};
use crate::provider::QuoteSource;
use crate::resolver::yahoo_query_key;

use models::YahooChartResponse;
use previous_close::resolve_previous_close;

/// Public Yahoo Finance query host.
pub const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

const PROVIDER_ID: &str = "YAHOO";

/// Yahoo rejects requests without a browser-like agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/100.0.4896.127 Safari/537.36";

/// Yahoo Finance chart provider.
pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    /// Create a provider against the public Yahoo host with the transport's default timeout.
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_options(YAHOO_BASE_URL, None)
    }

    /// Create a provider against `base_url`, optionally bounding each request.
    pub fn with_options(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, MarketDataError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(BROWSER_USER_AGENT),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build the chart URL for a user-facing symbol.
    fn chart_url(&self, symbol: &Symbol) -> Result<Url, MarketDataError> {
        let raw = format!(
            "{}/v8/finance/chart/{}?interval=1d&range=5d",
            self.base_url,
            yahoo_query_key(symbol.as_str())
        );
        Url::parse(&raw).map_err(|e| MarketDataError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Decode a chart payload into a quote for `symbol`.
    fn quote_from_body(symbol: &Symbol, body: &[u8]) -> Result<Quote, MarketDataError> {
        let response: YahooChartResponse =
            serde_json::from_slice(body).map_err(|e| MarketDataError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        let chart = response.chart;
        let result = match chart.result.and_then(|r| r.into_iter().next()) {
            Some(result) => result,
            None => {
                if let Some(error) = chart.error {
                    warn!(
                        "Yahoo returned no chart for {}: {} ({})",
                        symbol,
                        error.description.as_deref().unwrap_or("no description"),
                        error.code.as_deref().unwrap_or("no code")
                    );
                }
                return Err(MarketDataError::NoResult(symbol.to_string()));
            }
        };

        let price = result.meta.regular_market_price;
        let previous_close = resolve_previous_close(
            price,
            result.meta.previous_close,
            result.closes(),
            result.meta.chart_previous_close,
        );

        debug!(
            "Resolved {} (queried as {}): price {} previous close {}",
            symbol, result.meta.symbol, price, previous_close
        );

        Ok(Quote::from_previous_close(
            symbol.clone(),
            price,
            previous_close,
        ))
    }
}

#[async_trait]
impl QuoteSource for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch(&self, symbol: &Symbol) -> Result<Quote, MarketDataError> {
        let url = self.chart_url(symbol)?;

        debug!("Fetching chart for {} from {}", symbol, url);

        let response = self.client.get(url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(MarketDataError::HttpStatus {
                provider: PROVIDER_ID.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await?;
        Self::quote_from_body(symbol, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FetchErrorKind;

    fn sym(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    fn provider() -> YahooProvider {
        YahooProvider::with_options("https://example.test/", None).unwrap()
    }

    #[test]
    fn test_chart_url_maps_index_alias() {
        let url = provider().chart_url(&sym("spx")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/v8/finance/chart/%5EGSPC?interval=1d&range=5d"
        );
    }

    #[test]
    fn test_chart_url_encodes_plain_symbol() {
        let url = provider().chart_url(&sym("EURUSD=X")).unwrap();
        assert_eq!(url.path(), "/v8/finance/chart/EURUSD%3DX");
        assert_eq!(url.query(), Some("interval=1d&range=5d"));
    }

    #[test]
    fn test_bad_base_url_is_network_error() {
        let provider = YahooProvider::with_options("not a host", None).unwrap();
        let error = provider.chart_url(&sym("AAPL")).unwrap_err();
        assert_eq!(error.kind(), FetchErrorKind::Network);
    }

    #[test]
    fn test_quote_uses_alias_and_previous_close() {
        let body = br#"{"chart": {"result": [{
            "meta": {"symbol": "^GSPC", "regularMarketPrice": 5050.0, "previousClose": 5000.0},
            "indicators": {"quote": [{"close": [4900.0, 4950.0, 5050.0]}]}
        }], "error": null}}"#;

        let quote = YahooProvider::quote_from_body(&sym("SPX"), body).unwrap();

        assert_eq!(quote.symbol.as_str(), "SPX");
        assert_eq!(quote.price, 5050.0);
        assert_eq!(quote.change, 50.0);
        assert!((quote.percent_change - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_quote_falls_back_to_history() {
        let body = br#"{"chart": {"result": [{
            "meta": {"symbol": "AAPL", "regularMarketPrice": 105.0, "previousClose": null},
            "indicators": {"quote": [{"close": [100.0, null, 98.0, 105.0]}]}
        }]}}"#;

        let quote = YahooProvider::quote_from_body(&sym("AAPL"), body).unwrap();

        assert_eq!(quote.change, 7.0);
        assert!((quote.percent_change - 7.0 / 98.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_quote_without_any_reference_is_flat() {
        let body = br#"{"chart": {"result": [{
            "meta": {"symbol": "AAPL", "regularMarketPrice": 105.0},
            "indicators": {"quote": [{"close": [null, null]}]}
        }]}}"#;

        let quote = YahooProvider::quote_from_body(&sym("AAPL"), body).unwrap();

        assert_eq!(quote.change, 0.0);
        assert_eq!(quote.percent_change, 0.0);
    }

    #[test]
    fn test_empty_result_is_parse_error() {
        let body = br#"{"chart": {"result": [], "error": null}}"#;
        let error = YahooProvider::quote_from_body(&sym("AAPL"), body).unwrap_err();
        assert!(matches!(error, MarketDataError::NoResult(ref s) if s == "AAPL"));
        assert_eq!(error.kind(), FetchErrorKind::Parse);
    }

    #[test]
    fn test_null_result_with_error_is_parse_error() {
        let body = br#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "delisted"}}}"#;
        let error = YahooProvider::quote_from_body(&sym("GONE"), body).unwrap_err();
        assert_eq!(error.kind(), FetchErrorKind::Parse);
    }

    #[test]
    fn test_malformed_body_is_parse_error() {
        let error = YahooProvider::quote_from_body(&sym("AAPL"), b"<html>blocked</html>")
            .unwrap_err();
        assert!(matches!(error, MarketDataError::Parse { .. }));

        let missing_price = br#"{"chart": {"result": [{"meta": {"symbol": "AAPL"}}]}}"#;
        let error = YahooProvider::quote_from_body(&sym("AAPL"), missing_price).unwrap_err();
        assert_eq!(error.kind(), FetchErrorKind::Parse);
    }

    /// Serves one canned HTTP response on a local port and hands back the
    /// raw request it received.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (base_url, server)
    }

    fn header_value<'a>(request: &'a str, name: &str) -> Option<&'a str> {
        request.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim())
        })
    }

    #[tokio::test]
    async fn test_fetch_decodes_ok_response_and_sends_browser_agent() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"chart": {"result": [{
                "meta": {"symbol": "^GSPC", "regularMarketPrice": 5050.0, "previousClose": 5000.0},
                "indicators": {"quote": [{"close": [5000.0, 5050.0]}]}
            }], "error": null}}"#,
        )
        .await;
        let provider =
            YahooProvider::with_options(base_url, Some(Duration::from_secs(5))).unwrap();

        let quote = provider.fetch(&sym("SPX")).await.unwrap();
        assert_eq!(quote.symbol.as_str(), "SPX");
        assert_eq!(quote.price, 5050.0);
        assert_eq!(quote.change, 50.0);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /v8/finance/chart/%5EGSPC?interval=1d&range=5d "));
        assert_eq!(header_value(&request, "user-agent"), Some(BROWSER_USER_AGENT));
    }

    #[tokio::test]
    async fn test_fetch_non_ok_status_is_network_error() {
        let (base_url, server) = serve_once("404 Not Found", r#"{"chart": {"result": null}}"#).await;
        let provider =
            YahooProvider::with_options(base_url, Some(Duration::from_secs(5))).unwrap();

        let error = provider.fetch(&sym("AAPL")).await.unwrap_err();
        assert!(matches!(
            error,
            MarketDataError::HttpStatus { status: 404, ref provider } if provider == "YAHOO"
        ));
        assert_eq!(error.kind(), FetchErrorKind::Network);

        let request = server.await.unwrap();
        assert_eq!(header_value(&request, "user-agent"), Some(BROWSER_USER_AGENT));
    }

    #[tokio::test]
    async fn test_fetch_garbage_body_is_parse_error() {
        let (base_url, server) = serve_once("200 OK", "<html>consent required</html>").await;
        let provider =
            YahooProvider::with_options(base_url, Some(Duration::from_secs(5))).unwrap();

        let error = provider.fetch(&sym("AAPL")).await.unwrap_err();
        assert_eq!(error.kind(), FetchErrorKind::Parse);
        server.await.unwrap();
    }
}
