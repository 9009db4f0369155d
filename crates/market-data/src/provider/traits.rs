//! Quote source trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{Quote, Symbol};

/// Trait for upstream quote providers.
///
/// Implementations must be cheap to share: the refresh cycle holds one
/// `Arc<dyn QuoteSource>` and calls [`fetch`](Self::fetch) concurrently for
/// every symbol in the list.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use tickerbar_market_data::{MarketDataError, Quote, QuoteSource, Symbol};
///
/// struct FixedSource;
///
/// #[async_trait]
/// impl QuoteSource for FixedSource {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn fetch(&self, symbol: &Symbol) -> Result<Quote, MarketDataError> {
///         Ok(Quote::from_previous_close(symbol.clone(), 101.0, 100.0))
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Unique identifier for this provider, used in logs.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for `symbol`.
    ///
    /// The returned quote carries `symbol` itself, whatever key the provider
    /// was queried with.
    async fn fetch(&self, symbol: &Symbol) -> Result<Quote, MarketDataError>;
}
