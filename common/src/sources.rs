// Data source traits
// The screener consumes the universe list, fundamentals and price history
// from external providers; these traits are the boundary. Connectors in
// data-ingestion implement them over HTTP, tests implement them in memory.

use anyhow::Result;

use crate::candle::Candle;
use crate::security::FundamentalSnapshot;

/// Ordered list of security identifiers for a market index.
#[async_trait::async_trait]
pub trait UniverseSource: Send + Sync {
    /// Fetch the universe. A failure here aborts the screening run.
    async fn fetch_universe(&self) -> Result<Vec<String>>;
}

/// Per-symbol fundamentals lookup.
#[async_trait::async_trait]
pub trait FundamentalsSource: Send + Sync {
    /// Fetch fundamentals for one symbol. `Ok(None)` means the provider has
    /// no data for the symbol; the caller skips it without aborting.
    async fn fetch_fundamentals(&self, symbol: &str) -> Result<Option<FundamentalSnapshot>>;
}

/// Daily OHLCV history lookup, also used for the market index series.
#[async_trait::async_trait]
pub trait PriceHistorySource: Send + Sync {
    /// Fetch up to `days` trailing calendar days of daily candles for a
    /// symbol, ordered oldest to newest. Sessions with incomplete provider
    /// data are dropped by the implementation.
    async fn fetch_daily_history(&self, symbol: &str, days: u32) -> Result<Vec<Candle>>;
}
