//! Shared domain types for the screener workspace: the nullable metric
//! wrapper, per-security fundamentals, daily candles and the traits behind
//! which the external data providers sit.

mod candle;
mod metric;
mod security;
mod sources;

pub use candle::{closes, highs, lows, volumes, Candle};
pub use metric::Metric;
pub use security::{is_financial_sector, FundamentalSnapshot};
pub use sources::{FundamentalsSource, PriceHistorySource, UniverseSource};
