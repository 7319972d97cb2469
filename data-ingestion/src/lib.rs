//! HTTP connectors for the external data providers: the index-constituents
//! universe CSV, the per-symbol fundamentals lookup and the daily OHLCV
//! chart endpoint. Each connector implements the matching source trait from
//! `common`; the screening pipeline never sees a URL.

pub mod connectors;

pub use connectors::fundamentals::QuoteSummaryConnector;
pub use connectors::history::ChartHistoryConnector;
pub use connectors::universe::IndexUniverseConnector;
