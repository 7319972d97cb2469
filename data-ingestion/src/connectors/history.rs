use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use common::{Candle, PriceHistorySource};

/// Default chart endpoint for daily OHLCV history.
pub const DEFAULT_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Daily candle history over a chart-API style endpoint.
///
/// Sessions the provider reports with any null field (holidays, halts) are
/// dropped, so callers always see complete candles ordered oldest to newest.
pub struct ChartHistoryConnector {
    base_url: String,
    symbol_suffix: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

impl ChartHistoryConnector {
    pub fn new(base_url: impl Into<String>, symbol_suffix: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            symbol_suffix: symbol_suffix.into(),
            client: Client::new(),
        }
    }

    /// Index symbols (e.g. "^NSEI") are passed through without the equity
    /// suffix.
    fn provider_symbol(&self, symbol: &str) -> String {
        if symbol.starts_with('^') {
            symbol.to_string()
        } else {
            format!("{}{}", symbol, self.symbol_suffix)
        }
    }

    /// Zip the parallel timestamp/quote arrays into candles, dropping
    /// sessions with incomplete data.
    fn to_candles(result: ChartResult) -> Vec<Candle> {
        let timestamps = result.timestamp.unwrap_or_default();
        let quote = match result.indicators.quote.into_iter().next() {
            Some(q) => q,
            None => return Vec::new(),
        };

        let mut candles = Vec::with_capacity(timestamps.len());
        for (i, ts) in timestamps.iter().enumerate() {
            let bar = (
                quote.open.get(i).copied().flatten(),
                quote.high.get(i).copied().flatten(),
                quote.low.get(i).copied().flatten(),
                quote.close.get(i).copied().flatten(),
                quote.volume.get(i).copied().flatten(),
            );
            if let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = bar {
                let date = match DateTime::<Utc>::from_timestamp(*ts, 0) {
                    Some(dt) => dt.date_naive(),
                    None => continue,
                };
                candles.push(Candle::new(date, open, high, low, close, volume));
            }
        }
        candles
    }
}

impl Default for ChartHistoryConnector {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_URL, ".NS")
    }
}

#[async_trait::async_trait]
impl PriceHistorySource for ChartHistoryConnector {
    async fn fetch_daily_history(&self, symbol: &str, days: u32) -> Result<Vec<Candle>> {
        let end = Utc::now();
        let start = end - Duration::days(i64::from(days));
        let url = format!("{}/{}", self.base_url, self.provider_symbol(symbol));

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", start.timestamp().to_string()),
                ("period2", end.timestamp().to_string()),
                ("interval", "1d".to_string()),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(symbol, "no chart data for symbol");
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(anyhow!(
                "chart fetch for {} failed: {}",
                symbol,
                response.status()
            ));
        }

        let parsed: ChartResponse = response.json().await?;
        let candles = parsed
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .map(Self::to_candles)
            .unwrap_or_default();

        debug!(symbol, sessions = candles.len(), "fetched daily history");
        Ok(candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CHART: &str = r#"{
        "chart": {
            "result": [{
                "timestamp": [1704067200, 1704153600, 1704240000],
                "indicators": {
                    "quote": [{
                        "open": [100.0, 101.0, null],
                        "high": [102.0, 103.0, 104.0],
                        "low": [99.0, 100.0, 101.0],
                        "close": [101.0, 102.0, 103.0],
                        "volume": [10000, 12000, 11000]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    fn candles_from(payload: &str) -> Vec<Candle> {
        let parsed: ChartResponse = serde_json::from_str(payload).unwrap();
        parsed
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .map(ChartHistoryConnector::to_candles)
            .unwrap_or_default()
    }

    #[test]
    fn test_parse_chart_drops_null_sessions() {
        let candles = candles_from(SAMPLE_CHART);
        // The third session has a null open and is dropped.
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].close, 101.0);
        assert_eq!(candles[1].volume, 12000.0);
        assert!(candles[0].date < candles[1].date);
    }

    #[test]
    fn test_parse_null_result() {
        let payload = r#"{"chart": {"result": null, "error": {"code": "Not Found"}}}"#;
        assert!(candles_from(payload).is_empty());
    }

    #[test]
    fn test_index_symbol_keeps_caret() {
        let connector = ChartHistoryConnector::default();
        assert_eq!(connector.provider_symbol("^NSEI"), "^NSEI");
        assert_eq!(connector.provider_symbol("RELIANCE"), "RELIANCE.NS");
    }
}
