use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use common::UniverseSource;

/// Default universe: NSE Nifty 500 constituents list.
pub const DEFAULT_UNIVERSE_URL: &str =
    "https://www1.nseindia.com/content/indices/ind_nifty500list.csv";

/// Fetches the index-constituents CSV and returns the symbol column in file
/// order.
pub struct IndexUniverseConnector {
    url: String,
    client: Client,
}

/// One constituents row. Only the symbol column is consumed; the remaining
/// columns (company name, industry, ISIN) are ignored by the reader.
#[derive(Debug, Deserialize)]
struct ConstituentRow {
    #[serde(rename = "Symbol")]
    symbol: String,
}

impl IndexUniverseConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Parse the constituents CSV body into an ordered symbol list.
    fn parse_symbols(body: &str) -> Result<Vec<String>> {
        let mut reader = csv::Reader::from_reader(body.as_bytes());
        let mut symbols = Vec::new();
        for row in reader.deserialize::<ConstituentRow>() {
            let row = row.context("malformed constituents row")?;
            symbols.push(row.symbol);
        }
        Ok(symbols)
    }
}

impl Default for IndexUniverseConnector {
    fn default() -> Self {
        Self::new(DEFAULT_UNIVERSE_URL)
    }
}

#[async_trait::async_trait]
impl UniverseSource for IndexUniverseConnector {
    async fn fetch_universe(&self) -> Result<Vec<String>> {
        info!("Fetching index constituents from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("constituents fetch failed: {}", response.status()));
        }

        let body = response.text().await?;
        let symbols = Self::parse_symbols(&body)?;

        info!("✅ Fetched {} constituents", symbols.len());
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Company Name,Industry,Symbol,Series,ISIN Code
Reliance Industries Ltd.,Oil Gas & Consumable Fuels,RELIANCE,EQ,INE002A01018
HDFC Bank Ltd.,Financial Services,HDFCBANK,EQ,INE040A01034
Tata Consultancy Services Ltd.,Information Technology,TCS,EQ,INE467B01029
";

    #[test]
    fn test_parse_symbols_preserves_order() {
        let symbols = IndexUniverseConnector::parse_symbols(SAMPLE_CSV).unwrap();
        assert_eq!(symbols, vec!["RELIANCE", "HDFCBANK", "TCS"]);
    }

    #[test]
    fn test_parse_empty_body() {
        let symbols =
            IndexUniverseConnector::parse_symbols("Company Name,Industry,Symbol,Series,ISIN Code\n")
                .unwrap();
        assert!(symbols.is_empty());
    }

    #[test]
    fn test_parse_missing_symbol_column_errors() {
        let result = IndexUniverseConnector::parse_symbols("Company Name,Industry\nFoo Ltd.,Cement\n");
        assert!(result.is_err());
    }
}
