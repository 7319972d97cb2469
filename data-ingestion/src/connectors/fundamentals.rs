use anyhow::{anyhow, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use common::{FundamentalSnapshot, FundamentalsSource, Metric};

/// Default quote-summary endpoint.
pub const DEFAULT_QUOTE_SUMMARY_URL: &str =
    "https://query1.finance.yahoo.com/v10/finance/quoteSummary";

/// Modules requested per lookup; covers every field the screener consumes.
const MODULES: &str = "price,summaryDetail,financialData,defaultKeyStatistics,assetProfile";

/// Per-symbol fundamentals lookup against a quote-summary style endpoint.
///
/// The provider reports growth rates and holdings as fractions and market
/// cap in plain currency units; this connector converts to the percentages
/// and crore the filter thresholds are written in. The provider's
/// return-on-equity is carried as the ROCE field — a deliberate proxy.
pub struct QuoteSummaryConnector {
    base_url: String,
    symbol_suffix: String,
    client: Client,
}

/// Numeric fields arrive wrapped as `{"raw": 1.23, "fmt": "1.23"}`.
#[derive(Debug, Deserialize)]
struct WrappedValue {
    raw: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryBody {
    result: Option<Vec<QuoteModules>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteModules {
    price: Option<PriceModule>,
    summary_detail: Option<SummaryDetailModule>,
    financial_data: Option<FinancialDataModule>,
    default_key_statistics: Option<KeyStatisticsModule>,
    asset_profile: Option<AssetProfileModule>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    market_cap: Option<WrappedValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetailModule {
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<WrappedValue>,
    previous_close: Option<WrappedValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialDataModule {
    current_price: Option<WrappedValue>,
    return_on_equity: Option<WrappedValue>,
    revenue_growth: Option<WrappedValue>,
    debt_to_equity: Option<WrappedValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatisticsModule {
    earnings_quarterly_growth: Option<WrappedValue>,
    held_percent_insiders: Option<WrappedValue>,
}

#[derive(Debug, Deserialize)]
struct AssetProfileModule {
    sector: Option<String>,
    industry: Option<String>,
}

fn metric(value: Option<WrappedValue>) -> Metric {
    Metric::new(value.and_then(|v| v.raw))
}

impl QuoteSummaryConnector {
    pub fn new(base_url: impl Into<String>, symbol_suffix: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            symbol_suffix: symbol_suffix.into(),
            client: Client::new(),
        }
    }

    /// Map one parsed result into the domain snapshot.
    fn to_snapshot(symbol: &str, modules: QuoteModules) -> FundamentalSnapshot {
        let price_module = modules.price;
        let summary = modules.summary_detail;
        let financial = modules.financial_data;
        let key_stats = modules.default_key_statistics;
        let profile = modules.asset_profile;

        let (current_price, roce, sales_growth, debt_to_equity) = match financial {
            Some(f) => (
                metric(f.current_price),
                metric(f.return_on_equity).scaled(100.0),
                metric(f.revenue_growth).scaled(100.0),
                metric(f.debt_to_equity),
            ),
            None => (Metric::NONE, Metric::NONE, Metric::NONE, Metric::NONE),
        };

        let (pe, previous_close) = match summary {
            Some(s) => (metric(s.trailing_pe), metric(s.previous_close)),
            None => (Metric::NONE, Metric::NONE),
        };

        // Last traded price, falling back to the prior session's close.
        let price = if current_price.is_absent() {
            previous_close
        } else {
            current_price
        };

        let market_cap_cr = price_module
            .map(|p| metric(p.market_cap).scaled(1.0 / 1.0e7))
            .unwrap_or(Metric::NONE);

        let (profit_growth, promoter_holding) = match key_stats {
            Some(k) => (
                metric(k.earnings_quarterly_growth).scaled(100.0),
                metric(k.held_percent_insiders).scaled(100.0),
            ),
            None => (Metric::NONE, Metric::NONE),
        };

        let (sector, industry) = match profile {
            Some(p) => (
                p.sector.unwrap_or_default(),
                p.industry.unwrap_or_default(),
            ),
            None => (String::new(), String::new()),
        };

        FundamentalSnapshot::new(
            symbol,
            sector,
            industry,
            price,
            market_cap_cr,
            pe,
            roce,
            sales_growth,
            profit_growth,
            debt_to_equity,
            promoter_holding,
        )
    }
}

impl Default for QuoteSummaryConnector {
    fn default() -> Self {
        Self::new(DEFAULT_QUOTE_SUMMARY_URL, ".NS")
    }
}

#[async_trait::async_trait]
impl FundamentalsSource for QuoteSummaryConnector {
    async fn fetch_fundamentals(&self, symbol: &str) -> Result<Option<FundamentalSnapshot>> {
        let url = format!("{}/{}{}", self.base_url, symbol, self.symbol_suffix);
        let response = self
            .client
            .get(&url)
            .query(&[("modules", MODULES)])
            .send()
            .await?;

        // Unknown symbols come back as 404; treat as "no data".
        if response.status() == StatusCode::NOT_FOUND {
            debug!(symbol, "no quote summary for symbol");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(anyhow!(
                "quote summary fetch for {} failed: {}",
                symbol,
                response.status()
            ));
        }

        let parsed: QuoteSummaryResponse = response.json().await?;
        let modules = parsed
            .quote_summary
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) });

        Ok(modules.map(|m| Self::to_snapshot(symbol, m)))
    }
}
