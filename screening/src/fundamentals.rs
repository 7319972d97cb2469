// Fundamental filter
// Pure threshold predicate over a security's fundamentals. Missing values
// fail the rule that needs them; BFSI securities are exempt from the
// profitability/leverage rules, which are not meaningful for that sector.

use serde::{Deserialize, Serialize};

use common::FundamentalSnapshot;

/// The eight configurable limits plus the BFSI inclusion flag. Immutable
/// for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundamentalThresholds {
    /// Minimum market capitalization in crore.
    #[serde(default = "default_market_cap_min")]
    pub market_cap_min: f64,

    /// Minimum return on capital, percent.
    #[serde(default = "default_roce_min")]
    pub roce_min: f64,

    /// Minimum year-over-year sales growth, percent.
    #[serde(default = "default_sales_growth_min")]
    pub sales_growth_min: f64,

    /// Minimum year-over-year profit growth, percent.
    #[serde(default = "default_profit_growth_min")]
    pub profit_growth_min: f64,

    /// Maximum trailing P/E.
    #[serde(default = "default_pe_max")]
    pub pe_max: f64,

    /// Maximum debt-to-equity.
    #[serde(default = "default_de_max")]
    pub de_max: f64,

    /// Minimum promoter holding, percent.
    #[serde(default = "default_promoter_holding_min")]
    pub promoter_holding_min: f64,

    /// Minimum last traded price.
    #[serde(default = "default_price_min")]
    pub price_min: f64,

    /// Whether banking/financial-services/insurance securities are screened
    /// at all.
    #[serde(default = "default_include_bfsi")]
    pub include_bfsi: bool,
}

impl Default for FundamentalThresholds {
    fn default() -> Self {
        Self {
            market_cap_min: default_market_cap_min(),
            roce_min: default_roce_min(),
            sales_growth_min: default_sales_growth_min(),
            profit_growth_min: default_profit_growth_min(),
            pe_max: default_pe_max(),
            de_max: default_de_max(),
            promoter_holding_min: default_promoter_holding_min(),
            price_min: default_price_min(),
            include_bfsi: default_include_bfsi(),
        }
    }
}

fn default_market_cap_min() -> f64 {
    1000.0
}

fn default_roce_min() -> f64 {
    15.0
}

fn default_sales_growth_min() -> f64 {
    12.0
}

fn default_profit_growth_min() -> f64 {
    10.0
}

fn default_pe_max() -> f64 {
    30.0
}

fn default_de_max() -> f64 {
    0.5
}

fn default_promoter_holding_min() -> f64 {
    50.0
}

fn default_price_min() -> f64 {
    50.0
}

fn default_include_bfsi() -> bool {
    true
}

/// Apply the fundamental rules to one security. Every applicable rule must
/// hold; a missing metric fails its rule rather than skipping it.
pub fn passes_fundamentals(
    snapshot: &FundamentalSnapshot,
    thresholds: &FundamentalThresholds,
) -> bool {
    if !snapshot.market_cap_cr.at_least(thresholds.market_cap_min) {
        return false;
    }
    if !snapshot.price.at_least(thresholds.price_min) {
        return false;
    }
    if !snapshot.pe.at_most(thresholds.pe_max) {
        return false;
    }
    if !snapshot
        .promoter_holding
        .at_least(thresholds.promoter_holding_min)
    {
        return false;
    }

    // BFSI: the profitability/leverage rules do not apply; the security
    // stands or falls on the checks above and the inclusion flag.
    if snapshot.is_bfsi {
        return thresholds.include_bfsi;
    }

    snapshot.roce.at_least(thresholds.roce_min)
        && snapshot
            .sales_growth
            .at_least(thresholds.sales_growth_min)
        && snapshot
            .profit_growth
            .at_least(thresholds.profit_growth_min)
        && snapshot.debt_to_equity.at_most(thresholds.de_max)
}
