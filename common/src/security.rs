use serde::{Deserialize, Serialize};

use crate::metric::Metric;

/// Industry keywords that mark a security as banking/financial
/// services/insurance.
const BFSI_INDUSTRY_KEYWORDS: [&str; 4] = ["bank", "finance", "financial", "insurance"];

/// True when the industry or sector classification places the security in
/// the BFSI bucket. Matching is case-insensitive; the industry match is a
/// substring match, the sector match is exact.
pub fn is_financial_sector(sector: &str, industry: &str) -> bool {
    let industry = industry.to_lowercase();
    BFSI_INDUSTRY_KEYWORDS.iter().any(|k| industry.contains(k))
        || sector.eq_ignore_ascii_case("financial services")
}

/// Per-security fundamentals, built fresh from a provider lookup for each
/// screening run. Absent provider fields stay absent in the `Metric`
/// wrappers, never zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundamentalSnapshot {
    pub symbol: String,
    /// Last traded price.
    pub price: Metric,
    /// Market capitalization in currency crore.
    pub market_cap_cr: Metric,
    /// Trailing price-to-earnings ratio.
    pub pe: Metric,
    pub sector: String,
    pub industry: String,
    /// Return-on-capital percentage. Approximated from the provider's
    /// return-on-equity field; the proxy is deliberate.
    pub roce: Metric,
    /// Year-over-year sales growth percentage.
    pub sales_growth: Metric,
    /// Year-over-year profit growth percentage.
    pub profit_growth: Metric,
    pub debt_to_equity: Metric,
    /// Promoter/insider holding percentage.
    pub promoter_holding: Metric,
    /// Derived at construction from sector/industry.
    pub is_bfsi: bool,
}

impl FundamentalSnapshot {
    /// Build a snapshot, deriving the BFSI flag from sector/industry.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: impl Into<String>,
        sector: impl Into<String>,
        industry: impl Into<String>,
        price: Metric,
        market_cap_cr: Metric,
        pe: Metric,
        roce: Metric,
        sales_growth: Metric,
        profit_growth: Metric,
        debt_to_equity: Metric,
        promoter_holding: Metric,
    ) -> Self {
        let sector = sector.into();
        let industry = industry.into();
        let is_bfsi = is_financial_sector(&sector, &industry);
        Self {
            symbol: symbol.into(),
            price,
            market_cap_cr,
            pe,
            sector,
            industry,
            roce,
            sales_growth,
            profit_growth,
            debt_to_equity,
            promoter_holding,
            is_bfsi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bfsi_industry_keywords() {
        assert!(is_financial_sector("", "Private Sector Bank"));
        assert!(is_financial_sector("", "Housing Finance Company"));
        assert!(is_financial_sector("", "Life Insurance"));
        assert!(is_financial_sector("", "Other Financial Services"));
        assert!(!is_financial_sector("", "Pharmaceuticals"));
    }

    #[test]
    fn test_bfsi_sector_exact_match() {
        assert!(is_financial_sector("Financial Services", "Exchange"));
        assert!(is_financial_sector("financial services", ""));
        // Sector match is exact, not substring.
        assert!(!is_financial_sector("Non-Financial Services Co", "Cement"));
    }

    #[test]
    fn test_snapshot_derives_flag() {
        let s = FundamentalSnapshot::new(
            "HDFCBANK",
            "Financial Services",
            "Private Sector Bank",
            Metric::some(1500.0),
            Metric::some(90000.0),
            Metric::some(19.0),
            Metric::NONE,
            Metric::NONE,
            Metric::NONE,
            Metric::NONE,
            Metric::some(25.5),
        );
        assert!(s.is_bfsi);
    }
}
