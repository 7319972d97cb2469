//! Fixed-width table rendering for the two result sets.

use std::fmt::Write;

use common::{FundamentalSnapshot, Metric};
use screening::MomentumRow;

/// Render a metric with the given precision, "-" when absent.
fn fmt_metric(metric: Metric, decimals: usize) -> String {
    match metric.value() {
        Some(v) => format!("{:.*}", decimals, v),
        None => "-".to_string(),
    }
}

/// Table of fundamental-filter survivors with their computed metrics.
pub fn fundamental_table(rows: &[FundamentalSnapshot]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>10} {:>12} {:>8} {:>8} {:>8} {:>9} {:>6} {:>7} {:>5}",
        "Symbol", "Price", "MCap(Cr)", "P/E", "ROCE%", "SalesG%", "ProfitG%", "D/E", "Prom%", "BFSI"
    );
    for s in rows {
        let _ = writeln!(
            out,
            "{:<12} {:>10} {:>12} {:>8} {:>8} {:>8} {:>9} {:>6} {:>7} {:>5}",
            s.symbol,
            fmt_metric(s.price, 2),
            fmt_metric(s.market_cap_cr, 2),
            fmt_metric(s.pe, 2),
            fmt_metric(s.roce, 2),
            fmt_metric(s.sales_growth, 2),
            fmt_metric(s.profit_growth, 2),
            fmt_metric(s.debt_to_equity, 2),
            fmt_metric(s.promoter_holding, 1),
            if s.is_bfsi { "yes" } else { "no" },
        );
    }
    out
}

/// Table of momentum-filter survivors.
pub fn momentum_table(rows: &[MomentumRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>12} {:>10} {:>5}",
        "Symbol", "Change%(7d)", "VolSpike", "OBV"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<12} {:>12.2} {:>10.2} {:>5}",
            row.symbol,
            row.price_change_7d,
            row.volume_multiple,
            if row.obv_rising { "Up" } else { "Down" },
        );
    }
    out
}
