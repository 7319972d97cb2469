// Momentum filter
// Regime-dependent price/volume screen over each fundamental survivor's
// recent daily candles.

use serde::{Deserialize, Serialize};

use common::{closes, volumes, Candle};

use crate::indicators;
use crate::regime::MarketRegime;

/// Minimum sessions needed to evaluate a security; shorter series are
/// skipped.
pub const MIN_SESSIONS: usize = 8;

/// Price change is measured against the close this many sessions back.
const PRICE_CHANGE_SESSIONS: usize = 7;

/// Trailing sessions (excluding today) in the average-volume window.
const VOLUME_WINDOW: usize = 10;

/// The pass thresholds that apply under one regime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumThresholds {
    /// Today's volume divided by the trailing average must reach this.
    pub volume_multiple_min: f64,
    /// 7-session price change percentage must reach this.
    pub price_change_min: f64,
}

/// Threshold lookup keyed by regime: a trending market demands a real
/// breakout, a sideways market settles for mild accumulation.
pub fn thresholds_for(regime: MarketRegime) -> MomentumThresholds {
    match regime {
        MarketRegime::Trending => MomentumThresholds {
            volume_multiple_min: 1.5,
            price_change_min: 5.0,
        },
        MarketRegime::Sideways => MomentumThresholds {
            volume_multiple_min: 1.1,
            price_change_min: 0.0,
        },
    }
}

/// Momentum metrics for one security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumEvaluation {
    pub symbol: String,
    /// Percent change of the last close versus seven sessions earlier.
    pub price_change_7d: f64,
    pub volume_today: f64,
    /// Mean volume over the trailing window; 0 when no volume traded.
    pub volume_avg: f64,
    /// `volume_today / volume_avg`, 0 when the average is zero.
    pub volume_multiple: f64,
    /// On-balance volume above its level seven sessions earlier.
    pub obv_trend_up: bool,
}

impl MomentumEvaluation {
    /// All three conditions must hold for the security to pass.
    pub fn passes(&self, thresholds: &MomentumThresholds) -> bool {
        self.volume_multiple >= thresholds.volume_multiple_min
            && self.price_change_7d >= thresholds.price_change_min
            && self.obv_trend_up
    }
}

/// Final output row for a passing security, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumRow {
    pub symbol: String,
    pub price_change_7d: f64,
    pub volume_multiple: f64,
    pub obv_rising: bool,
}

impl From<MomentumEvaluation> for MomentumRow {
    fn from(eval: MomentumEvaluation) -> Self {
        Self {
            symbol: eval.symbol,
            price_change_7d: round2(eval.price_change_7d),
            volume_multiple: round2(eval.volume_multiple),
            obv_rising: eval.obv_trend_up,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the momentum metrics for one security, or `None` when the
/// series is too short.
pub fn evaluate(symbol: &str, candles: &[Candle]) -> Option<MomentumEvaluation> {
    let n = candles.len();
    if n < MIN_SESSIONS {
        return None;
    }

    let closes = closes(candles);
    let volumes = volumes(candles);

    let base = closes[n - 1 - PRICE_CHANGE_SESSIONS];
    let price_change_7d = (closes[n - 1] - base) / base * 100.0;

    let volume_today = volumes[n - 1];
    let window_start = n.saturating_sub(VOLUME_WINDOW + 1);
    let volume_avg = indicators::mean(&volumes[window_start..n - 1]).unwrap_or(0.0);
    let volume_multiple = if volume_avg > 0.0 {
        volume_today / volume_avg
    } else {
        0.0
    };

    let obv = indicators::on_balance_volume(&closes, &volumes);
    let obv_trend_up = obv[n - 1] > obv[n - 1 - PRICE_CHANGE_SESSIONS];

    Some(MomentumEvaluation {
        symbol: symbol.to_string(),
        price_change_7d,
        volume_today,
        volume_avg,
        volume_multiple,
        obv_trend_up,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(closes: &[f64], volumes: &[f64]) -> Vec<Candle> {
        assert_eq!(closes.len(), volumes.len());
        closes
            .iter()
            .zip(volumes)
            .enumerate()
            .map(|(i, (&close, &volume))| {
                let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + chrono::Days::new(i as u64);
                Candle::new(date, close, close + 1.0, close - 1.0, close, volume)
            })
            .collect()
    }

    #[test]
    fn test_breakout_metrics() {
        // 10% move over 7 sessions on double the trailing volume.
        let candles = series(
            &[100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0, 110.0],
            &[1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 2000.0],
        );
        let eval = evaluate("TESTCO", &candles).unwrap();
        assert!((eval.price_change_7d - 10.0).abs() < 1e-9);
        assert!((eval.volume_avg - 1000.0).abs() < 1e-9);
        assert!((eval.volume_multiple - 2.0).abs() < 1e-9);
        assert!(eval.obv_trend_up);
        assert!(eval.passes(&thresholds_for(MarketRegime::Trending)));
    }

    #[test]
    fn test_average_window_excludes_today() {
        // 12 sessions: the window is exactly the 10 sessions before the
        // last one; the oldest session must not contribute.
        let closes: Vec<f64> = (0..12).map(|i| 100.0 + i as f64).collect();
        let mut volumes = vec![500.0; 12];
        volumes[0] = 1_000_000.0;
        for v in volumes.iter_mut().take(11).skip(1) {
            *v = 1000.0;
        }
        volumes[11] = 3000.0;

        let eval = evaluate("TESTCO", &series(&closes, &volumes)).unwrap();
        assert!((eval.volume_avg - 1000.0).abs() < 1e-9);
        assert!((eval.volume_multiple - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_average_volume_is_zero_multiple() {
        let candles = series(
            &[100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0, 110.0],
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2000.0],
        );
        let eval = evaluate("TESTCO", &candles).unwrap();
        assert_eq!(eval.volume_multiple, 0.0);
    }

    #[test]
    fn test_short_series_skipped() {
        let candles = series(&[100.0; 7], &[1000.0; 7]);
        assert!(evaluate("TESTCO", &candles).is_none());
    }

    #[test]
    fn test_regime_selects_thresholds() {
        // Mild accumulation: passes the sideways bar, fails the trending
        // one.
        let eval = MomentumEvaluation {
            symbol: "TESTCO".to_string(),
            price_change_7d: 3.0,
            volume_today: 1300.0,
            volume_avg: 1000.0,
            volume_multiple: 1.3,
            obv_trend_up: true,
        };
        assert!(eval.passes(&thresholds_for(MarketRegime::Sideways)));
        assert!(!eval.passes(&thresholds_for(MarketRegime::Trending)));
    }

    #[test]
    fn test_negative_change_fails_sideways() {
        let eval = MomentumEvaluation {
            symbol: "TESTCO".to_string(),
            price_change_7d: -1.0,
            volume_today: 2000.0,
            volume_avg: 1000.0,
            volume_multiple: 2.0,
            obv_trend_up: true,
        };
        assert!(!eval.passes(&thresholds_for(MarketRegime::Sideways)));
    }

    #[test]
    fn test_falling_obv_fails_both_regimes() {
        // Price limps up on the last bar but every earlier session closed
        // down on heavy volume, so OBV sits far below its week-ago level.
        let candles = series(
            &[110.0, 109.0, 108.0, 107.0, 106.0, 105.0, 104.0, 110.5],
            &[1000.0, 5000.0, 5000.0, 5000.0, 5000.0, 5000.0, 5000.0, 8000.0],
        );
        let eval = evaluate("TESTCO", &candles).unwrap();
        assert!(!eval.obv_trend_up);
        assert!(!eval.passes(&thresholds_for(MarketRegime::Sideways)));
        assert!(!eval.passes(&thresholds_for(MarketRegime::Trending)));
    }

    #[test]
    fn test_row_rounding() {
        let eval = MomentumEvaluation {
            symbol: "TESTCO".to_string(),
            price_change_7d: 10.4567,
            volume_today: 2000.0,
            volume_avg: 999.0,
            volume_multiple: 2.002,
            obv_trend_up: true,
        };
        let row = MomentumRow::from(eval);
        assert_eq!(row.price_change_7d, 10.46);
        assert_eq!(row.volume_multiple, 2.0);
        assert!(row.obv_rising);
    }
}
