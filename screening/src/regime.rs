// Market regime classification
// One ADX reading over the index series decides which momentum thresholds
// apply to every security in the run.

use serde::{Deserialize, Serialize};
use std::fmt;

use common::{closes, highs, lows, Candle};

use crate::indicators;

/// ADX lookback, in sessions.
pub const ADX_PERIOD: usize = 14;

/// ADX at or above this value reads as a trending market.
pub const TREND_STRENGTH_MIN: f64 = 20.0;

/// Minimum index sessions required before the ADX reading is usable.
pub const MIN_INDEX_SESSIONS: usize = 15;

/// Coarse market state, recomputed from scratch every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketRegime {
    Trending,
    Sideways,
}

impl MarketRegime {
    /// Boundary rule: exactly the threshold is Trending.
    pub fn from_adx(adx: f64) -> Self {
        if adx >= TREND_STRENGTH_MIN {
            MarketRegime::Trending
        } else {
            MarketRegime::Sideways
        }
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketRegime::Trending => write!(f, "TRENDING"),
            MarketRegime::Sideways => write!(f, "SIDEWAYS"),
        }
    }
}

/// The regime together with the ADX value that produced it, for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeReading {
    pub regime: MarketRegime,
    pub adx: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum RegimeError {
    #[error("index history too short for regime classification: need {required} sessions, have {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    #[error("trend-strength indicator produced no defined value")]
    AdxUnavailable,
}

/// Classify the market from the index's trailing daily series.
///
/// Takes the most recent defined ADX value; when the series is too short
/// (or the indicator never resolves, e.g. a perfectly flat tape) the caller
/// must skip the momentum stage for this run.
pub fn classify(index: &[Candle]) -> Result<RegimeReading, RegimeError> {
    if index.len() < MIN_INDEX_SESSIONS {
        return Err(RegimeError::InsufficientHistory {
            required: MIN_INDEX_SESSIONS,
            actual: index.len(),
        });
    }

    let series = indicators::adx(&highs(index), &lows(index), &closes(index), ADX_PERIOD);
    let adx = series
        .iter()
        .rev()
        .find(|v| v.is_finite())
        .copied()
        .ok_or(RegimeError::AdxUnavailable)?;

    Ok(RegimeReading {
        regime: MarketRegime::from_adx(adx),
        adx,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candle(i: usize, open: f64, high: f64, low: f64, close: f64) -> Candle {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64);
        Candle::new(date, open, high, low, close, 1_000_000.0)
    }

    fn rising_index(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let close = 100.0 + 2.0 * i as f64;
                candle(i, close - 1.0, close + 1.0, close - 1.0, close)
            })
            .collect()
    }

    #[test]
    fn test_threshold_boundary_is_trending() {
        assert_eq!(MarketRegime::from_adx(20.0), MarketRegime::Trending);
        assert_eq!(MarketRegime::from_adx(35.0), MarketRegime::Trending);
        assert_eq!(MarketRegime::from_adx(19.99), MarketRegime::Sideways);
        assert_eq!(MarketRegime::from_adx(0.0), MarketRegime::Sideways);
    }

    #[test]
    fn test_classify_strong_uptrend() {
        let reading = classify(&rising_index(16)).unwrap();
        assert_eq!(reading.regime, MarketRegime::Trending);
        assert!(reading.adx >= TREND_STRENGTH_MIN);
    }

    #[test]
    fn test_classify_short_history() {
        let err = classify(&rising_index(10)).unwrap_err();
        match err {
            RegimeError::InsufficientHistory { required, actual } => {
                assert_eq!(required, MIN_INDEX_SESSIONS);
                assert_eq!(actual, 10);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_classify_flat_tape_has_no_reading() {
        let flat: Vec<Candle> = (0..20).map(|i| candle(i, 100.0, 100.0, 100.0, 100.0)).collect();
        let err = classify(&flat).unwrap_err();
        assert!(matches!(err, RegimeError::AdxUnavailable));
    }

    #[test]
    fn test_display() {
        assert_eq!(MarketRegime::Trending.to_string(), "TRENDING");
        assert_eq!(MarketRegime::Sideways.to_string(), "SIDEWAYS");
    }
}
