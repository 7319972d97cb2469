//! Indicator math used by the screener: a Wilder-smoothed average
//! directional index for trend strength and on-balance volume for
//! volume-flow confirmation. All functions operate on parallel f64 slices
//! ordered oldest to newest and use NaN for not-yet-defined values.

/// True range of a bar given the previous close.
#[inline]
fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let hl = (high - low).abs();
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}

/// Wilder smoothing: an EMA with alpha = 1/period, seeded from the first
/// finite input. NaN inputs carry the previous smoothed value forward.
fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if n == 0 || period == 0 {
        return result;
    }

    let alpha = 1.0 / period as f64;
    let first = match values.iter().position(|v| v.is_finite()) {
        Some(idx) => idx,
        None => return result,
    };

    let mut ema = values[first];
    result[first] = ema;
    for i in (first + 1)..n {
        if values[i].is_finite() {
            ema = alpha * values[i] + (1.0 - alpha) * ema;
        }
        result[i] = ema;
    }
    result
}

/// Average directional index over `period` bars.
///
/// The three slices must be the same length and come from the same candle
/// series. Leading entries are NaN until the directional movement has a
/// defined reading; a flat series never produces one.
pub fn adx(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    let n = high.len();
    debug_assert_eq!(low.len(), n);
    debug_assert_eq!(close.len(), n);
    if n == 0 || period == 0 {
        return vec![f64::NAN; n];
    }

    let mut plus_dm = vec![0.0; n];
    let mut minus_dm = vec![0.0; n];
    let mut tr = vec![f64::NAN; n];
    tr[0] = (high[0] - low[0]).abs();

    for i in 1..n {
        tr[i] = true_range(high[i], low[i], close[i - 1]);

        let up_move = high[i] - high[i - 1];
        let down_move = low[i - 1] - low[i];
        if up_move > down_move && up_move > 0.0 {
            plus_dm[i] = up_move;
        }
        if down_move > up_move && down_move > 0.0 {
            minus_dm[i] = down_move;
        }
    }

    let atr = wilder_smooth(&tr, period);
    let smooth_plus = wilder_smooth(&plus_dm, period);
    let smooth_minus = wilder_smooth(&minus_dm, period);

    let mut dx = vec![f64::NAN; n];
    for i in 0..n {
        if atr[i].is_finite() && atr[i] != 0.0 {
            let plus_di = 100.0 * smooth_plus[i] / atr[i];
            let minus_di = 100.0 * smooth_minus[i] / atr[i];
            let di_sum = plus_di + minus_di;
            if di_sum != 0.0 {
                dx[i] = 100.0 * (plus_di - minus_di).abs() / di_sum;
            }
        }
    }

    wilder_smooth(&dx, period)
}

/// On-balance volume: cumulative volume that adds on up-closes, subtracts
/// on down-closes and carries on flat closes. The first value is the first
/// session's volume.
pub fn on_balance_volume(close: &[f64], volume: &[f64]) -> Vec<f64> {
    debug_assert_eq!(close.len(), volume.len());
    if close.is_empty() {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(close.len());
    result.push(volume[0]);
    for i in 1..close.len() {
        let prev = result[i - 1];
        let obv = if close[i] > close[i - 1] {
            prev + volume[i]
        } else if close[i] < close[i - 1] {
            prev - volume[i]
        } else {
            prev
        };
        result.push(obv);
    }
    result
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
