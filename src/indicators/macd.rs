// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// Formula:
//   MACD_t      = EMA_fast(close)_t - EMA_slow(close)_t
//   signal_t    = EMA_signal(MACD)_t
//   histogram_t = MACD_t - signal_t
//
// Because both price EMAs are seeded with the first close, MACD starts at
// exactly 0 at index 0, and so do the signal line and the histogram. All five
// columns are index-aligned with the input closes.
// =============================================================================

use crate::indicators::ema::ema_series;

/// Column-oriented result of a MACD calculation.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub ema_fast: Vec<f64>,
    pub ema_slow: Vec<f64>,
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Calculate the MACD stack for the given closing prices.
///
/// # Edge cases
/// - empty input => all columns empty
/// - any zero span => that EMA is all-NaN and the NaN flows through the
///   derived columns
pub fn macd_series(
    closes: &[f64],
    fast_span: usize,
    slow_span: usize,
    signal_span: usize,
) -> MacdSeries {
    let ema_fast = ema_series(closes, fast_span);
    let ema_slow = ema_series(closes, slow_span);

    let macd: Vec<f64> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(f, s)| f - s)
        .collect();
    let signal = ema_series(&macd, signal_span);
    let histogram: Vec<f64> = macd
        .iter()
        .zip(signal.iter())
        .map(|(m, s)| m - s)
        .collect();

    MacdSeries {
        ema_fast,
        ema_slow,
        macd,
        signal,
        histogram,
    }
}
