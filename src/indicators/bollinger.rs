// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), where σ is the rolling sample standard
// deviation over the same window.
//
// All four columns are index-aligned with the input closes; the warmup NaNs
// from the rolling statistics propagate into the band columns unchanged.

use crate::indicators::rolling::{rolling_mean, rolling_std};

/// Column-oriented result of a Bollinger Band calculation.
#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub sma: Vec<f64>,
    pub std_dev: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Calculate Bollinger Bands for the given closing prices.
///
/// Every column has the same length as `closes`; the first `window - 1`
/// elements of each column are NaN.
pub fn bollinger_series(closes: &[f64], window: usize, num_std: f64) -> BollingerSeries {
    let sma = rolling_mean(closes, window);
    let std_dev = rolling_std(closes, window);

    let upper: Vec<f64> = sma
        .iter()
        .zip(std_dev.iter())
        .map(|(m, s)| m + num_std * s)
        .collect();
    let lower: Vec<f64> = sma
        .iter()
        .zip(std_dev.iter())
        .map(|(m, s)| m - num_std * s)
        .collect();

    BollingerSeries {
        sma,
        std_dev,
        upper,
        lower,
    }
}
