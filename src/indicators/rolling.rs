// =============================================================================
// Rolling window statistics
// =============================================================================
//
// Both functions return a series of the same length as the input. A window
// statistic only exists once a full window of observations is available, so
// the first `window - 1` elements are NaN and element `i` (for
// i >= window - 1) describes `values[i + 1 - window ..= i]`.
//
// The standard deviation is the sample deviation (the sum of squared
// deviations is divided by `window - 1`, not `window`).
// =============================================================================

/// Rolling arithmetic mean over a trailing `window`.
///
/// # Edge cases
/// - `window == 0` => all-NaN vec (no meaningful statistic)
/// - `values.len() < window` => all-NaN vec
/// - a NaN observation makes every window containing it NaN
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    if window == 0 || values.len() < window {
        return result;
    }

    for (i, chunk) in values.windows(window).enumerate() {
        let mean = chunk.iter().sum::<f64>() / window as f64;
        result[i + window - 1] = mean;
    }

    result
}

/// Rolling sample standard deviation over a trailing `window`.
///
/// # Edge cases
/// - `window < 2` => all-NaN vec (sample deviation needs two observations)
/// - `values.len() < window` => all-NaN vec
/// - a NaN observation makes every window containing it NaN
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    if window < 2 || values.len() < window {
        return result;
    }

    for (i, chunk) in values.windows(window).enumerate() {
        let mean = chunk.iter().sum::<f64>() / window as f64;
        let variance =
            chunk.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (window - 1) as f64;
        result[i + window - 1] = variance.sqrt();
    }

    result
}
