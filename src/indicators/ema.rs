// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   alpha = 2 / (span + 1)
//   EMA_0 = close_0
//   EMA_t = close_t * alpha + EMA_{t-1} * (1 - alpha)
//
// The recursion is seeded with the first observation itself, so the series is
// defined from index 0 and the output is always index-aligned with the input.
// =============================================================================

/// Compute the EMA series for the given `values` slice and smoothing `span`.
///
/// The returned `Vec` has exactly the same length as `values`; element `i` is
/// the EMA over `values[..=i]`.
///
/// # Edge cases
/// - empty input => empty vec
/// - `span == 0` => all-NaN vec of the input length (division by zero guard)
/// - `span == 1` => alpha is 1, the output equals the input
/// - a NaN observation poisons every element from that index onward
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    if span == 0 {
        return vec![f64::NAN; values.len()];
    }

    let alpha = 2.0 / (span + 1) as f64;

    let mut result = Vec::with_capacity(values.len());
    let mut prev = values[0];
    result.push(prev);

    for &value in &values[1..] {
        let ema = value * alpha + prev * (1.0 - alpha);
        result.push(ema);
        prev = ema;
    }

    result
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: build a simple ascending price series.
    fn ascending(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    // ---- ema_series --------------------------------------------------------

    #[test]
    fn ema_empty_input() {
        assert!(ema_series(&[], 5).is_empty());
    }

    #[test]
    fn ema_span_zero_is_all_nan() {
        let ema = ema_series(&[1.0, 2.0, 3.0], 0);
        assert_eq!(ema.len(), 3);
        assert!(ema.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn ema_seeded_with_first_value() {
        let ema = ema_series(&[42.5, 40.0, 41.0], 12);
        assert_eq!(ema[0], 42.5);
    }

    #[test]
    fn ema_output_aligned_with_input() {
        let closes = ascending(37);
        assert_eq!(ema_series(&closes, 12).len(), closes.len());
    }

    #[test]
    fn ema_span_one_is_identity() {
        let closes = vec![3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(ema_series(&closes, 1), closes);
    }

    #[test]
    fn ema_known_values() {
        // span 3 => alpha = 0.5
        // [2, 4, 6] => [2, 3, 4.5]
        let ema = ema_series(&[2.0, 4.0, 6.0], 3);
        let expected = [2.0, 3.0, 4.5];
        for (a, b) in ema.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-10, "got {a}, expected {b}");
        }
    }

    #[test]
    fn ema_constant_series_is_fixed_point() {
        let ema = ema_series(&vec![100.0; 60], 26);
        assert!(ema.iter().all(|&v| (v - 100.0).abs() < 1e-12));
    }

    #[test]
    fn ema_stays_between_consecutive_extremes() {
        // Each EMA value is a convex combination of the new observation and
        // the previous EMA, so it can never leave the running value range.
        let closes = vec![10.0, 50.0, 20.0, 80.0, 5.0, 30.0];
        let ema = ema_series(&closes, 4);
        let (mut lo, mut hi) = (closes[0], closes[0]);
        for (i, &c) in closes.iter().enumerate() {
            lo = lo.min(c);
            hi = hi.max(c);
            assert!(ema[i] >= lo - 1e-12 && ema[i] <= hi + 1e-12);
        }
    }
}
