// =============================================================================
// Snapshot classification
// =============================================================================
//
// Classifies the most recent indicator row into two independent verdicts:
// where the close sits relative to the Bollinger bands, and which way the
// MACD stack currently points. Both classifiers are written with positive
// conditions only, so NaN inputs (warmup rows, thin histories) fail every
// comparison and fall through to the neutral branch.
// =============================================================================

use crate::config::ToleranceConfig;
use crate::indicators::IndicatorPoint;
use crate::types::{BandState, MomentumState, SignalVerdict};

/// Band verdict for one close against its Bollinger bands.
///
/// Both boundaries are inclusive: a close exactly on the widened lower band
/// is `Oversold`, a close exactly on the tightened upper band is
/// `Overheated`. The oversold test runs first, so when collapsed bands make
/// both sides true at once the oversold verdict wins.
pub fn band_state(close: f64, lower: f64, upper: f64, tolerance: &ToleranceConfig) -> BandState {
    if close <= lower * tolerance.oversold_factor {
        BandState::Oversold
    } else if close >= upper * tolerance.overheated_factor {
        BandState::Overheated
    } else {
        BandState::Neutral
    }
}

/// Momentum verdict for one MACD row.
///
/// `Uptrend` and `Downtrend` both require the line relation and the
/// histogram sign to agree; every other combination, including exact touches
/// and NaN warmup values, is a `Transition`.
pub fn momentum_state(macd: f64, signal: f64, histogram: f64) -> MomentumState {
    if macd > signal && histogram > 0.0 {
        MomentumState::Uptrend
    } else if macd < signal && histogram < 0.0 {
        MomentumState::Downtrend
    } else {
        MomentumState::Transition
    }
}

/// Classify one indicator row under the given tolerances.
pub fn classify(point: &IndicatorPoint, tolerance: &ToleranceConfig) -> SignalVerdict {
    SignalVerdict {
        band: band_state(point.close, point.lower, point.upper, tolerance),
        momentum: momentum_state(point.macd, point.signal, point.histogram),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::IndicatorSeries;
    use crate::market_data::{PricePoint, PriceSeries};
    use chrono::NaiveDate;

    fn detail() -> ToleranceConfig {
        ToleranceConfig::detail()
    }

    // ---- band_state --------------------------------------------------------

    #[test]
    fn band_oversold_strictly_below() {
        assert_eq!(band_state(95.0, 100.0, 200.0, &detail()), BandState::Oversold);
    }

    #[test]
    fn band_oversold_boundary_inclusive() {
        // lower 100 * 1.02 => threshold exactly 102.
        assert_eq!(band_state(102.0, 100.0, 200.0, &detail()), BandState::Oversold);
        assert_eq!(band_state(102.01, 100.0, 200.0, &detail()), BandState::Neutral);
    }

    #[test]
    fn band_overheated_boundary_inclusive() {
        // upper 200 * 0.98 => threshold exactly 196.
        assert_eq!(band_state(196.0, 100.0, 200.0, &detail()), BandState::Overheated);
        assert_eq!(band_state(195.99, 100.0, 200.0, &detail()), BandState::Neutral);
        assert_eq!(band_state(210.0, 100.0, 200.0, &detail()), BandState::Overheated);
    }

    #[test]
    fn band_collapsed_bands_prefer_oversold() {
        // Flat history collapses both bands onto the close; both tests pass
        // and the oversold branch must win.
        assert_eq!(band_state(100.0, 100.0, 100.0, &detail()), BandState::Oversold);
    }

    #[test]
    fn band_nan_bands_are_neutral() {
        assert_eq!(
            band_state(100.0, f64::NAN, f64::NAN, &detail()),
            BandState::Neutral
        );
        assert_eq!(band_state(100.0, f64::NAN, 200.0, &detail()), BandState::Neutral);
    }

    #[test]
    fn band_wider_tolerance_admits_more() {
        let radar = ToleranceConfig::radar();
        // 102.5 misses the detail threshold (102) but not the radar one (103).
        assert_eq!(band_state(102.5, 100.0, 200.0, &detail()), BandState::Neutral);
        assert_eq!(band_state(102.5, 100.0, 200.0, &radar), BandState::Oversold);
    }

    // ---- momentum_state ----------------------------------------------------

    #[test]
    fn momentum_uptrend() {
        assert_eq!(momentum_state(1.5, 1.0, 0.5), MomentumState::Uptrend);
    }

    #[test]
    fn momentum_downtrend() {
        assert_eq!(momentum_state(-1.5, -1.0, -0.5), MomentumState::Downtrend);
    }

    #[test]
    fn momentum_mixed_is_transition() {
        // Disagreeing line relation and histogram sign.
        assert_eq!(momentum_state(1.5, 1.0, -0.5), MomentumState::Transition);
        assert_eq!(momentum_state(-1.5, -1.0, 0.5), MomentumState::Transition);
    }

    #[test]
    fn momentum_exact_touch_is_transition() {
        assert_eq!(momentum_state(1.0, 1.0, 0.0), MomentumState::Transition);
        assert_eq!(momentum_state(0.0, 0.0, 0.0), MomentumState::Transition);
    }

    #[test]
    fn momentum_nan_is_transition() {
        assert_eq!(momentum_state(f64::NAN, 1.0, 0.5), MomentumState::Transition);
        assert_eq!(
            momentum_state(f64::NAN, f64::NAN, f64::NAN),
            MomentumState::Transition
        );
    }

    // ---- classify ----------------------------------------------------------

    fn series_of(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + chrono::Days::new(i as u64),
                close,
            })
            .collect();
        PriceSeries::new(points).unwrap()
    }

    #[test]
    fn classify_constant_history() {
        // Collapsed bands and a zero MACD stack: oversold by tie-break,
        // transition because nothing is strictly ordered.
        let table = IndicatorSeries::compute(&series_of(&vec![100.0; 60]));
        let verdict = classify(&table.latest().unwrap(), &detail());
        assert_eq!(verdict.band, BandState::Oversold);
        assert_eq!(verdict.momentum, MomentumState::Transition);
    }

    #[test]
    fn classify_warmup_row_is_neutral() {
        // Ten points: bands are still NaN, momentum lines exist but the band
        // verdict must stay neutral.
        let closes: Vec<f64> = (1..=10).map(|x| 100.0 + x as f64).collect();
        let table = IndicatorSeries::compute(&series_of(&closes));
        let verdict = classify(&table.latest().unwrap(), &detail());
        assert_eq!(verdict.band, BandState::Neutral);
    }

    #[test]
    fn classify_steady_rise_is_uptrend() {
        let closes: Vec<f64> = (1..=120).map(|x| 100.0 + x as f64 * 0.8).collect();
        let table = IndicatorSeries::compute(&series_of(&closes));
        let verdict = classify(&table.latest().unwrap(), &detail());
        assert_eq!(verdict.momentum, MomentumState::Uptrend);
    }
}
