// =============================================================================
// Full indicator table for one instrument
// =============================================================================
//
// One `IndicatorSeries` holds every derived column the scanner reads, all
// index-aligned with the close series it was computed from. Rows before the
// Bollinger warmup carry NaN in the band columns while the EMA columns are
// already defined, exactly as the per-column functions produce them.

use serde::Serialize;

use crate::indicators::bollinger::bollinger_series;
use crate::indicators::macd::macd_series;
use crate::market_data::PriceSeries;

// Standard daily-chart parameters.
pub const BOLLINGER_WINDOW: usize = 20;
pub const BOLLINGER_NUM_STD: f64 = 2.0;
pub const MACD_FAST_SPAN: usize = 12;
pub const MACD_SLOW_SPAN: usize = 26;
pub const MACD_SIGNAL_SPAN: usize = 9;

/// All indicator columns for one instrument, index-aligned with its closes.
#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    close: Vec<f64>,
    sma: Vec<f64>,
    std_dev: Vec<f64>,
    upper: Vec<f64>,
    lower: Vec<f64>,
    ema_fast: Vec<f64>,
    ema_slow: Vec<f64>,
    macd: Vec<f64>,
    signal: Vec<f64>,
    histogram: Vec<f64>,
}

/// One row of the indicator table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndicatorPoint {
    pub close: f64,
    pub sma: f64,
    pub std_dev: f64,
    pub upper: f64,
    pub lower: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

impl IndicatorSeries {
    /// Compute every column for the given price history.
    ///
    /// An empty series produces an empty table; no row is ever dropped, so
    /// the table length always equals the input length.
    pub fn compute(series: &PriceSeries) -> Self {
        let close = series.closes();
        let bands = bollinger_series(&close, BOLLINGER_WINDOW, BOLLINGER_NUM_STD);
        let macd = macd_series(&close, MACD_FAST_SPAN, MACD_SLOW_SPAN, MACD_SIGNAL_SPAN);

        Self {
            close,
            sma: bands.sma,
            std_dev: bands.std_dev,
            upper: bands.upper,
            lower: bands.lower,
            ema_fast: macd.ema_fast,
            ema_slow: macd.ema_slow,
            macd: macd.macd,
            signal: macd.signal,
            histogram: macd.histogram,
        }
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Row at `idx`, or `None` past the end of the table.
    pub fn point(&self, idx: usize) -> Option<IndicatorPoint> {
        if idx >= self.close.len() {
            return None;
        }
        Some(IndicatorPoint {
            close: self.close[idx],
            sma: self.sma[idx],
            std_dev: self.std_dev[idx],
            upper: self.upper[idx],
            lower: self.lower[idx],
            ema_fast: self.ema_fast[idx],
            ema_slow: self.ema_slow[idx],
            macd: self.macd[idx],
            signal: self.signal[idx],
            histogram: self.histogram[idx],
        })
    }

    /// Most recent row, or `None` for an empty table.
    pub fn latest(&self) -> Option<IndicatorPoint> {
        if self.close.is_empty() {
            None
        } else {
            self.point(self.close.len() - 1)
        }
    }
}
