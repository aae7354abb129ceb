// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicator columns the scanner
// reads. Every function returns full-length output aligned index-for-index
// with its input; warmup rows carry NaN instead of being dropped, so callers
// never have to re-align series of different lengths.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rolling;
pub mod series;

pub use series::{IndicatorPoint, IndicatorSeries};
