// =============================================================================
// Daily price history for one instrument
// =============================================================================
//
// A `PriceSeries` is the validated form every downstream consumer works with:
// strictly increasing trading dates, one close per date. Construction is the
// only place ordering is checked; once a series exists, indicator code can
// rely on it without re-validating.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// One daily observation: trading date plus closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Rejected series construction: dates must be strictly increasing.
#[derive(Debug, Error)]
#[error("price series out of order at index {index}: {date} does not advance")]
pub struct SeriesOrderError {
    pub index: usize,
    pub date: NaiveDate,
}

/// Chronologically ordered daily closes for one instrument.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from already-sorted points.
    ///
    /// Fails on the first date that is not strictly greater than its
    /// predecessor (duplicates included). An empty series is valid.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SeriesOrderError> {
        for (i, pair) in points.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(SeriesOrderError {
                    index: i + 1,
                    date: pair[1].date,
                });
            }
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Closing prices in date order, ready for the indicator functions.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }
}
