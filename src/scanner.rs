// =============================================================================
// Scan orchestration — detail view and batch radar
// =============================================================================
//
// Two entry points sit on top of the indicator and signal layers:
//
// - `scan_symbol` resolves one free-text query, fetches its history, and
//   classifies the latest row under the detail tolerances.
// - `run_radar` fetches the whole watchlist with bounded concurrency, then
//   hands the results to `rank_batch`, which grades and orders them.
//
// `rank_batch` is deliberately pure over already-fetched rows: one broken
// instrument only ever costs its own row, and the whole grading path is
// testable without a network.
// =============================================================================

use chrono::NaiveDate;
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::RadarConfig;
use crate::indicators::{IndicatorPoint, IndicatorSeries};
use crate::market_data::{
    normalize_symbol, MarketDataError, PriceSeries, Watchlist, WatchlistEntry, YahooChartClient,
};
use crate::signals::{classify, rank, RadarCandidate, SignalTier};
use crate::types::{BandState, MomentumState};

/// Minimum history length before a radar verdict is worth publishing.
/// Anything shorter is mostly warmup NaN and would grade on noise.
pub const MIN_RADAR_HISTORY: usize = 50;

/// Why one instrument produced no verdict.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("insufficient history: need at least {required} points, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    #[error(transparent)]
    MarketData(#[from] MarketDataError),
}

/// Detail-view result for a single instrument.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub query: String,
    pub symbol: String,
    pub name: String,
    pub date: NaiveDate,
    pub band: BandState,
    pub momentum: MomentumState,
    pub snapshot: IndicatorPoint,
}

/// One watchlist entry the radar could not grade.
#[derive(Debug, Clone, Serialize)]
pub struct RadarSkip {
    pub symbol: String,
    pub name: String,
    pub message: String,
}

/// Full outcome of one radar pass.
#[derive(Debug, Clone, Serialize)]
pub struct RadarReport {
    pub candidates: Vec<RadarCandidate>,
    pub skips: Vec<RadarSkip>,
    pub scanned: usize,
}

// -----------------------------------------------------------------------------
// Detail view
// -----------------------------------------------------------------------------

/// Classify one instrument from a free-text query.
///
/// The query is resolved against the watchlist first (symbol, stem, or name
/// fragment); unknown queries fall back to Warsaw symbol normalisation, so
/// any ticker can be scanned, listed in the universe or not.
pub async fn scan_symbol(
    client: &YahooChartClient,
    watchlist: &Watchlist,
    config: &RadarConfig,
    query: &str,
) -> Result<ScanReport, ScanError> {
    let (symbol, name) = match watchlist.resolve(query) {
        Some(entry) => (entry.symbol.clone(), entry.name.clone()),
        None => {
            let symbol = normalize_symbol(query);
            (symbol.clone(), symbol)
        }
    };

    info!(query, symbol = %symbol, "detail scan starting");

    let (served_symbol, series) = client
        .daily_history_with_fallback(&symbol, &config.range)
        .await?;

    // A fallback hit serves a different listing whose display name we do not
    // know; show the symbol that actually answered.
    let name = if served_symbol == symbol {
        name
    } else {
        served_symbol.clone()
    };

    let table = IndicatorSeries::compute(&series);
    let (snapshot, date) = match (table.latest(), series.last()) {
        (Some(snapshot), Some(point)) => (snapshot, point.date),
        _ => {
            return Err(MarketDataError::NoData {
                symbol: served_symbol,
            }
            .into())
        }
    };

    let verdict = classify(&snapshot, &config.detail_tolerance);

    info!(
        symbol = %served_symbol,
        close = snapshot.close,
        band = %verdict.band,
        momentum = %verdict.momentum,
        "detail scan complete"
    );

    Ok(ScanReport {
        query: query.to_string(),
        symbol: served_symbol,
        name,
        date,
        band: verdict.band,
        momentum: verdict.momentum,
        snapshot,
    })
}

// -----------------------------------------------------------------------------
// Batch radar
// -----------------------------------------------------------------------------

/// Grade one fetched instrument under the radar tolerances.
pub fn evaluate_candidate(
    entry: &WatchlistEntry,
    series: &PriceSeries,
    config: &RadarConfig,
) -> Result<RadarCandidate, ScanError> {
    if series.len() < MIN_RADAR_HISTORY {
        return Err(ScanError::InsufficientHistory {
            required: MIN_RADAR_HISTORY,
            actual: series.len(),
        });
    }

    let table = IndicatorSeries::compute(series);
    let snapshot = match table.latest() {
        Some(snapshot) => snapshot,
        None => {
            return Err(ScanError::InsufficientHistory {
                required: MIN_RADAR_HISTORY,
                actual: 0,
            })
        }
    };

    let verdict = classify(&snapshot, &config.radar_tolerance);

    Ok(RadarCandidate {
        symbol: entry.symbol.clone(),
        name: entry.name.clone(),
        close: snapshot.close,
        band: verdict.band,
        momentum: verdict.momentum,
        tier: SignalTier::from_verdicts(verdict.band, verdict.momentum),
    })
}

/// Grade and order a batch of already-fetched rows.
///
/// Every row is resolved independently: a fetch error or short history turns
/// into a skip record, never into an aborted pass. Ungraded candidates are
/// dropped and the rest come back best tier first, watchlist order preserved
/// within a tier.
pub fn rank_batch(
    rows: Vec<(WatchlistEntry, Result<PriceSeries, MarketDataError>)>,
    config: &RadarConfig,
) -> RadarReport {
    let scanned = rows.len();
    let mut candidates = Vec::new();
    let mut skips = Vec::new();

    for (entry, fetched) in rows {
        let outcome = fetched
            .map_err(ScanError::from)
            .and_then(|series| evaluate_candidate(&entry, &series, config));

        match outcome {
            Ok(candidate) => candidates.push(candidate),
            Err(e) => {
                warn!(symbol = %entry.symbol, error = %e, "radar candidate skipped");
                skips.push(RadarSkip {
                    symbol: entry.symbol,
                    name: entry.name,
                    message: e.to_string(),
                });
            }
        }
    }

    RadarReport {
        candidates: rank(candidates),
        skips,
        scanned,
    }
}

/// Fetch the whole watchlist and grade it.
///
/// Fetches run through an order-preserving buffered stream, so the rows
/// reach `rank_batch` in watchlist order no matter which responses land
/// first.
pub async fn run_radar(
    client: &YahooChartClient,
    watchlist: &Watchlist,
    config: &RadarConfig,
) -> RadarReport {
    let limit = config.effective_concurrency();
    info!(
        entries = watchlist.len(),
        concurrency = limit,
        range = %config.range,
        "radar scan starting"
    );

    let range = config.range.as_str();
    let rows: Vec<(WatchlistEntry, Result<PriceSeries, MarketDataError>)> =
        stream::iter(watchlist.entries().iter().cloned())
            .map(|entry| async move {
                let fetched = client
                    .daily_history_with_fallback(&entry.symbol, range)
                    .await
                    .map(|(served_symbol, series)| {
                        if served_symbol != entry.symbol {
                            debug!(
                                symbol = %entry.symbol,
                                served = %served_symbol,
                                "radar row served by fallback listing"
                            );
                        }
                        series
                    });
                (entry, fetched)
            })
            .buffered(limit)
            .collect()
            .await;

    let report = rank_batch(rows, config);
    info!(
        ranked = report.candidates.len(),
        skipped = report.skips.len(),
        "radar scan complete"
    );
    report
}
