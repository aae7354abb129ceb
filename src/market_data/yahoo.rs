// =============================================================================
// Yahoo Finance chart API client
// =============================================================================
//
// Fetches daily OHLC history from the public v8 chart endpoint and reduces it
// to a validated `PriceSeries` of (date, close) pairs. Warsaw listings carry
// the ".WA" suffix; when such a symbol yields no data, the client retries the
// bare US listing once and reports which identifier actually served the data.
// =============================================================================

use chrono::DateTime;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::market_data::history::{PricePoint, PriceSeries};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// Yahoo rejects requests without a browser-like user agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Everything that can go wrong fetching one instrument's history.
///
/// Every variant names the symbol it concerns so batch callers can log and
/// skip without extra bookkeeping.
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("no data found for '{symbol}'")]
    NoData { symbol: String },

    #[error("chart request for '{symbol}' failed: {source}")]
    Http {
        symbol: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("chart request for '{symbol}' returned HTTP {status}")]
    Status {
        symbol: String,
        status: reqwest::StatusCode,
    },

    #[error("malformed chart payload for '{symbol}': {reason}")]
    Malformed { symbol: String, reason: String },
}

/// Canonical form of a user-typed instrument query.
///
/// Uppercases and trims, then appends the Warsaw ".WA" suffix unless the
/// query already carries an exchange suffix (any dot) or names an index
/// (leading caret).
pub fn normalize_symbol(query: &str) -> String {
    let q = query.trim().to_uppercase();
    if q.contains('.') || q.starts_with('^') {
        q
    } else {
        format!("{q}.WA")
    }
}

/// Thin client over the Yahoo v8 chart endpoint.
#[derive(Debug, Clone)]
pub struct YahooChartClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for YahooChartClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooChartClient {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build reqwest client");

        debug!("YahooChartClient initialised (base_url={DEFAULT_BASE_URL})");

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        }
    }

    // -------------------------------------------------------------------------
    // Chart history
    // -------------------------------------------------------------------------

    /// GET /v8/finance/chart/{symbol} — daily closes over `range` (e.g. "1y").
    #[instrument(skip(self), name = "yahoo::daily_history")]
    pub async fn daily_history(
        &self,
        symbol: &str,
        range: &str,
    ) -> Result<PriceSeries, MarketDataError> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            self.base_url, symbol, range
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| MarketDataError::Http {
                symbol: symbol.to_string(),
                source,
            })?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|source| MarketDataError::Http {
                symbol: symbol.to_string(),
                source,
            })?;

        match parse_chart_response(symbol, &body) {
            Ok(series) => {
                debug!(symbol, count = series.len(), "daily history fetched");
                Ok(series)
            }
            // A failed request usually carries an HTML error page, not chart
            // JSON. Report the status instead of the parse noise.
            Err(MarketDataError::Malformed { .. }) if !status.is_success() => {
                Err(MarketDataError::Status {
                    symbol: symbol.to_string(),
                    status,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Like [`daily_history`], but when a ".WA" symbol yields no data, retry
    /// the bare US listing once.
    ///
    /// Returns the identifier that actually served the data alongside the
    /// series, so reports can show which listing they describe.
    ///
    /// [`daily_history`]: Self::daily_history
    pub async fn daily_history_with_fallback(
        &self,
        symbol: &str,
        range: &str,
    ) -> Result<(String, PriceSeries), MarketDataError> {
        match self.daily_history(symbol, range).await {
            Ok(series) => Ok((symbol.to_string(), series)),
            Err(MarketDataError::NoData { .. }) => match fallback_symbol(symbol) {
                Some(us_symbol) => {
                    warn!(
                        symbol,
                        fallback = us_symbol,
                        "no data for Warsaw listing, retrying US listing"
                    );
                    let series = self.daily_history(us_symbol, range).await?;
                    Ok((us_symbol.to_string(), series))
                }
                None => Err(MarketDataError::NoData {
                    symbol: symbol.to_string(),
                }),
            },
            Err(e) => Err(e),
        }
    }
}

/// US-listing retry identifier for a Warsaw symbol, if one exists.
fn fallback_symbol(symbol: &str) -> Option<&str> {
    match symbol.strip_suffix(".WA") {
        Some(stem) if !stem.is_empty() => Some(stem),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// Payload parsing
// -----------------------------------------------------------------------------

/// Reduce a v8 chart payload to a validated `PriceSeries`.
///
/// Yahoo reports unknown symbols as a JSON-level error object (often under
/// HTTP 404) and thin histories with missing sessions as null closes; null
/// closes are dropped, an entirely empty result is `NoData`.
fn parse_chart_response(symbol: &str, body: &str) -> Result<PriceSeries, MarketDataError> {
    let malformed = |reason: String| MarketDataError::Malformed {
        symbol: symbol.to_string(),
        reason,
    };
    let no_data = || MarketDataError::NoData {
        symbol: symbol.to_string(),
    };

    let root: serde_json::Value =
        serde_json::from_str(body).map_err(|e| malformed(format!("invalid JSON: {e}")))?;

    let chart = root
        .get("chart")
        .ok_or_else(|| malformed("missing 'chart' object".into()))?;

    if !chart["error"].is_null() {
        return Err(no_data());
    }

    let result = match chart["result"].as_array() {
        Some(arr) if !arr.is_empty() => &arr[0],
        _ => return Err(no_data()),
    };

    let timestamps = match result["timestamp"].as_array() {
        Some(arr) if !arr.is_empty() => arr,
        // Yahoo omits the timestamp column entirely for empty ranges.
        _ => return Err(no_data()),
    };

    let closes = result["indicators"]["quote"][0]["close"]
        .as_array()
        .ok_or_else(|| malformed("missing 'indicators.quote[0].close' column".into()))?;

    if closes.len() != timestamps.len() {
        return Err(malformed(format!(
            "column length mismatch: {} timestamps vs {} closes",
            timestamps.len(),
            closes.len()
        )));
    }

    let mut points = Vec::with_capacity(timestamps.len());
    for (ts_val, close_val) in timestamps.iter().zip(closes.iter()) {
        // Null closes mark sessions without a price (halts, thin listings).
        if close_val.is_null() {
            continue;
        }
        let ts = ts_val
            .as_i64()
            .ok_or_else(|| malformed(format!("non-integer timestamp: {ts_val}")))?;
        let close = close_val
            .as_f64()
            .ok_or_else(|| malformed(format!("non-numeric close: {close_val}")))?;
        let date = DateTime::from_timestamp(ts, 0)
            .ok_or_else(|| malformed(format!("timestamp out of range: {ts}")))?
            .date_naive();
        points.push(PricePoint { date, close });
    }

    if points.is_empty() {
        return Err(no_data());
    }

    PriceSeries::new(points).map_err(|e| malformed(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    // ---- normalize_symbol --------------------------------------------------

    #[test]
    fn normalize_appends_warsaw_suffix() {
        assert_eq!(normalize_symbol("pkn"), "PKN.WA");
        assert_eq!(normalize_symbol("  cdr "), "CDR.WA");
    }

    #[test]
    fn normalize_keeps_existing_suffix() {
        assert_eq!(normalize_symbol("pko.wa"), "PKO.WA");
        assert_eq!(normalize_symbol("BRK.B"), "BRK.B");
    }

    #[test]
    fn normalize_keeps_index_caret() {
        assert_eq!(normalize_symbol("^spx"), "^SPX");
    }

    // ---- fallback_symbol ---------------------------------------------------

    #[test]
    fn fallback_strips_warsaw_suffix_only() {
        assert_eq!(fallback_symbol("PKN.WA"), Some("PKN"));
        assert_eq!(fallback_symbol("ETFSP500.WA"), Some("ETFSP500"));
        assert_eq!(fallback_symbol("AAPL"), None);
        assert_eq!(fallback_symbol("BRK.B"), None);
        assert_eq!(fallback_symbol(".WA"), None);
    }

    // ---- parse_chart_response ----------------------------------------------

    /// Fixture shaped like a real (truncated) v8 chart payload.
    fn chart_body(timestamps: &str, closes: &str) -> String {
        format!(
            r#"{{"chart":{{"result":[{{"meta":{{"currency":"PLN","symbol":"PKN.WA"}},"timestamp":{timestamps},"indicators":{{"quote":[{{"close":{closes}}}]}}}}],"error":null}}}}"#
        )
    }

    #[test]
    fn parse_valid_payload() {
        // 2024-01-02, 2024-01-03, 2024-01-04 as UTC epoch seconds.
        let body = chart_body(
            "[1704182400,1704268800,1704355200]",
            "[64.1,64.9,63.75]",
        );
        let series = parse_chart_response("PKN.WA", &body).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.last().unwrap().close, 63.75);
        assert_eq!(
            series.points()[0].date,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }

    #[test]
    fn parse_skips_null_closes() {
        let body = chart_body("[1704182400,1704268800,1704355200]", "[64.1,null,63.75]");
        let series = parse_chart_response("PKN.WA", &body).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![64.1, 63.75]);
    }

    #[test]
    fn parse_error_object_is_no_data() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_chart_response("XYZ.WA", body).unwrap_err();
        assert!(matches!(err, MarketDataError::NoData { symbol } if symbol == "XYZ.WA"));
    }

    #[test]
    fn parse_empty_result_is_no_data() {
        let body = r#"{"chart":{"result":[],"error":null}}"#;
        assert!(matches!(
            parse_chart_response("XYZ.WA", body),
            Err(MarketDataError::NoData { .. })
        ));
    }

    #[test]
    fn parse_all_null_closes_is_no_data() {
        let body = chart_body("[1704182400,1704268800]", "[null,null]");
        assert!(matches!(
            parse_chart_response("XYZ.WA", &body),
            Err(MarketDataError::NoData { .. })
        ));
    }

    #[test]
    fn parse_missing_chart_is_malformed() {
        let err = parse_chart_response("PKN.WA", r#"{"finance":{}}"#).unwrap_err();
        assert!(matches!(err, MarketDataError::Malformed { .. }));
    }

    #[test]
    fn parse_length_mismatch_is_malformed() {
        let body = chart_body("[1704182400,1704268800]", "[64.1]");
        let err = parse_chart_response("PKN.WA", &body).unwrap_err();
        assert!(matches!(err, MarketDataError::Malformed { .. }));
    }

    #[test]
    fn parse_unsorted_timestamps_is_malformed() {
        let body = chart_body("[1704268800,1704182400]", "[64.1,64.9]");
        let err = parse_chart_response("PKN.WA", &body).unwrap_err();
        assert!(matches!(err, MarketDataError::Malformed { .. }));
    }

    #[test]
    fn parse_garbage_body_is_malformed() {
        let err = parse_chart_response("PKN.WA", "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, MarketDataError::Malformed { .. }));
    }
}
