// =============================================================================
// Instrument watchlist
// =============================================================================
//
// The radar scans a fixed universe of instruments: either the built-in GPW
// blue-chip list below or a user-supplied file with one "SYMBOL;Name" line
// per instrument. The same list backs free-text query resolution, so "orlen"
// and "PKN" land on the same entry a file or the default universe defines.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Built-in scan universe: WIG20 core names, two Warsaw-listed ETFs, and a
/// few US references.
const DEFAULT_GPW: &[(&str, &str)] = &[
    ("PKN.WA", "Orlen S.A."),
    ("PKO.WA", "PKO Bank Polski"),
    ("PEO.WA", "Bank Pekao S.A."),
    ("CDR.WA", "CD Projekt S.A."),
    ("DNP.WA", "Dino Polska S.A."),
    ("ALE.WA", "Allegro.eu"),
    ("PZU.WA", "PZU S.A."),
    ("LPP.WA", "LPP S.A."),
    ("KGH.WA", "KGHM Polska Miedź"),
    ("MBK.WA", "mBank S.A."),
    ("XTB.WA", "XTB S.A."),
    ("JSW.WA", "Jastrzębska Spółka Węglowa"),
    ("DIG.WA", "Digital Network S.A."),
    ("ETFW20L.WA", "Beta ETF WIG20lev"),
    ("ETFSP500.WA", "Beta ETF S&P 500"),
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corp."),
    ("TSLA", "Tesla Inc."),
];

/// One scannable instrument: exchange symbol plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchlistEntry {
    pub symbol: String,
    pub name: String,
}

/// Ordered instrument universe for the radar and for query resolution.
#[derive(Debug, Clone)]
pub struct Watchlist {
    entries: Vec<WatchlistEntry>,
}

impl Watchlist {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    /// The built-in GPW universe.
    pub fn default_gpw() -> Self {
        let entries = DEFAULT_GPW
            .iter()
            .map(|&(symbol, name)| WatchlistEntry {
                symbol: symbol.to_string(),
                name: name.to_string(),
            })
            .collect();
        Self { entries }
    }

    /// Load a watchlist file: one "SYMBOL;Name" line per instrument.
    ///
    /// Blank lines and '#' comments are allowed. Malformed lines are skipped,
    /// never fatal; only an unreadable file is an error.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read watchlist file '{path}'"))?;
        let watchlist = Self::parse(&content);
        info!(path, count = watchlist.len(), "watchlist loaded");
        if watchlist.is_empty() {
            warn!(path, "watchlist file contains no usable entries");
        }
        Ok(watchlist)
    }

    /// Parse watchlist content, skipping anything that is not a
    /// "SYMBOL;Name" line.
    pub fn parse(content: &str) -> Self {
        let mut entries = Vec::new();

        for (line_no, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((symbol, name)) = line.split_once(';') else {
                debug!(line = line_no + 1, "watchlist line has no ';' separator, skipped");
                continue;
            };

            let symbol = symbol.trim();
            if symbol.is_empty() {
                debug!(line = line_no + 1, "watchlist line has empty symbol, skipped");
                continue;
            }

            let name = name.trim();
            entries.push(WatchlistEntry {
                symbol: symbol.to_string(),
                // A missing name is not worth rejecting the symbol over.
                name: if name.is_empty() { symbol } else { name }.to_string(),
            });
        }

        Self { entries }
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a free-text query against the list.
    ///
    /// Matches, in order of preference: the exact symbol, the symbol stem
    /// before the exchange suffix (spaces in the query ignored), then a
    /// substring of the display name. All comparisons are case-insensitive,
    /// so "orlen", "PKN" and "pkn.wa" all land on the same entry.
    pub fn resolve(&self, query: &str) -> Option<&WatchlistEntry> {
        let q = query.trim().to_uppercase();
        if q.is_empty() {
            return None;
        }
        let compact = q.replace(' ', "");

        let stem = |symbol: &str| {
            symbol
                .split('.')
                .next()
                .unwrap_or(symbol)
                .to_uppercase()
        };

        self.entries
            .iter()
            .find(|e| e.symbol.to_uppercase() == q)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| stem(&e.symbol) == q || stem(&e.symbol) == compact)
            })
            .or_else(|| self.entries.iter().find(|e| e.name.to_uppercase().contains(&q)))
    }
}
