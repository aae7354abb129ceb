// =============================================================================
// Scanner Configuration — file-backed settings with full serde defaults
// =============================================================================
//
// Every tunable parameter of the scanner lives here. All fields carry
// `#[serde(default)]` so that adding new fields never breaks loading an older
// config file, and a missing file just means "run with defaults".
//
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_oversold_factor() -> f64 {
    1.02
}

fn default_overheated_factor() -> f64 {
    0.98
}

fn default_range() -> String {
    "1y".to_string()
}

// =============================================================================
// ToleranceConfig
// =============================================================================

/// Band-tolerance pair for the classifier.
///
/// A close counts as oversold up to `oversold_factor` times the lower band
/// and as overheated down to `overheated_factor` times the upper band. Both
/// comparisons are inclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToleranceConfig {
    /// Multiplier widening the lower band (1.02 = 2 % above it still counts).
    #[serde(default = "default_oversold_factor")]
    pub oversold_factor: f64,

    /// Multiplier tightening the upper band (0.98 = 2 % below it already counts).
    #[serde(default = "default_overheated_factor")]
    pub overheated_factor: f64,
}

impl ToleranceConfig {
    /// Tolerances for the single-instrument detail view.
    pub fn detail() -> Self {
        Self {
            oversold_factor: 1.02,
            overheated_factor: 0.98,
        }
    }

    /// Wider oversold net for the batch radar, so near-misses still surface.
    pub fn radar() -> Self {
        Self {
            oversold_factor: 1.03,
            overheated_factor: 0.98,
        }
    }
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self::detail()
    }
}

// =============================================================================
// RadarConfig
// =============================================================================

/// Top-level configuration for the scanner.
///
/// Every field has a serde default so that older JSON files missing new
/// fields will still deserialise correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarConfig {
    /// Tolerances applied by the single-instrument detail view.
    #[serde(default = "ToleranceConfig::detail")]
    pub detail_tolerance: ToleranceConfig,

    /// Tolerances applied by the batch radar.
    #[serde(default = "ToleranceConfig::radar")]
    pub radar_tolerance: ToleranceConfig,

    /// Chart range requested from the data source (e.g. "1y", "6mo").
    #[serde(default = "default_range")]
    pub range: String,

    /// Optional path to a "SYMBOL;Name" watchlist file. `None` means the
    /// built-in GPW universe.
    #[serde(default)]
    pub watchlist_path: Option<String>,

    /// Maximum in-flight history fetches during a radar scan.
    /// 0 means "use the number of available CPUs".
    #[serde(default)]
    pub radar_concurrency: usize,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            detail_tolerance: ToleranceConfig::detail(),
            radar_tolerance: ToleranceConfig::radar(),
            range: default_range(),
            watchlist_path: None,
            radar_concurrency: 0,
        }
    }
}

impl RadarConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        info!(
            path = %path.display(),
            range = %config.range,
            radar_oversold = config.radar_tolerance.oversold_factor,
            "config loaded"
        );

        Ok(config)
    }

    /// Concurrency limit for the radar fetch phase, never zero.
    pub fn effective_concurrency(&self) -> usize {
        if self.radar_concurrency > 0 {
            return self.radar_concurrency;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }
}
