// =============================================================================
// Shared types used across the GPW radar scanner
// =============================================================================

use serde::{Deserialize, Serialize};

/// Where the latest close sits relative to the Bollinger bands.
///
/// Boundary arithmetic is inclusive on both tolerance edges; when collapsed
/// bands make both sides true at once, `Oversold` wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandState {
    Oversold,
    Overheated,
    Neutral,
}

impl Default for BandState {
    fn default() -> Self {
        Self::Neutral
    }
}

impl std::fmt::Display for BandState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Oversold => write!(f, "OVERSOLD"),
            Self::Overheated => write!(f, "OVERHEATED"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Directional read of the MACD line against its signal line.
///
/// `Transition` covers every mixed case, including exact line touches and
/// undefined (NaN) inputs during warmup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MomentumState {
    Uptrend,
    Downtrend,
    Transition,
}

impl Default for MomentumState {
    fn default() -> Self {
        Self::Transition
    }
}

impl std::fmt::Display for MomentumState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uptrend => write!(f, "UPTREND"),
            Self::Downtrend => write!(f, "DOWNTREND"),
            Self::Transition => write!(f, "TRANSITION"),
        }
    }
}

/// Combined classification of a single indicator snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalVerdict {
    pub band: BandState,
    pub momentum: MomentumState,
}
