// =============================================================================
// Radar candidate ranking
// =============================================================================
//
// Pure ordering step of the radar: candidates that earned no tier are
// dropped, the rest are sorted best-first. The sort is stable, so candidates
// sharing a tier keep the order the watchlist gave them.

use serde::Serialize;
use tracing::debug;

use crate::signals::tier::SignalTier;
use crate::types::{BandState, MomentumState};

/// One graded instrument in the radar report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarCandidate {
    pub symbol: String,
    pub name: String,
    pub close: f64,
    pub band: BandState,
    pub momentum: MomentumState,
    pub tier: SignalTier,
}

/// Drop ungraded candidates and sort the rest best tier first.
pub fn rank(mut candidates: Vec<RadarCandidate>) -> Vec<RadarCandidate> {
    candidates.retain(|c| {
        if c.tier == SignalTier::None {
            debug!(symbol = %c.symbol, "no active radar flags, dropped");
            false
        } else {
            true
        }
    });

    // Vec::sort_by is stable: ties keep watchlist order.
    candidates.sort_by(|a, b| b.tier.rank().cmp(&a.tier.rank()));
    candidates
}
