// =============================================================================
// Signal quality tiers
// =============================================================================
//
// The radar grades each candidate from its two flags: "oversoldish" (band
// verdict under the widened radar tolerance) and "uptrendish" (momentum
// verdict). Ordering between tiers is carried by an explicit numeric rank,
// not by comparing the display labels; the labels still happen to sort in
// rank order, which older report consumers relied on.

use serde::Serialize;

use crate::types::{BandState, MomentumState};

/// Quality grade of one radar candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalTier {
    /// Oversold and in an uptrend.
    Strong,
    /// In an uptrend only.
    Good,
    /// Oversold only.
    Weak,
    /// Neither flag set; dropped from the radar.
    None,
}

impl SignalTier {
    /// Grade a candidate from its two radar flags.
    pub fn from_flags(oversoldish: bool, uptrendish: bool) -> Self {
        match (oversoldish, uptrendish) {
            (true, true) => Self::Strong,
            (false, true) => Self::Good,
            (true, false) => Self::Weak,
            (false, false) => Self::None,
        }
    }

    /// Grade a candidate directly from its verdicts.
    pub fn from_verdicts(band: BandState, momentum: MomentumState) -> Self {
        Self::from_flags(
            band == BandState::Oversold,
            momentum == MomentumState::Uptrend,
        )
    }

    /// Sort key: higher is better.
    pub fn rank(self) -> u8 {
        match self {
            Self::Strong => 3,
            Self::Good => 2,
            Self::Weak => 1,
            Self::None => 0,
        }
    }

    /// Human-facing label, star glyphs included.
    pub fn label(self) -> &'static str {
        match self {
            Self::Strong => "⭐⭐⭐ STRONG",
            Self::Good => "⭐⭐ GOOD",
            Self::Weak => "⭐ WEAK",
            Self::None => "NONE",
        }
    }
}

impl std::fmt::Display for SignalTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    // ---- from_flags --------------------------------------------------------

    #[test]
    fn flags_map_to_tiers() {
        assert_eq!(SignalTier::from_flags(true, true), SignalTier::Strong);
        assert_eq!(SignalTier::from_flags(false, true), SignalTier::Good);
        assert_eq!(SignalTier::from_flags(true, false), SignalTier::Weak);
        assert_eq!(SignalTier::from_flags(false, false), SignalTier::None);
    }

    #[test]
    fn verdicts_map_like_flags() {
        assert_eq!(
            SignalTier::from_verdicts(BandState::Oversold, MomentumState::Uptrend),
            SignalTier::Strong
        );
        assert_eq!(
            SignalTier::from_verdicts(BandState::Neutral, MomentumState::Uptrend),
            SignalTier::Good
        );
        assert_eq!(
            SignalTier::from_verdicts(BandState::Oversold, MomentumState::Downtrend),
            SignalTier::Weak
        );
        assert_eq!(
            SignalTier::from_verdicts(BandState::Overheated, MomentumState::Transition),
            SignalTier::None
        );
    }

    // ---- rank / label ------------------------------------------------------

    #[test]
    fn rank_is_strictly_ordered() {
        assert!(SignalTier::Strong.rank() > SignalTier::Good.rank());
        assert!(SignalTier::Good.rank() > SignalTier::Weak.rank());
        assert!(SignalTier::Weak.rank() > SignalTier::None.rank());
    }

    #[test]
    fn labels_sort_in_rank_order() {
        // Older report consumers sorted rows by the label text. The explicit
        // rank replaced that, but the labels must keep agreeing with it.
        let mut by_label = [SignalTier::Weak, SignalTier::Strong, SignalTier::None, SignalTier::Good];
        by_label.sort_by(|a, b| b.label().cmp(a.label()));
        let mut by_rank = by_label;
        by_rank.sort_by(|a, b| b.rank().cmp(&a.rank()));
        assert_eq!(by_label, by_rank);
    }
}
