// =============================================================================
// Signals Module
// =============================================================================
//
// Signal pipeline for the scanner:
// - Band / momentum classification of one indicator snapshot
// - Tiering of the two radar flags into a ranked quality grade
// - Batch ranking of classified candidates

pub mod classify;
pub mod ranker;
pub mod tier;

pub use classify::{band_state, classify, momentum_state};
pub use ranker::{rank, RadarCandidate};
pub use tier::SignalTier;
