//! Decision threshold
//!
//! Maps a positive-class probability to a yes/no decision.

/// Fixed cutoff. Probabilities at or above it are a positive decision.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// `true` when `probability >= DECISION_THRESHOLD`.
pub fn decide(probability: f64) -> bool {
    probability >= DECISION_THRESHOLD
}
