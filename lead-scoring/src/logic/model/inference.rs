//! Inference seam between the HTTP layer and the loaded model.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

/// One attribute of an input record.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Category(String),
}

/// Flat mapping of named attributes describing one entity to score.
pub type Record = BTreeMap<String, FeatureValue>;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model has {features} features but {coefficients} coefficients")]
    ShapeMismatch { features: usize, coefficients: usize },

    #[error("duplicate feature name in model artifact: {0}")]
    DuplicateFeature(String),

    #[error("non-finite {0} in model artifact")]
    NonFinite(&'static str),

    #[error("checksum mismatch for {}: expected {expected}, got {actual}", .path.display())]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("model produced a probability that is not a number")]
    InvalidOutput,
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Binary classifier exposing the positive-class probability.
///
/// Implementations are immutable after construction and shared across
/// request handlers without locking.
pub trait Classifier: Send + Sync {
    /// Probability in `[0, 1]` that `record` belongs to the positive class.
    fn predict_proba(&self, record: &Record) -> Result<f64, ModelError>;
}
