//! Model Module - lead conversion classifier
//!
//! The artifact is produced by an external training job and loaded once at
//! startup. Everything here is read-only after load.

pub mod inference;
pub mod pipeline;
pub mod threshold;

// Re-export common types
pub use inference::{Classifier, FeatureValue, ModelError, Record};
pub use pipeline::{DictVectorizer, LogisticRegression, Pipeline};
pub use threshold::{decide, DECISION_THRESHOLD};
