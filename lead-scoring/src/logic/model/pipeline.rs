//! Vectorizer + logistic regression pipeline
//!
//! The training job exports its fitted pipeline as JSON:
//!
//! ```json
//! {
//!   "vectorizer": { "feature_names": ["annual_income", "lead_source=ads", "..."] },
//!   "classifier": { "coefficients": [0.0000055, -0.31, "..."], "intercept": -1.5 }
//! }
//! ```
//!
//! If a `<artifact>.sha256` file sits next to the artifact, the artifact
//! bytes must hash to the digest it contains.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array1;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::inference::{Classifier, FeatureValue, ModelError, Record};

// ============================================================================
// ARTIFACT FORMAT
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PipelineArtifact {
    vectorizer: VectorizerArtifact,
    classifier: ClassifierArtifact,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VectorizerArtifact {
    feature_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClassifierArtifact {
    coefficients: Vec<f64>,
    intercept: f64,
}

// ============================================================================
// VECTORIZER
// ============================================================================

/// Turns a [`Record`] into a dense feature vector.
///
/// Numeric attributes keep their name; categorical attributes become a
/// one-hot `name=value` feature. Names outside the fitted vocabulary are
/// dropped.
#[derive(Debug, Clone)]
pub struct DictVectorizer {
    feature_names: Vec<String>,
    index: HashMap<String, usize>,
}

impl DictVectorizer {
    pub fn new(feature_names: Vec<String>) -> Result<Self, ModelError> {
        let mut index = HashMap::with_capacity(feature_names.len());
        for (i, name) in feature_names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(ModelError::DuplicateFeature(name.clone()));
            }
        }

        Ok(Self { feature_names, index })
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn transform(&self, record: &Record) -> Array1<f64> {
        let mut x = Array1::zeros(self.feature_names.len());

        for (name, value) in record {
            let slot = match value {
                FeatureValue::Number(n) => self.index.get(name.as_str()).map(|&i| (i, *n)),
                FeatureValue::Category(c) => self
                    .index
                    .get(&format!("{}={}", name, c))
                    .map(|&i| (i, 1.0)),
            };

            if let Some((i, v)) = slot {
                x[i] = v;
            }
        }

        x
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ModelError> {
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::NonFinite("coefficient"));
        }
        if !intercept.is_finite() {
            return Err(ModelError::NonFinite("intercept"));
        }

        Ok(Self {
            coefficients: Array1::from(coefficients),
            intercept,
        })
    }

    pub fn decision_function(&self, x: &Array1<f64>) -> f64 {
        self.coefficients.dot(x) + self.intercept
    }

    pub fn predict_proba(&self, x: &Array1<f64>) -> f64 {
        sigmoid(self.decision_function(x))
    }
}

/// Logistic function, split by sign so `exp` never overflows.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

#[derive(Debug, Clone)]
pub struct Pipeline {
    vectorizer: DictVectorizer,
    classifier: LogisticRegression,
    digest: String,
}

impl Pipeline {
    pub fn new(
        vectorizer: DictVectorizer,
        classifier: LogisticRegression,
    ) -> Result<Self, ModelError> {
        let features = vectorizer.feature_names().len();
        let coefficients = classifier.coefficients.len();
        if features != coefficients {
            return Err(ModelError::ShapeMismatch { features, coefficients });
        }

        Ok(Self {
            vectorizer,
            classifier,
            digest: String::new(),
        })
    }

    /// Load and validate the artifact at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        tracing::info!("Loading model artifact from: {}", path.display());

        let bytes = fs::read(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let digest = sha256_hex(&bytes);
        verify_checksum(path, &digest)?;

        let pipeline = Self::parse(&bytes, digest)?;

        tracing::info!(
            features = pipeline.feature_names().len(),
            sha256 = %pipeline.digest(),
            "Model artifact loaded"
        );

        Ok(pipeline)
    }

    /// Parse an artifact already in memory.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        Self::parse(bytes, sha256_hex(bytes))
    }

    fn parse(bytes: &[u8], digest: String) -> Result<Self, ModelError> {
        let artifact: PipelineArtifact = serde_json::from_slice(bytes)?;

        let vectorizer = DictVectorizer::new(artifact.vectorizer.feature_names)?;
        let classifier = LogisticRegression::new(
            artifact.classifier.coefficients,
            artifact.classifier.intercept,
        )?;

        let pipeline = Self::new(vectorizer, classifier)?;
        Ok(Self { digest, ..pipeline })
    }

    pub fn feature_names(&self) -> &[String] {
        self.vectorizer.feature_names()
    }

    /// Hex SHA-256 of the artifact bytes; empty when built in code.
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl Classifier for Pipeline {
    fn predict_proba(&self, record: &Record) -> Result<f64, ModelError> {
        let x = self.vectorizer.transform(record);
        let probability = self.classifier.predict_proba(&x);

        if probability.is_nan() {
            return Err(ModelError::InvalidOutput);
        }

        Ok(probability)
    }
}

// ============================================================================
// CHECKSUM
// ============================================================================

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn checksum_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".sha256");
    PathBuf::from(name)
}

/// Compare against the sidecar digest, if one exists.
///
/// Accepts both a bare digest and `sha256sum` output (`<digest>  <file>`).
fn verify_checksum(path: &Path, actual: &str) -> Result<(), ModelError> {
    let sidecar = checksum_path(path);
    if !sidecar.exists() {
        tracing::debug!("No checksum file at {}", sidecar.display());
        return Ok(());
    }

    let contents = fs::read_to_string(&sidecar).map_err(|source| ModelError::Io {
        path: sidecar.clone(),
        source,
    })?;
    let expected = contents
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    if expected != actual {
        return Err(ModelError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected,
            actual: actual.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTIFACT: &str = include_str!("../../../pipeline_v1.json");

    fn lead(source: &str, courses: f64, income: f64) -> Record {
        let mut record = Record::new();
        record.insert("lead_source".into(), FeatureValue::Category(source.into()));
        record.insert("number_of_courses_viewed".into(), FeatureValue::Number(courses));
        record.insert("annual_income".into(), FeatureValue::Number(income));
        record
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_shipped_artifact_parses() {
        let pipeline = Pipeline::from_slice(ARTIFACT.as_bytes()).unwrap();
        assert_eq!(pipeline.feature_names().len(), 6);
        assert_eq!(pipeline.digest().len(), 64);
    }

    #[test]
    fn test_referral_scenario() {
        let pipeline = Pipeline::from_slice(ARTIFACT.as_bytes()).unwrap();
        let p = pipeline.predict_proba(&lead("referral", 5.0, 50000.0)).unwrap();

        assert!((p - 0.5337).abs() < 1e-3, "unexpected probability {}", p);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let pipeline = Pipeline::from_slice(ARTIFACT.as_bytes()).unwrap();
        let record = lead("social_media", 2.0, 61000.0);

        let first = pipeline.predict_proba(&record).unwrap();
        for _ in 0..10 {
            assert_eq!(pipeline.predict_proba(&record).unwrap(), first);
        }
    }

    #[test]
    fn test_probability_stays_in_unit_interval() {
        let pipeline = Pipeline::from_slice(ARTIFACT.as_bytes()).unwrap();

        for income in [-1e300, -1.0, 0.0, 1.0, 1e12, 1e300] {
            for courses in [0.0, 1.0, 1000.0, 9.2e18] {
                let p = pipeline.predict_proba(&lead("ads", courses, income)).unwrap();
                assert!((0.0..=1.0).contains(&p), "p={} for {} / {}", p, courses, income);
            }
        }
    }

    #[test]
    fn test_vectorizer_one_hot_and_unknown_features() {
        let vectorizer =
            DictVectorizer::new(names(&["income", "source=ads", "source=referral"])).unwrap();

        let mut record = Record::new();
        record.insert("income".into(), FeatureValue::Number(12.5));
        record.insert("source".into(), FeatureValue::Category("referral".into()));
        record.insert("unseen".into(), FeatureValue::Number(3.0));

        let x = vectorizer.transform(&record);
        assert_eq!(x.to_vec(), vec![12.5, 0.0, 1.0]);
    }

    #[test]
    fn test_unknown_category_is_all_zero() {
        let vectorizer = DictVectorizer::new(names(&["source=ads", "source=referral"])).unwrap();

        let mut record = Record::new();
        record.insert("source".into(), FeatureValue::Category("billboard".into()));

        assert_eq!(vectorizer.transform(&record).to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_sigmoid_limits() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert_eq!(sigmoid(f64::INFINITY), 1.0);
        assert_eq!(sigmoid(f64::NEG_INFINITY), 0.0);
        assert!(sigmoid(-800.0) >= 0.0);
    }

    #[test]
    fn test_reject_shape_mismatch() {
        let vectorizer = DictVectorizer::new(names(&["a", "b"])).unwrap();
        let classifier = LogisticRegression::new(vec![1.0], 0.0).unwrap();

        match Pipeline::new(vectorizer, classifier) {
            Err(ModelError::ShapeMismatch { features, coefficients }) => {
                assert_eq!(features, 2);
                assert_eq!(coefficients, 1);
            }
            other => panic!("Expected ShapeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_reject_duplicate_feature() {
        let result = DictVectorizer::new(names(&["a", "b", "a"]));
        assert!(matches!(result, Err(ModelError::DuplicateFeature(name)) if name == "a"));
    }

    #[test]
    fn test_reject_non_finite_parameters() {
        assert!(matches!(
            LogisticRegression::new(vec![1.0, f64::NAN], 0.0),
            Err(ModelError::NonFinite("coefficient"))
        ));
        assert!(matches!(
            LogisticRegression::new(vec![1.0], f64::INFINITY),
            Err(ModelError::NonFinite("intercept"))
        ));
    }

    #[test]
    fn test_reject_malformed_json() {
        let result = Pipeline::from_slice(br#"{"vectorizer": {"feature_names": []}}"#);
        assert!(matches!(result, Err(ModelError::Parse(_))));
    }

    #[test]
    fn test_nan_output_is_an_error() {
        let vectorizer = DictVectorizer::new(names(&["a", "b"])).unwrap();
        let classifier = LogisticRegression::new(vec![1e300, -1e300], 0.0).unwrap();
        let pipeline = Pipeline::new(vectorizer, classifier).unwrap();

        let mut record = Record::new();
        record.insert("a".into(), FeatureValue::Number(1e300));
        record.insert("b".into(), FeatureValue::Number(1e300));

        assert!(matches!(pipeline.predict_proba(&record), Err(ModelError::InvalidOutput)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline_v1.json");

        match Pipeline::load(&path) {
            Err(ModelError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_with_matching_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline_v1.json");
        fs::write(&path, ARTIFACT).unwrap();

        let digest = sha256_hex(ARTIFACT.as_bytes());
        fs::write(checksum_path(&path), format!("{}  pipeline_v1.json\n", digest)).unwrap();

        let pipeline = Pipeline::load(&path).unwrap();
        assert_eq!(pipeline.digest(), digest);
    }

    #[test]
    fn test_load_rejects_checksum_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline_v1.json");
        fs::write(&path, ARTIFACT).unwrap();
        fs::write(checksum_path(&path), "0".repeat(64)).unwrap();

        match Pipeline::load(&path) {
            Err(ModelError::ChecksumMismatch { expected, actual, .. }) => {
                assert_eq!(expected, "0".repeat(64));
                assert_eq!(actual, sha256_hex(ARTIFACT.as_bytes()));
            }
            other => panic!("Expected ChecksumMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_load_without_checksum_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, ARTIFACT).unwrap();

        assert!(Pipeline::load(&path).is_ok());
    }
}
