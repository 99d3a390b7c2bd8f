//! Scoring port: Traits for the opaque classifier boundary.
//!
//! The pipeline treats the trained classifier as an opaque scoring
//! function with a fixed, introspectable input-feature schema. These
//! traits abstract the concrete model artifact from the application
//! logic, so tests can inject a fake scoring object.

use crate::domain::{FeatureSchema, FeatureVector};

/// Errors surfaced by scoring and attribution implementations.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("Feature schema mismatch: got {got} values, model expects {expected}")]
    SchemaMismatch { expected: usize, got: usize },

    #[error("Model produced a non-finite score")]
    NonFiniteScore,

    #[error("Scoring failed: {0}")]
    Internal(String),
}

/// Trait for the loaded classifier.
///
/// Implementations are read-only after initialization and safe for
/// concurrent scoring calls from multiple threads.
pub trait ScoringModel: Send + Sync {
    /// The fixed, ordered feature columns the model was trained on.
    fn feature_schema(&self) -> &FeatureSchema;

    /// Positive-class probability for one aligned feature vector.
    ///
    /// # Errors
    /// Returns `ScoringError::SchemaMismatch` if the vector does not match
    /// the declared schema.
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ScoringError>;
}

/// Trait for the per-instance attribution object paired with the model.
///
/// Contributions are additive: `baseline() + sum(contributions)` must
/// reproduce the model's raw score for the instance.
pub trait ContributionExplainer: Send + Sync {
    /// Expected raw score before any feature is applied.
    fn baseline(&self) -> f64;

    /// Signed per-feature contributions, in schema order.
    ///
    /// # Errors
    /// Returns `ScoringError::SchemaMismatch` if the vector does not match
    /// the declared schema.
    fn contributions(&self, features: &FeatureVector) -> Result<Vec<f64>, ScoringError>;
}
