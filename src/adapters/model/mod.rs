//! Model adapter: Calibrated linear classifier loaded from a JSON artifact.
//!
//! The artifact is exported by the training pipeline and treated as an
//! opaque blob here: feature schema, standardization parameters, logistic
//! coefficients and the fixed categorical codebook, all in one
//! `calibrated_model.json`.
//!
//! Because the model is linear over standardized features, the additive
//! per-feature decomposition is exact: `contribution_i = coef_i * z_i`
//! with `z_i = (x_i - mean_i) / std_i`, and
//! `intercept + sum(contributions)` is the raw logit for the instance.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{FeatureSchema, FeatureVector};
use crate::ports::{ContributionExplainer, ScoringError, ScoringModel};

/// Default artifact file name inside a model directory.
pub const ARTIFACT_FILE: &str = "calibrated_model.json";

/// Errors raised while locating or loading the model artifact.
///
/// All of these are fatal configuration errors: the process must not
/// serve risk predictions without a loaded model.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Model artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid model artifact format: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Invalid model artifact: {0}")]
    Invalid(String),
}

/// Model parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedCalibratedModel {
    /// Ordered feature columns the model was trained on.
    pub feature_names: Vec<String>,

    /// Logistic regression coefficients over standardized features.
    pub coefficients: Vec<f64>,

    /// Intercept term (the attribution baseline).
    pub intercept: f64,

    /// Per-feature standardization mean.
    pub scaler_mean: Vec<f64>,

    /// Per-feature standardization standard deviation.
    pub scaler_std: Vec<f64>,

    /// Fixed category codebook persisted at training time:
    /// column name to ordered level list, code = index.
    #[serde(default)]
    pub categorical_levels: BTreeMap<String, Vec<String>>,
}

/// Loaded, validated classifier. Read-only after construction and safe
/// to share across concurrent analysis calls behind an `Arc`.
#[derive(Debug)]
pub struct CalibratedLinearModel {
    params: ExportedCalibratedModel,
    schema: Arc<FeatureSchema>,
}

impl CalibratedLinearModel {
    /// Load and validate the artifact from a file or a model directory.
    ///
    /// # Errors
    /// Returns `ArtifactError` if the file is missing, unreadable, or
    /// fails the shape sanity checks.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let artifact_path = if path.is_dir() {
            path.join(ARTIFACT_FILE)
        } else {
            path.to_path_buf()
        };

        if !artifact_path.exists() {
            return Err(ArtifactError::NotFound(artifact_path));
        }

        let content = std::fs::read_to_string(&artifact_path)?;
        let params: ExportedCalibratedModel = serde_json::from_str(&content)?;

        Self::from_params(params).map(|model| {
            tracing::info!(
                "Loaded model from {:?} (n_features={})",
                artifact_path,
                model.schema.len()
            );
            model
        })
    }

    /// Build a model from already-parsed parameters, running sanity checks.
    ///
    /// # Errors
    /// Returns `ArtifactError::Invalid` on shape or value problems.
    pub fn from_params(params: ExportedCalibratedModel) -> Result<Self, ArtifactError> {
        let n = params.feature_names.len();
        if n == 0 {
            return Err(ArtifactError::Invalid(
                "feature_names must not be empty".into(),
            ));
        }
        if params.coefficients.len() != n
            || params.scaler_mean.len() != n
            || params.scaler_std.len() != n
        {
            return Err(ArtifactError::Invalid(
                "parameter lengths do not match feature_names length".into(),
            ));
        }
        if !params.intercept.is_finite() {
            return Err(ArtifactError::Invalid("intercept must be finite".into()));
        }
        for (i, name) in params.feature_names.iter().enumerate() {
            if !params.coefficients[i].is_finite() || !params.scaler_mean[i].is_finite() {
                return Err(ArtifactError::Invalid(format!(
                    "non-finite parameter for feature {name}"
                )));
            }
            let std = params.scaler_std[i];
            if !std.is_finite() || std <= 0.0 {
                return Err(ArtifactError::Invalid(format!(
                    "scaler_std for feature {name} must be > 0, got {std}"
                )));
            }
        }
        for (column, levels) in &params.categorical_levels {
            if levels.is_empty() {
                return Err(ArtifactError::Invalid(format!(
                    "categorical_levels for {column} must not be empty"
                )));
            }
        }

        let schema = Arc::new(FeatureSchema::new(params.feature_names.clone()));
        Ok(Self { params, schema })
    }

    /// Shared handle to the declared feature schema.
    #[must_use]
    pub fn schema_handle(&self) -> Arc<FeatureSchema> {
        Arc::clone(&self.schema)
    }

    /// The fixed category codebook persisted alongside the model.
    #[must_use]
    pub fn categorical_levels(&self) -> &BTreeMap<String, Vec<String>> {
        &self.params.categorical_levels
    }

    /// Standardized per-feature terms `coef_i * (x_i - mean_i) / std_i`.
    fn terms(&self, features: &FeatureVector) -> Result<Vec<f64>, ScoringError> {
        let n = self.schema.len();
        if features.values().len() != n {
            return Err(ScoringError::SchemaMismatch {
                expected: n,
                got: features.values().len(),
            });
        }

        let mut terms = Vec::with_capacity(n);
        for (i, &x) in features.values().iter().enumerate() {
            let z = (x - self.params.scaler_mean[i]) / self.params.scaler_std[i];
            terms.push(self.params.coefficients[i] * z);
        }
        Ok(terms)
    }

    fn sigmoid(x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }
}

impl ScoringModel for CalibratedLinearModel {
    fn feature_schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ScoringError> {
        let logit = self.params.intercept + self.terms(features)?.iter().sum::<f64>();
        let probability = Self::sigmoid(logit);

        if !probability.is_finite() {
            return Err(ScoringError::NonFiniteScore);
        }

        tracing::debug!("Scored instance: logit={:.4}, p={:.4}", logit, probability);
        Ok(probability)
    }
}

impl ContributionExplainer for CalibratedLinearModel {
    fn baseline(&self) -> f64 {
        self.params.intercept
    }

    fn contributions(&self, features: &FeatureVector) -> Result<Vec<f64>, ScoringError> {
        self.terms(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_params() -> ExportedCalibratedModel {
        ExportedCalibratedModel {
            feature_names: vec!["Age".into(), "BMI".into(), "Stress level".into()],
            coefficients: vec![0.8, 0.5, -0.2],
            intercept: -1.0,
            scaler_mean: vec![40.0, 25.0, 3.0],
            scaler_std: vec![12.0, 4.0, 1.2],
            categorical_levels: BTreeMap::from([(
                "Gender".to_string(),
                vec!["F".to_string(), "M".to_string()],
            )]),
        }
    }

    fn vector(model: &CalibratedLinearModel, values: Vec<f64>) -> FeatureVector {
        FeatureVector::new(model.schema_handle(), values).expect("Should build vector")
    }

    #[test]
    fn test_load_from_directory() {
        let temp = tempdir().expect("tempdir");
        let json = serde_json::to_string(&sample_params()).expect("serialize");
        std::fs::write(temp.path().join(ARTIFACT_FILE), json).expect("write artifact");

        let model = CalibratedLinearModel::load(temp.path()).expect("Should load");
        assert_eq!(model.feature_schema().len(), 3);
        assert_eq!(model.categorical_levels()["Gender"], vec!["F", "M"]);
    }

    #[test]
    fn test_missing_artifact_is_fatal() {
        let temp = tempdir().expect("tempdir");
        let err = CalibratedLinearModel::load(temp.path()).expect_err("must fail");
        assert!(matches!(err, ArtifactError::NotFound(_)));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut params = sample_params();
        params.coefficients.pop();
        let err = CalibratedLinearModel::from_params(params).expect_err("must fail");
        assert!(matches!(err, ArtifactError::Invalid(_)));
    }

    #[test]
    fn test_nonpositive_std_rejected() {
        let mut params = sample_params();
        params.scaler_std[1] = 0.0;
        assert!(CalibratedLinearModel::from_params(params).is_err());
    }

    #[test]
    fn test_probability_at_scaler_mean_is_sigmoid_of_intercept() {
        let model = CalibratedLinearModel::from_params(sample_params()).expect("Should build");
        let features = vector(&model, vec![40.0, 25.0, 3.0]);

        let p = model.predict_probability(&features).expect("Should score");
        let expected = 1.0 / (1.0 + 1.0f64.exp());
        assert!((p - expected).abs() < 1e-12);
    }

    #[test]
    fn test_contributions_sum_to_logit() {
        let model = CalibratedLinearModel::from_params(sample_params()).expect("Should build");
        let features = vector(&model, vec![55.0, 29.0, 5.0]);

        let contributions = model.contributions(&features).expect("Should explain");
        let logit = model.baseline() + contributions.iter().sum::<f64>();
        let p = model.predict_probability(&features).expect("Should score");

        assert!((p - 1.0 / (1.0 + (-logit).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_schema_mismatch_rejected() {
        let model = CalibratedLinearModel::from_params(sample_params()).expect("Should build");
        let other_schema = Arc::new(FeatureSchema::new(vec!["Age".into()]));
        let features = FeatureVector::new(other_schema, vec![40.0]).expect("Should build");

        let err = model.predict_probability(&features).expect_err("must fail");
        assert!(matches!(err, ScoringError::SchemaMismatch { .. }));
    }
}
