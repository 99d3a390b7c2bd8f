//! Risk service: Orchestrates the prediction pipeline.
//!
//! This service coordinates:
//! - Feature preprocessing (defaults, encoding, derived features)
//! - Probability scoring against the loaded classifier
//! - Per-feature attribution ranking

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::preprocess::{CategoryEncoder, PreparedFeatures, Preprocessor};
use crate::domain::{
    analysis_id, Attribution, FeatureSchema, PredictionResult, RawHealthRecord, DEFAULT_THRESHOLD,
};
use crate::ports::{ContributionExplainer, ScoringModel};
use crate::OculensError;

/// Complete risk assessment for one record.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    /// Correlation id for log tracing; carries no user data.
    pub id: String,

    pub prediction: PredictionResult,

    /// Ranked per-feature explanation of the prediction.
    pub explanation: Attribution,

    /// Raw fields that received documented defaults during preprocessing.
    pub defaulted_fields: Vec<String>,

    pub created_at: DateTime<Utc>,
}

/// Service for scoring records against the loaded classifier.
///
/// The model handle is shared, read-only state: concurrent assessment
/// calls need no locking.
pub struct RiskService<M>
where
    M: ScoringModel + ContributionExplainer,
{
    model: Arc<M>,
    preprocessor: Preprocessor,
    threshold: f64,
}

impl<M> RiskService<M>
where
    M: ScoringModel + ContributionExplainer,
{
    /// Create a service around a loaded model and its fixed codebook.
    pub fn new(model: Arc<M>, encoder: CategoryEncoder) -> Self {
        let schema = Arc::new(FeatureSchema::new(
            model.feature_schema().columns().to_vec(),
        ));
        Self {
            model,
            preprocessor: Preprocessor::new(schema, encoder),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Override the positive-label decision threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Run the full pipeline: preprocess, predict, explain.
    ///
    /// # Errors
    /// Returns `Validation` for invalid body metrics, `Prediction` if
    /// scoring fails, and `Attribution` if only the explanation step fails
    /// (the caller may fall back to [`RiskService::predict`]).
    pub fn assess(&self, record: &RawHealthRecord) -> Result<RiskAssessment, OculensError> {
        let id = analysis_id();
        tracing::info!("Starting risk assessment {id}");

        let prepared = self.preprocessor.prepare(record)?;
        let prediction = self.score(&prepared)?;

        let raw_contributions = self
            .model
            .contributions(&prepared.features)
            .map_err(|e| OculensError::Attribution(e.to_string()))?;
        let explanation =
            Attribution::rank(self.model.baseline(), &prepared.features, &raw_contributions)
                .map_err(OculensError::Attribution)?;

        tracing::info!(
            "Assessment {id} complete: tier={}, {} fields defaulted",
            prediction.risk_tier,
            prepared.defaulted_fields.len()
        );

        Ok(RiskAssessment {
            id,
            prediction,
            explanation,
            defaulted_fields: prepared.defaulted_fields,
            created_at: Utc::now(),
        })
    }

    /// Predict without attribution, for callers that only need the
    /// probability (or whose explanation step failed).
    ///
    /// # Errors
    /// Returns `Validation` or `Prediction` errors; never `Attribution`.
    pub fn predict(&self, record: &RawHealthRecord) -> Result<PredictionResult, OculensError> {
        let prepared = self.preprocessor.prepare(record)?;
        self.score(&prepared)
    }

    /// Assess a batch of records, failing on the first invalid one.
    ///
    /// # Errors
    /// Same per-record conditions as [`RiskService::assess`].
    pub fn assess_batch(
        &self,
        records: &[RawHealthRecord],
    ) -> Result<Vec<RiskAssessment>, OculensError> {
        records.iter().map(|r| self.assess(r)).collect()
    }

    fn score(&self, prepared: &PreparedFeatures) -> Result<PredictionResult, OculensError> {
        let probability = self
            .model
            .predict_probability(&prepared.features)
            .map_err(|e| OculensError::Prediction(e.to_string()))?;
        Ok(PredictionResult::with_threshold(probability, self.threshold))
    }
}
