//! Oculens: dry eye disease risk analysis.
//!
//! Turns self-reported lifestyle and physiological survey data into two
//! complementary outputs: a calibrated disease-risk prediction with exact
//! per-feature attribution, and a rule-based multi-domain health analysis
//! with actionable recommendations.
//!
//! # Architecture
//!
//! Hexagonal layout:
//! - `domain`: pure value types (records, features, predictions, reports)
//! - `ports`: trait seams for scoring models and recommendation backends
//! - `adapters`: the calibrated linear model artifact, static enrichment,
//!   and log sanitization
//! - `application`: the two pipelines, [`RiskService`] and
//!   [`HealthAnalyzer`]
//!
//! # Example
//!
//! ```no_run
//! use oculens::{CalibratedLinearModel, HealthAnalyzer, RawHealthRecord, RiskService};
//! use oculens::application::CategoryEncoder;
//! use oculens::domain::fields;
//!
//! # fn main() -> oculens::Result<()> {
//! let model = CalibratedLinearModel::load("models")?;
//! let encoder = CategoryEncoder::new(model.categorical_levels().clone());
//! let service = RiskService::new(model.into(), encoder);
//!
//! let record = RawHealthRecord::new()
//!     .with_number(fields::AGE, 35.0)
//!     .with_number(fields::HEIGHT, 175.0)
//!     .with_number(fields::WEIGHT, 80.0)
//!     .with_text(fields::BLOOD_PRESSURE, "130/85");
//!
//! let assessment = service.assess(&record)?;
//! let analysis = HealthAnalyzer::new().analyze_with_prediction(&record, &assessment.prediction);
//! println!("{} / {:?}", assessment.prediction.risk_tier, analysis.summary.overall_status);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

use thiserror::Error;

pub use adapters::{CalibratedLinearModel, StaticEnricher};
pub use application::{
    DomainAnalysis, HealthAnalyzer, RiskAssessment, RiskService, SummaryAggregator,
};
pub use domain::{
    AnalysisSummary, Attribution, HealthReport, HealthStatus, PredictionResult, RawHealthRecord,
    RiskLabel, RiskTier,
};

/// Top-level error type for all analysis operations.
#[derive(Debug, Error)]
pub enum OculensError {
    /// Model artifact missing, unreadable, or internally inconsistent.
    #[error("configuration error: {0}")]
    Configuration(#[from] adapters::ArtifactError),

    /// A survey field is present but unusable (for example a
    /// non-positive height).
    #[error("invalid field '{field}': {message}")]
    Validation { field: String, message: String },

    /// Scoring failed after preprocessing succeeded.
    #[error("prediction failed: {0}")]
    Prediction(String),

    /// The explainer could not produce per-feature contributions.
    /// Callers can fall back to [`RiskService::predict`].
    #[error("attribution failed: {0}")]
    Attribution(String),

    #[error("enrichment failed: {0}")]
    Enrichment(#[from] ports::EnrichmentError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OculensError>;
