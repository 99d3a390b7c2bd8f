//! Application layer: Orchestration of the analysis pipelines.
//!
//! Two entry points live here. [`RiskService`] runs the model pipeline
//! (preprocess, score, explain) and [`HealthAnalyzer`] runs the
//! rule-based domain analysis. Both consume the same
//! [`RawHealthRecord`](crate::domain::RawHealthRecord) and can be used
//! independently or combined.

mod analyzer;
mod preprocess;
mod risk;
mod summary;

pub use analyzer::{DomainAnalysis, HealthAnalyzer};
pub use preprocess::{
    derived, parse_blood_pressure, CategoryEncoder, PreparedFeatures, Preprocessor,
    DEFAULT_BLOOD_PRESSURE,
};
pub use risk::{RiskAssessment, RiskService};
pub use summary::SummaryAggregator;
