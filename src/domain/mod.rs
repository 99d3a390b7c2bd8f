//! Domain layer: Core business types and logic.
//!
//! This module contains pure value types with no external service
//! dependencies. All types are serializable and created fresh per
//! analysis call.

mod attribution;
mod features;
mod prediction;
mod record;
mod report;

pub use attribution::{Attribution, Direction, FeatureContribution};
pub use features::{FeatureSchema, FeatureVector};
pub use prediction::{analysis_id, PredictionResult, RiskLabel, RiskTier, DEFAULT_THRESHOLD};
pub use record::{fields, FieldValue, RawHealthRecord};
pub use report::{AnalysisSummary, HealthReport, HealthStatus};
