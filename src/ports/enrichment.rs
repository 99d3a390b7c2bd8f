//! Enrichment port: Optional free-text recommendation capability.
//!
//! An external, possibly LLM-backed service may append personalized
//! suggestions to the analysis summary. The analyzer always has a
//! deterministic rule-derived path and never depends on this capability
//! being available.

use crate::domain::{PredictionResult, RawHealthRecord};

/// Errors surfaced by enrichment implementations. Always recoverable:
/// the caller falls back to rule-derived recommendations.
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("Enrichment service unavailable")]
    Unavailable,

    #[error("Enrichment backend failed: {0}")]
    Backend(String),
}

/// Capability interface for personalized recommendation generation.
pub trait RecommendationEnricher: Send + Sync {
    /// Generate free-text suggestions for one analyzed record.
    ///
    /// # Errors
    /// Returns `EnrichmentError` when the backing service is unreachable
    /// or misbehaves; callers must treat this as a soft failure.
    fn generate(
        &self,
        record: &RawHealthRecord,
        prediction: &PredictionResult,
    ) -> Result<Vec<String>, EnrichmentError>;
}
