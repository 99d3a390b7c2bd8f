//! Summary aggregation over per-domain health reports.

use std::sync::Arc;

use crate::domain::{AnalysisSummary, HealthReport, PredictionResult, RawHealthRecord};
use crate::ports::RecommendationEnricher;

/// Folds per-domain reports into one [`AnalysisSummary`] and, when an
/// enricher is configured and a prediction is available, attaches
/// personalized recommendations on top of the rule-derived ones.
///
/// The enricher is best-effort: a failing backend degrades to the
/// rule-derived summary, it never fails the analysis.
#[derive(Default)]
pub struct SummaryAggregator {
    enricher: Option<Arc<dyn RecommendationEnricher>>,
}

impl SummaryAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self { enricher: None }
    }

    #[must_use]
    pub fn with_enricher(enricher: Arc<dyn RecommendationEnricher>) -> Self {
        Self {
            enricher: Some(enricher),
        }
    }

    pub fn summarize(
        &self,
        reports: &[HealthReport],
        record: &RawHealthRecord,
        prediction: Option<&PredictionResult>,
    ) -> AnalysisSummary {
        let mut summary = AnalysisSummary::from_reports(reports);

        if let (Some(enricher), Some(prediction)) = (self.enricher.as_ref(), prediction) {
            match enricher.generate(record, prediction) {
                Ok(personalized) => summary.personalized = personalized,
                Err(err) => {
                    tracing::warn!("Recommendation enrichment unavailable: {err}");
                }
            }
        }

        summary
    }
}
