//! Static enrichment adapter: deterministic fallback suggestions.
//!
//! Stands in for the external generative recommendation service. Returns
//! the fixed per-tier suggestion texts the product ships when the live
//! service is unreachable, so summaries always have a personalized
//! section available without a network dependency.

use crate::domain::{PredictionResult, RawHealthRecord, RiskTier};
use crate::ports::{EnrichmentError, RecommendationEnricher};

/// Tier-keyed static suggestions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticEnricher;

impl StaticEnricher {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn fallback_for(tier: RiskTier) -> Vec<String> {
        let texts: &[&str] = match tier {
            RiskTier::VeryHigh | RiskTier::High => &[
                "Schedule an eye examination with an ophthalmologist immediately.",
                "Strictly follow the 20-20-20 rule: Every 20 mins, look 20 ft away for 20 sec.",
                "Use artificial tears to lubricate your eyes.",
                "Reduce screen time significantly below 6 hours.",
            ],
            RiskTier::Moderate => &[
                "Take regular breaks every 45-60 minutes.",
                "Consider a warm compress for your eyes in the evening.",
                "Adjust medical/lifestyle factors like hydration and sleep.",
                "Blink more often when using screens.",
            ],
            RiskTier::Low => &[
                "Maintain your good habits.",
                "Stay hydrated.",
                "Ensure generic eye hygiene when using screens.",
            ],
        };
        texts.iter().map(|t| t.to_string()).collect()
    }
}

impl RecommendationEnricher for StaticEnricher {
    fn generate(
        &self,
        _record: &RawHealthRecord,
        prediction: &PredictionResult,
    ) -> Result<Vec<String>, EnrichmentError> {
        Ok(Self::fallback_for(prediction.risk_tier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_keyed_suggestions() {
        let enricher = StaticEnricher::new();
        let record = RawHealthRecord::new();

        let high = enricher
            .generate(&record, &PredictionResult::new(0.8))
            .expect("Should generate");
        assert!(high[0].contains("ophthalmologist"));

        let low = enricher
            .generate(&record, &PredictionResult::new(0.1))
            .expect("Should generate");
        assert_eq!(low[0], "Maintain your good habits.");
    }

    #[test]
    fn test_high_and_very_high_share_texts() {
        let enricher = StaticEnricher::new();
        let record = RawHealthRecord::new();

        let high = enricher
            .generate(&record, &PredictionResult::new(0.6))
            .expect("Should generate");
        let very_high = enricher
            .generate(&record, &PredictionResult::new(0.9))
            .expect("Should generate");
        assert_eq!(high, very_high);
    }
}
