//! Per-feature attribution of a single scored instance.
//!
//! Each feature carries a signed, additive contribution: the baseline plus
//! the sum of all contributions reproduces the model's raw score for that
//! instance.

use serde::{Deserialize, Serialize};

use super::features::FeatureVector;

/// Whether a feature pushed the score toward or away from the positive class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    IncreasesRisk,
    DecreasesRisk,
}

/// One feature's share of the model output for one instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureContribution {
    /// Feature column name.
    pub feature: String,

    /// The feature's value in the scored vector.
    pub value: f64,

    /// Signed additive contribution to the raw score.
    pub contribution: f64,

    /// Sign of the contribution.
    pub direction: Direction,
}

/// Ranked attribution for one scored instance.
///
/// Contributions are sorted by magnitude descending; equal magnitudes keep
/// the schema's original column order (stable sort), so re-running the
/// explanation on the same instance yields the identical list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribution {
    /// Model baseline (expected raw score before any feature is applied).
    pub baseline: f64,

    /// All per-feature contributions, magnitude descending.
    pub contributions: Vec<FeatureContribution>,
}

impl Attribution {
    /// Rank raw contributions (in schema order) into an attribution.
    ///
    /// # Errors
    /// Returns an error message if the contribution count does not match the
    /// feature vector.
    pub fn rank(
        baseline: f64,
        features: &FeatureVector,
        raw_contributions: &[f64],
    ) -> Result<Self, String> {
        if raw_contributions.len() != features.values().len() {
            return Err(format!(
                "Contribution count mismatch: got {}, expected {}",
                raw_contributions.len(),
                features.values().len()
            ));
        }

        let mut contributions: Vec<FeatureContribution> = features
            .iter()
            .zip(raw_contributions.iter().copied())
            .map(|((feature, value), contribution)| FeatureContribution {
                feature: feature.to_string(),
                value,
                contribution,
                direction: if contribution > 0.0 {
                    Direction::IncreasesRisk
                } else {
                    Direction::DecreasesRisk
                },
            })
            .collect();

        // Stable sort keeps schema order for equal magnitudes.
        contributions.sort_by(|a, b| {
            b.contribution
                .abs()
                .total_cmp(&a.contribution.abs())
        });

        Ok(Self {
            baseline,
            contributions,
        })
    }

    /// Top 5 risk-increasing features, magnitude descending.
    #[must_use]
    pub fn top_risk_factors(&self) -> Vec<&FeatureContribution> {
        self.contributions
            .iter()
            .filter(|c| c.contribution > 0.0)
            .take(5)
            .collect()
    }

    /// Top 5 protective features, magnitude descending.
    #[must_use]
    pub fn top_protective_factors(&self) -> Vec<&FeatureContribution> {
        self.contributions
            .iter()
            .filter(|c| c.contribution < 0.0)
            .take(5)
            .collect()
    }

    /// Raw score reconstructed from baseline plus all contributions.
    #[must_use]
    pub fn reconstructed_score(&self) -> f64 {
        self.baseline + self.contributions.iter().map(|c| c.contribution).sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::FeatureSchema;

    fn vector(columns: &[&str], values: &[f64]) -> FeatureVector {
        let schema = Arc::new(FeatureSchema::new(
            columns.iter().map(|c| c.to_string()).collect(),
        ));
        FeatureVector::new(schema, values.to_vec()).expect("Should build vector")
    }

    #[test]
    fn test_ranking_by_magnitude() {
        let features = vector(&["a", "b", "c"], &[1.0, 2.0, 3.0]);
        let attribution =
            Attribution::rank(0.1, &features, &[0.2, -0.9, 0.5]).expect("Should rank");

        let order: Vec<&str> = attribution
            .contributions
            .iter()
            .map(|c| c.feature.as_str())
            .collect();
        assert_eq!(order, vec!["b", "c", "a"]);
        assert_eq!(
            attribution.contributions[0].direction,
            Direction::DecreasesRisk
        );
    }

    #[test]
    fn test_equal_magnitudes_keep_schema_order() {
        let features = vector(&["a", "b", "c"], &[1.0, 1.0, 1.0]);
        let attribution =
            Attribution::rank(0.0, &features, &[0.5, -0.5, 0.5]).expect("Should rank");

        let order: Vec<&str> = attribution
            .contributions
            .iter()
            .map(|c| c.feature.as_str())
            .collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let features = vector(&["a", "b", "c", "d"], &[1.0, 2.0, 3.0, 4.0]);
        let raw = [0.3, -0.3, 0.1, -0.7];

        let first = Attribution::rank(0.0, &features, &raw).expect("Should rank");
        let second = Attribution::rank(0.0, &features, &raw).expect("Should rank");

        let names = |a: &Attribution| -> Vec<String> {
            a.contributions.iter().map(|c| c.feature.clone()).collect()
        };
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn test_partitioned_top_lists() {
        let columns: Vec<String> = (0..8).map(|i| format!("f{i}")).collect();
        let cols: Vec<&str> = columns.iter().map(String::as_str).collect();
        let features = vector(&cols, &[0.0; 8]);
        let raw = [0.9, -0.8, 0.7, -0.6, 0.5, -0.4, 0.3, -0.2];

        let attribution = Attribution::rank(0.0, &features, &raw).expect("Should rank");

        let risk = attribution.top_risk_factors();
        let protective = attribution.top_protective_factors();
        assert_eq!(risk.len(), 4);
        assert_eq!(protective.len(), 4);
        assert!(risk.iter().all(|c| c.contribution > 0.0));
        assert!(protective.iter().all(|c| c.contribution < 0.0));
        assert_eq!(risk[0].feature, "f0");
        assert_eq!(protective[0].feature, "f1");
    }

    #[test]
    fn test_additive_decomposition() {
        let features = vector(&["a", "b"], &[1.0, 2.0]);
        let attribution =
            Attribution::rank(-1.5, &features, &[0.4, -0.1]).expect("Should rank");
        assert!((attribution.reconstructed_score() - (-1.2)).abs() < 1e-12);
    }

    #[test]
    fn test_count_mismatch_rejected() {
        let features = vector(&["a", "b"], &[1.0, 2.0]);
        assert!(Attribution::rank(0.0, &features, &[0.1]).is_err());
    }
}
