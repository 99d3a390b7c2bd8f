//! Prediction result types.
//!
//! Represents the output of the dry eye disease classifier.

use serde::{Deserialize, Serialize};

/// Default probability threshold for the positive label.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Coarse risk bucketing of the continuous probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    /// p < 0.3
    Low,
    /// 0.3 <= p < 0.5
    Moderate,
    /// 0.5 <= p < 0.7
    High,
    /// p >= 0.7
    VeryHigh,
}

impl RiskTier {
    /// Bucket a probability. Boundaries are inclusive on the start of
    /// `Moderate`, `High` and `VeryHigh`.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.3 {
            Self::Low
        } else if probability < 0.5 {
            Self::Moderate
        } else if probability < 0.7 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk",
            Self::VeryHigh => "Very High Risk",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
            Self::VeryHigh => write!(f, "VERY HIGH"),
        }
    }
}

/// Binary classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    /// Probability below the threshold.
    Negative,
    /// Probability at or above the threshold.
    Positive,
}

impl RiskLabel {
    /// Display string used in screening reports.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Negative => "No Dry Eye Disease",
            Self::Positive => "Dry Eye Disease",
        }
    }
}

/// Result of scoring one feature vector against the classifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Binary label at the decision threshold.
    pub label: RiskLabel,

    /// Positive-class probability (0.0 to 1.0).
    pub probability: f64,

    /// Coarse risk bucket derived from the probability.
    pub risk_tier: RiskTier,
}

impl PredictionResult {
    /// Derive a result from a probability at the default threshold.
    #[must_use]
    pub fn new(probability: f64) -> Self {
        Self::with_threshold(probability, DEFAULT_THRESHOLD)
    }

    /// Derive a result from a probability at a caller-chosen threshold.
    #[must_use]
    pub fn with_threshold(probability: f64, threshold: f64) -> Self {
        let label = if probability >= threshold {
            RiskLabel::Positive
        } else {
            RiskLabel::Negative
        };

        Self {
            label,
            probability,
            risk_tier: RiskTier::from_probability(probability),
        }
    }
}

/// Generate a correlation id (UUID v4) using a CSPRNG.
///
/// Uses ChaCha20Rng seeded from OS entropy so analysis ids are not
/// predictable across processes.
#[must_use]
pub fn analysis_id() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RiskTier::from_probability(0.2999), RiskTier::Low);
        assert_eq!(RiskTier::from_probability(0.3), RiskTier::Moderate);
        assert_eq!(RiskTier::from_probability(0.4999), RiskTier::Moderate);
        assert_eq!(RiskTier::from_probability(0.5), RiskTier::High);
        assert_eq!(RiskTier::from_probability(0.6999), RiskTier::High);
        assert_eq!(RiskTier::from_probability(0.7), RiskTier::VeryHigh);
    }

    #[test]
    fn test_label_threshold() {
        assert_eq!(PredictionResult::new(0.49).label, RiskLabel::Negative);
        assert_eq!(PredictionResult::new(0.5).label, RiskLabel::Positive);
        assert_eq!(
            PredictionResult::with_threshold(0.49, 0.4).label,
            RiskLabel::Positive
        );
    }

    #[test]
    fn test_result_carries_tier() {
        let result = PredictionResult::new(0.75);
        assert_eq!(result.risk_tier, RiskTier::VeryHigh);
        assert_eq!(result.label, RiskLabel::Positive);
    }

    #[test]
    fn test_analysis_id_format() {
        let id1 = analysis_id();
        let id2 = analysis_id();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36); // UUID format with dashes
    }
}
