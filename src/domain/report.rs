//! Per-domain health reports and the aggregated summary.

use serde::{Deserialize, Serialize};

/// Health status levels for visual indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Good,
    Warning,
    Danger,
    Unknown,
}

/// One health domain's verdict: status, display value, message and
/// recommendation strings keyed to the triggered rule branch.
///
/// Created fresh per analysis call and never mutated afterwards. The
/// message and recommendation texts are part of the observable contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Domain name ("BMI", "Blood Pressure", ...).
    pub domain: String,

    pub status: HealthStatus,

    /// Human-readable measured value ("26.1", "130/85 mmHg", "Level 4/5").
    pub value: String,

    pub message: String,

    pub recommendations: Vec<String>,
}

impl HealthReport {
    pub fn new(
        domain: impl Into<String>,
        status: HealthStatus,
        value: impl Into<String>,
        message: impl Into<String>,
        recommendations: Vec<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            status,
            value: value.into(),
            message: message.into(),
            recommendations,
        }
    }
}

/// Aggregated verdict over all domain reports for one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub overall_status: HealthStatus,

    pub overall_message: String,

    pub danger_count: usize,
    pub warning_count: usize,
    pub good_count: usize,

    /// At most 5 recommendations, drawn from Danger/Warning reports in
    /// evaluation order (first two of each).
    pub top_recommendations: Vec<String>,

    /// Free-text suggestions from the optional enrichment capability.
    /// Empty when the enricher is absent or failed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub personalized: Vec<String>,
}

impl AnalysisSummary {
    /// Aggregate reports in their evaluation order.
    ///
    /// Overall status precedence: any Danger wins, then any Warning,
    /// otherwise Good.
    #[must_use]
    pub fn from_reports(reports: &[HealthReport]) -> Self {
        let danger_count = reports
            .iter()
            .filter(|r| r.status == HealthStatus::Danger)
            .count();
        let warning_count = reports
            .iter()
            .filter(|r| r.status == HealthStatus::Warning)
            .count();
        let good_count = reports
            .iter()
            .filter(|r| r.status == HealthStatus::Good)
            .count();

        let (overall_status, overall_message) = if danger_count > 0 {
            (HealthStatus::Danger, "Health issues require attention")
        } else if warning_count > 0 {
            (HealthStatus::Warning, "Some metrics need monitoring")
        } else {
            (HealthStatus::Good, "Overall health is good")
        };

        let top_recommendations = reports
            .iter()
            .filter(|r| matches!(r.status, HealthStatus::Danger | HealthStatus::Warning))
            .flat_map(|r| r.recommendations.iter().take(2).cloned())
            .take(5)
            .collect();

        Self {
            overall_status,
            overall_message: overall_message.to_string(),
            danger_count,
            warning_count,
            good_count,
            top_recommendations,
            personalized: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(domain: &str, status: HealthStatus, recs: &[&str]) -> HealthReport {
        HealthReport::new(
            domain,
            status,
            "n/a",
            "message",
            recs.iter().map(|r| r.to_string()).collect(),
        )
    }

    #[test]
    fn test_danger_takes_precedence() {
        let reports = vec![
            report("BMI", HealthStatus::Good, &[]),
            report("Stress", HealthStatus::Danger, &["rest"]),
            report("Sleep", HealthStatus::Warning, &["sleep more"]),
        ];
        let summary = AnalysisSummary::from_reports(&reports);
        assert_eq!(summary.overall_status, HealthStatus::Danger);
        assert_eq!(summary.danger_count, 1);
        assert_eq!(summary.warning_count, 1);
        assert_eq!(summary.good_count, 1);
    }

    #[test]
    fn test_danger_regardless_of_order() {
        let reports = vec![
            report("Sleep", HealthStatus::Warning, &[]),
            report("BMI", HealthStatus::Good, &[]),
            report("Stress", HealthStatus::Danger, &[]),
        ];
        assert_eq!(
            AnalysisSummary::from_reports(&reports).overall_status,
            HealthStatus::Danger
        );
    }

    #[test]
    fn test_all_good() {
        let reports = vec![
            report("BMI", HealthStatus::Good, &["keep it up"]),
            report("Stress", HealthStatus::Good, &[]),
        ];
        let summary = AnalysisSummary::from_reports(&reports);
        assert_eq!(summary.overall_status, HealthStatus::Good);
        assert_eq!(summary.overall_message, "Overall health is good");
        assert!(summary.top_recommendations.is_empty());
    }

    #[test]
    fn test_recommendation_selection_and_cap() {
        let reports = vec![
            report("A", HealthStatus::Warning, &["a1", "a2", "a3"]),
            report("B", HealthStatus::Good, &["b1"]),
            report("C", HealthStatus::Danger, &["c1", "c2"]),
            report("D", HealthStatus::Warning, &["d1", "d2"]),
        ];
        let summary = AnalysisSummary::from_reports(&reports);

        // First two of each Danger/Warning report in evaluation order,
        // truncated to 5; Good reports contribute nothing.
        assert_eq!(
            summary.top_recommendations,
            vec!["a1", "a2", "c1", "c2", "d1"]
        );
    }

    #[test]
    fn test_unknown_does_not_affect_precedence() {
        let reports = vec![
            report("Lifestyle", HealthStatus::Unknown, &[]),
            report("BMI", HealthStatus::Good, &[]),
        ];
        assert_eq!(
            AnalysisSummary::from_reports(&reports).overall_status,
            HealthStatus::Good
        );
    }
}
