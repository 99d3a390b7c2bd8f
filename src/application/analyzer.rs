//! Rule-based multi-domain health analyzer.
//!
//! A fixed set of independent rule evaluators, each activated only when
//! the fields it needs are present. Evaluators are pure: one record in,
//! at most one [`HealthReport`] out, no shared state. A domain whose
//! input is present but unevaluable yields no report instead of failing
//! the whole analysis.
//!
//! Message and recommendation texts are part of the observable contract;
//! callers and tests match them verbatim.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::preprocess::parse_blood_pressure;
use crate::application::summary::SummaryAggregator;
use crate::domain::{
    analysis_id, fields, AnalysisSummary, HealthReport, HealthStatus, PredictionResult,
    RawHealthRecord,
};

/// Result of one rule-based analysis call: per-domain reports in
/// evaluation order plus the aggregated summary.
#[derive(Debug, Clone, Serialize)]
pub struct DomainAnalysis {
    /// Correlation id for log tracing; carries no user data.
    pub id: String,

    pub reports: Vec<HealthReport>,

    pub summary: AnalysisSummary,

    pub generated_at: DateTime<Utc>,
}

/// One threshold band: the first band whose bound admits the value wins.
struct Band {
    max: f64,
    inclusive: bool,
    status: HealthStatus,
    message: &'static str,
    recommendations: &'static [&'static str],
}

fn classify(bands: &'static [Band], value: f64) -> &'static Band {
    bands
        .iter()
        .find(|b| {
            if b.inclusive {
                value <= b.max
            } else {
                value < b.max
            }
        })
        .expect("band tables end with an unbounded band")
}

/// <18.5 Underweight, <=24.9 Normal, <=29.9 Overweight, else Obese.
const BMI_BANDS: &[Band] = &[
    Band {
        max: 18.5,
        inclusive: false,
        status: HealthStatus::Warning,
        message: "Underweight",
        recommendations: &[
            "Increase nutrition with protein-rich foods",
            "Eat more frequent small meals",
            "Consult a nutritionist",
        ],
    },
    Band {
        max: 24.9,
        inclusive: true,
        status: HealthStatus::Good,
        message: "Normal weight",
        recommendations: &["Maintain your current diet and exercise routine"],
    },
    Band {
        max: 29.9,
        inclusive: true,
        status: HealthStatus::Warning,
        message: "Overweight",
        recommendations: &[
            "Reduce daily calorie intake",
            "Increase physical activity",
            "Limit sugary and fatty foods",
        ],
    },
    Band {
        max: f64::INFINITY,
        inclusive: true,
        status: HealthStatus::Danger,
        message: "Obese",
        recommendations: &[
            "Consult a doctor about weight loss plan",
            "Develop an appropriate diet",
            "Start with light exercise, gradually increase intensity",
        ],
    },
];

/// 1-5 scale: <=2 low, 3 moderate, 4 high, 5 very high.
const STRESS_BANDS: &[Band] = &[
    Band {
        max: 2.0,
        inclusive: true,
        status: HealthStatus::Good,
        message: "Low stress level",
        recommendations: &["Continue maintaining work-life balance"],
    },
    Band {
        max: 3.0,
        inclusive: true,
        status: HealthStatus::Good,
        message: "Moderate stress level",
        recommendations: &["Take time to relax daily", "Exercise to reduce stress"],
    },
    Band {
        max: 4.0,
        inclusive: true,
        status: HealthStatus::Warning,
        message: "High stress",
        recommendations: &[
            "Practice meditation or yoga",
            "Reduce workload if possible",
            "Talk to someone about your stress",
        ],
    },
    Band {
        max: f64::INFINITY,
        inclusive: true,
        status: HealthStatus::Danger,
        message: "Very high stress",
        recommendations: &[
            "Consider professional counseling",
            "Prioritize rest",
            "Identify and address stress sources",
        ],
    },
];

/// Resting heart rate: <60 low, 60-100 normal, >100 elevated.
const HEART_RATE_BANDS: &[Band] = &[
    Band {
        max: 60.0,
        inclusive: false,
        status: HealthStatus::Warning,
        message: "Low heart rate",
        recommendations: &[
            "Watch for symptoms like dizziness",
            "Consult a doctor if symptoms occur",
        ],
    },
    Band {
        max: 100.0,
        inclusive: true,
        status: HealthStatus::Good,
        message: "Normal heart rate",
        recommendations: &["Maintain a healthy lifestyle"],
    },
    Band {
        max: f64::INFINITY,
        inclusive: true,
        status: HealthStatus::Warning,
        message: "Elevated heart rate",
        recommendations: &[
            "Reduce caffeine intake",
            "Check if condition persists",
            "Practice deep breathing to relax",
        ],
    },
];

const SLEEP_MIN: f64 = 6.0;
const SLEEP_OPTIMAL_MIN: f64 = 7.0;
const SLEEP_OPTIMAL_MAX: f64 = 9.0;

const BP_NORMAL: (i64, i64) = (120, 80);
const BP_ELEVATED: i64 = 129;
const BP_HIGH_1: (i64, i64) = (139, 89);
const BP_HIGH_2: (i64, i64) = (180, 120);

/// Multi-domain analyzer that generates health reports from one record.
///
/// Basic domains (BMI, blood pressure, sleep, stress) come first, then
/// the advanced domains (cardiovascular, advanced sleep, lifestyle);
/// the summary aggregator depends on this evaluation order.
pub struct HealthAnalyzer {
    aggregator: SummaryAggregator,
}

impl Default for HealthAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            aggregator: SummaryAggregator::new(),
        }
    }

    /// Use a summary aggregator (for example one carrying an enricher).
    #[must_use]
    pub fn with_aggregator(aggregator: SummaryAggregator) -> Self {
        Self { aggregator }
    }

    /// Perform the full rule-based analysis for one record.
    #[must_use]
    pub fn analyze(&self, record: &RawHealthRecord) -> DomainAnalysis {
        self.run(record, None)
    }

    /// Analyze and let the aggregator enrich the summary with the
    /// prediction context.
    #[must_use]
    pub fn analyze_with_prediction(
        &self,
        record: &RawHealthRecord,
        prediction: &PredictionResult,
    ) -> DomainAnalysis {
        self.run(record, Some(prediction))
    }

    fn run(&self, record: &RawHealthRecord, prediction: Option<&PredictionResult>) -> DomainAnalysis {
        let id = analysis_id();
        let reports = self.reports(record);
        let summary = self.aggregator.summarize(&reports, record, prediction);

        tracing::info!(
            "Domain analysis {id}: {} reports, overall={:?}",
            reports.len(),
            summary.overall_status
        );

        DomainAnalysis {
            id,
            reports,
            summary,
            generated_at: Utc::now(),
        }
    }

    /// Evaluate every activated domain, in the fixed evaluation order.
    #[must_use]
    pub fn reports(&self, record: &RawHealthRecord) -> Vec<HealthReport> {
        [
            Self::analyze_bmi(record),
            Self::analyze_blood_pressure(record),
            Self::analyze_sleep_basic(record),
            Self::analyze_stress(record),
            Self::analyze_cardiovascular(record),
            Self::analyze_sleep_advanced(record),
            Self::analyze_lifestyle(record),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn analyze_bmi(record: &RawHealthRecord) -> Option<HealthReport> {
        let height = record.number(fields::HEIGHT).filter(|h| *h > 0.0)?;
        let weight = record.number(fields::WEIGHT).filter(|w| *w > 0.0)?;
        let bmi = weight / (height / 100.0).powi(2);

        let band = classify(BMI_BANDS, bmi);
        Some(report("BMI", band, format!("{bmi:.1}")))
    }

    fn analyze_blood_pressure(record: &RawHealthRecord) -> Option<HealthReport> {
        if !record.is_present(fields::BLOOD_PRESSURE) {
            return None;
        }

        // Present but unparseable readings fall back to the documented
        // default rather than dropping the domain.
        let (systolic, diastolic) = record
            .text(fields::BLOOD_PRESSURE)
            .and_then(parse_blood_pressure)
            .unwrap_or(BP_NORMAL);

        let (status, message, recommendations): (HealthStatus, &str, &[&str]) =
            if systolic < BP_NORMAL.0 && diastolic < BP_NORMAL.1 {
                (
                    HealthStatus::Good,
                    "Normal blood pressure",
                    &["Maintain a healthy lifestyle"],
                )
            } else if systolic < BP_ELEVATED {
                (
                    HealthStatus::Good,
                    "Normal blood pressure",
                    &["Continue regular blood pressure monitoring"],
                )
            } else if systolic < BP_HIGH_1.0 || diastolic < BP_HIGH_1.1 {
                (
                    HealthStatus::Warning,
                    "Elevated blood pressure",
                    &[
                        "Reduce salt in your diet",
                        "Exercise regularly",
                        "Monitor blood pressure frequently",
                    ],
                )
            } else if systolic < BP_HIGH_2.0 || diastolic < BP_HIGH_2.1 {
                (
                    HealthStatus::Danger,
                    "High blood pressure Stage 1",
                    &["Consult a doctor", "Reduce stress", "Limit alcohol and tobacco"],
                )
            } else {
                (
                    HealthStatus::Danger,
                    "Severe high blood pressure",
                    &[
                        "See a doctor immediately",
                        "Monitor blood pressure daily",
                        "Follow prescribed treatment strictly",
                    ],
                )
            };

        Some(HealthReport::new(
            "Blood Pressure",
            status,
            format!("{systolic}/{diastolic} mmHg"),
            message,
            recommendations.iter().map(|r| r.to_string()).collect(),
        ))
    }

    fn analyze_sleep_basic(record: &RawHealthRecord) -> Option<HealthReport> {
        let duration = record.number(fields::SLEEP_DURATION)?;
        let quality = record.number(fields::SLEEP_QUALITY)?;

        let (status, message, recommendations): (HealthStatus, &str, &[&str]) =
            if duration < SLEEP_MIN {
                (
                    HealthStatus::Danger,
                    "Severe sleep deprivation",
                    &[
                        "Try to sleep at least 7 hours per night",
                        "Establish a regular bedtime routine",
                        "Avoid caffeine after 2 PM",
                    ],
                )
            } else if duration < SLEEP_OPTIMAL_MIN {
                (
                    HealthStatus::Warning,
                    "Insufficient sleep",
                    &[
                        "Increase sleep time by 30-60 minutes",
                        "Improve sleep environment",
                    ],
                )
            } else if duration <= SLEEP_OPTIMAL_MAX {
                if quality >= 4.0 {
                    (
                        HealthStatus::Good,
                        "Good sleep",
                        &["Maintain your current sleep habits"],
                    )
                } else {
                    (
                        HealthStatus::Warning,
                        "Adequate duration but poor quality",
                        &[
                            "Improve sleep environment",
                            "Avoid screens 1 hour before bed",
                        ],
                    )
                }
            } else {
                (
                    HealthStatus::Warning,
                    "Excessive sleep",
                    &[
                        "Reduce sleep to 7-8 hours",
                        "Check health if still feeling tired",
                    ],
                )
            };

        Some(HealthReport::new(
            "Sleep",
            status,
            format!("{duration}h - Quality {quality}/5"),
            message,
            recommendations.iter().map(|r| r.to_string()).collect(),
        ))
    }

    fn analyze_stress(record: &RawHealthRecord) -> Option<HealthReport> {
        let stress = record.number(fields::STRESS_LEVEL)?;
        let band = classify(STRESS_BANDS, stress);
        Some(report("Stress", band, format!("Level {stress}/5")))
    }

    fn analyze_cardiovascular(record: &RawHealthRecord) -> Option<HealthReport> {
        let heart_rate = record.number(fields::HEART_RATE)?;
        let band = classify(HEART_RATE_BANDS, heart_rate);
        Some(report("Cardiovascular", band, format!("{heart_rate} bpm")))
    }

    fn analyze_sleep_advanced(record: &RawHealthRecord) -> Option<HealthReport> {
        const FLAG_RULES: &[(&str, &str, &str)] = &[
            (
                fields::SLEEP_DISORDER,
                "sleep disorder",
                "Consult a doctor about sleep disorder treatment",
            ),
            (
                fields::WAKE_UP_DURING_NIGHT,
                "waking up at night",
                "Avoid drinking too much water before bed",
            ),
            (
                fields::FEEL_SLEEPY_DURING_DAY,
                "daytime sleepiness",
                "Take short 15-20 minute naps",
            ),
            (
                fields::SMART_DEVICE_BEFORE_BED,
                "device use before bed",
                "Turn off devices at least 1 hour before sleep",
            ),
        ];

        if !FLAG_RULES
            .iter()
            .any(|(field, _, _)| record.is_present(field))
        {
            return None;
        }

        let mut issues: Vec<&str> = Vec::new();
        let mut recommendations: Vec<String> = Vec::new();
        for (field, issue, recommendation) in FLAG_RULES {
            if record.flag(field) {
                issues.push(issue);
                recommendations.push((*recommendation).to_string());
            }
        }

        let (status, message) = match issues.len() {
            0 => (
                HealthStatus::Good,
                "No advanced sleep issues".to_string(),
            ),
            1 | 2 => (
                HealthStatus::Warning,
                format!("Issues: {}", issues.join(", ")),
            ),
            _ => (
                HealthStatus::Danger,
                format!("Multiple sleep issues: {}", issues.join(", ")),
            ),
        };

        if recommendations.is_empty() {
            recommendations.push("Maintain good sleep habits".to_string());
        }

        Some(HealthReport::new(
            "Advanced Sleep",
            status,
            format!("{} issues", issues.len()),
            message,
            recommendations,
        ))
    }

    fn analyze_lifestyle(record: &RawHealthRecord) -> Option<HealthReport> {
        let activation_fields = [
            fields::DAILY_STEPS,
            fields::PHYSICAL_ACTIVITY,
            fields::CAFFEINE_CONSUMPTION,
            fields::ALCOHOL_CONSUMPTION,
            fields::SMOKING,
        ];
        if !activation_fields.iter().any(|f| record.is_present(f)) {
            return None;
        }

        let mut score = 0u32;
        let mut max_score = 0u32;
        let mut recommendations: Vec<String> = Vec::new();

        if let Some(steps) = record.number(fields::DAILY_STEPS).filter(|s| *s != 0.0) {
            max_score += 2;
            if steps >= 8000.0 {
                score += 2;
            } else if steps >= 5000.0 {
                score += 1;
                recommendations.push("Increase daily steps to 8000".to_string());
            } else {
                recommendations.push("Try to walk more, aim for 8000 steps/day".to_string());
            }
        }

        if let Some(activity) = record
            .number(fields::PHYSICAL_ACTIVITY)
            .filter(|a| *a != 0.0)
        {
            max_score += 2;
            if activity >= 30.0 {
                score += 2;
            } else if activity >= 15.0 {
                score += 1;
                recommendations.push("Increase exercise to 30 min/day".to_string());
            } else {
                recommendations.push("Start with at least 15 min exercise/day".to_string());
            }
        }

        if record.is_present(fields::SMOKING) {
            max_score += 3;
            if !record.flag(fields::SMOKING) {
                score += 3;
            } else {
                recommendations
                    .push("Quit smoking to significantly improve health".to_string());
            }
        }

        if record.is_present(fields::ALCOHOL_CONSUMPTION) {
            max_score += 1;
            if !record.flag(fields::ALCOHOL_CONSUMPTION) {
                score += 1;
            } else {
                recommendations.push("Limit alcohol consumption".to_string());
            }
        }

        if record.is_present(fields::CAFFEINE_CONSUMPTION) {
            max_score += 1;
            if !record.flag(fields::CAFFEINE_CONSUMPTION) {
                score += 1;
            }
        }

        if max_score == 0 {
            return Some(HealthReport::new(
                "Lifestyle",
                HealthStatus::Unknown,
                "Insufficient data",
                "Need more lifestyle information",
                Vec::new(),
            ));
        }

        let percentage = (f64::from(score) / f64::from(max_score)) * 100.0;
        let (status, message) = if percentage >= 80.0 {
            (HealthStatus::Good, "Healthy lifestyle")
        } else if percentage >= 50.0 {
            (HealthStatus::Warning, "Lifestyle needs improvement")
        } else {
            (HealthStatus::Danger, "Unhealthy lifestyle")
        };

        if recommendations.is_empty() {
            recommendations.push("Maintain your current lifestyle".to_string());
        }

        Some(HealthReport::new(
            "Lifestyle",
            status,
            format!("{percentage:.0}%"),
            message,
            recommendations,
        ))
    }
}

fn report(domain: &str, band: &'static Band, value: String) -> HealthReport {
    HealthReport::new(
        domain,
        band.status,
        value,
        band.message,
        band.recommendations.iter().map(|r| r.to_string()).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bmi_record(height: f64, weight: f64) -> RawHealthRecord {
        RawHealthRecord::new()
            .with_number(fields::HEIGHT, height)
            .with_number(fields::WEIGHT, weight)
    }

    fn bmi_status(bmi: f64) -> (HealthStatus, String) {
        // Height 100cm makes weight numerically equal to BMI.
        let report = HealthAnalyzer::analyze_bmi(&bmi_record(100.0, bmi)).expect("activated");
        (report.status, report.message)
    }

    #[test]
    fn test_bmi_boundaries() {
        assert_eq!(
            bmi_status(18.4),
            (HealthStatus::Warning, "Underweight".to_string())
        );
        assert_eq!(
            bmi_status(18.5),
            (HealthStatus::Good, "Normal weight".to_string())
        );
        assert_eq!(
            bmi_status(24.9),
            (HealthStatus::Good, "Normal weight".to_string())
        );
        assert_eq!(
            bmi_status(25.0),
            (HealthStatus::Warning, "Overweight".to_string())
        );
        assert_eq!(
            bmi_status(29.9),
            (HealthStatus::Warning, "Overweight".to_string())
        );
        assert_eq!(bmi_status(30.0), (HealthStatus::Danger, "Obese".to_string()));
    }

    #[test]
    fn test_bmi_requires_both_fields() {
        let record = RawHealthRecord::new().with_number(fields::HEIGHT, 175.0);
        assert!(HealthAnalyzer::analyze_bmi(&record).is_none());
    }

    fn bp_report(reading: &str) -> HealthReport {
        let record = RawHealthRecord::new().with_text(fields::BLOOD_PRESSURE, reading);
        HealthAnalyzer::analyze_blood_pressure(&record).expect("activated")
    }

    #[test]
    fn test_blood_pressure_classification() {
        let optimal = bp_report("110/70");
        assert_eq!(optimal.status, HealthStatus::Good);
        assert_eq!(optimal.recommendations[0], "Maintain a healthy lifestyle");

        let elevated = bp_report("130/85");
        assert_eq!(elevated.status, HealthStatus::Warning);
        assert_eq!(elevated.message, "Elevated blood pressure");

        let stage1 = bp_report("150/95");
        assert_eq!(stage1.status, HealthStatus::Danger);
        assert_eq!(stage1.message, "High blood pressure Stage 1");

        let severe = bp_report("185/125");
        assert_eq!(severe.status, HealthStatus::Danger);
        assert_eq!(severe.message, "Severe high blood pressure");
    }

    #[test]
    fn test_blood_pressure_malformed_uses_default() {
        let report = bp_report("not a reading");
        assert_eq!(report.value, "120/80 mmHg");
        assert_eq!(report.status, HealthStatus::Good);
    }

    #[test]
    fn test_blood_pressure_absent_yields_no_report() {
        let record = RawHealthRecord::new();
        assert!(HealthAnalyzer::analyze_blood_pressure(&record).is_none());
    }

    fn sleep_report(duration: f64, quality: f64) -> HealthReport {
        let record = RawHealthRecord::new()
            .with_number(fields::SLEEP_DURATION, duration)
            .with_number(fields::SLEEP_QUALITY, quality);
        HealthAnalyzer::analyze_sleep_basic(&record).expect("activated")
    }

    #[test]
    fn test_sleep_basic_branches() {
        assert_eq!(sleep_report(5.0, 4.0).status, HealthStatus::Danger);
        assert_eq!(sleep_report(6.5, 3.0).message, "Insufficient sleep");
        assert_eq!(sleep_report(8.0, 4.0).status, HealthStatus::Good);
        assert_eq!(
            sleep_report(8.0, 2.0).message,
            "Adequate duration but poor quality"
        );
        assert_eq!(sleep_report(10.0, 4.0).message, "Excessive sleep");
    }

    #[test]
    fn test_sleep_display_value() {
        assert_eq!(sleep_report(6.5, 3.0).value, "6.5h - Quality 3/5");
    }

    #[test]
    fn test_stress_levels() {
        let stress = |level: f64| {
            let record = RawHealthRecord::new().with_number(fields::STRESS_LEVEL, level);
            HealthAnalyzer::analyze_stress(&record).expect("activated")
        };
        assert_eq!(stress(2.0).status, HealthStatus::Good);
        assert_eq!(stress(3.0).message, "Moderate stress level");
        assert_eq!(stress(4.0).status, HealthStatus::Warning);
        assert_eq!(stress(5.0).status, HealthStatus::Danger);
    }

    #[test]
    fn test_cardiovascular_bands() {
        let heart = |hr: f64| {
            let record = RawHealthRecord::new().with_number(fields::HEART_RATE, hr);
            HealthAnalyzer::analyze_cardiovascular(&record).expect("activated")
        };
        assert_eq!(heart(55.0).message, "Low heart rate");
        assert_eq!(heart(60.0).status, HealthStatus::Good);
        assert_eq!(heart(100.0).status, HealthStatus::Good);
        assert_eq!(heart(105.0).message, "Elevated heart rate");
    }

    #[test]
    fn test_sleep_advanced_issue_counting() {
        let record = RawHealthRecord::new()
            .with_text(fields::SLEEP_DISORDER, "N")
            .with_text(fields::WAKE_UP_DURING_NIGHT, "Y")
            .with_text(fields::FEEL_SLEEPY_DURING_DAY, "Y");
        let report = HealthAnalyzer::analyze_sleep_advanced(&record).expect("activated");

        assert_eq!(report.status, HealthStatus::Warning);
        assert_eq!(report.value, "2 issues");
        assert_eq!(report.message, "Issues: waking up at night, daytime sleepiness");
        assert_eq!(report.recommendations.len(), 2);
    }

    #[test]
    fn test_sleep_advanced_three_issues_is_danger() {
        let record = RawHealthRecord::new()
            .with_text(fields::SLEEP_DISORDER, "Y")
            .with_text(fields::WAKE_UP_DURING_NIGHT, "Y")
            .with_text(fields::SMART_DEVICE_BEFORE_BED, "Y");
        let report = HealthAnalyzer::analyze_sleep_advanced(&record).expect("activated");

        assert_eq!(report.status, HealthStatus::Danger);
        assert!(report.message.starts_with("Multiple sleep issues:"));
    }

    #[test]
    fn test_sleep_advanced_no_issues() {
        let record = RawHealthRecord::new().with_text(fields::SLEEP_DISORDER, "N");
        let report = HealthAnalyzer::analyze_sleep_advanced(&record).expect("activated");

        assert_eq!(report.status, HealthStatus::Good);
        assert_eq!(report.message, "No advanced sleep issues");
        assert_eq!(report.recommendations, vec!["Maintain good sleep habits"]);
    }

    #[test]
    fn test_lifestyle_fully_healthy() {
        let record = RawHealthRecord::new()
            .with_number(fields::DAILY_STEPS, 9000.0)
            .with_number(fields::PHYSICAL_ACTIVITY, 45.0)
            .with_text(fields::SMOKING, "N")
            .with_text(fields::ALCOHOL_CONSUMPTION, "N")
            .with_text(fields::CAFFEINE_CONSUMPTION, "N");
        let report = HealthAnalyzer::analyze_lifestyle(&record).expect("activated");

        assert_eq!(report.status, HealthStatus::Good);
        assert_eq!(report.value, "100%");
        assert_eq!(report.recommendations, vec!["Maintain your current lifestyle"]);
    }

    #[test]
    fn test_lifestyle_weighted_scoring() {
        // steps 1/2, activity 1/2, smoker 0/3 => 2/7 ~ 29% => Danger.
        let record = RawHealthRecord::new()
            .with_number(fields::DAILY_STEPS, 6000.0)
            .with_number(fields::PHYSICAL_ACTIVITY, 20.0)
            .with_text(fields::SMOKING, "Y");
        let report = HealthAnalyzer::analyze_lifestyle(&record).expect("activated");

        assert_eq!(report.status, HealthStatus::Danger);
        assert_eq!(report.message, "Unhealthy lifestyle");
        assert!(report
            .recommendations
            .contains(&"Quit smoking to significantly improve health".to_string()));
    }

    #[test]
    fn test_lifestyle_zero_attainable_points_is_unknown() {
        // Present-but-zero steps activate the domain without contributing
        // attainable points.
        let record = RawHealthRecord::new().with_number(fields::DAILY_STEPS, 0.0);
        let report = HealthAnalyzer::analyze_lifestyle(&record).expect("activated");

        assert_eq!(report.status, HealthStatus::Unknown);
        assert_eq!(report.value, "Insufficient data");
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_evaluation_order() {
        let record = RawHealthRecord::new()
            .with_number(fields::HEIGHT, 175.0)
            .with_number(fields::WEIGHT, 80.0)
            .with_text(fields::BLOOD_PRESSURE, "130/85")
            .with_number(fields::SLEEP_DURATION, 6.5)
            .with_number(fields::SLEEP_QUALITY, 3.0)
            .with_number(fields::STRESS_LEVEL, 4.0)
            .with_number(fields::HEART_RATE, 75.0)
            .with_text(fields::SLEEP_DISORDER, "N")
            .with_number(fields::DAILY_STEPS, 9000.0);

        let analyzer = HealthAnalyzer::new();
        let domains: Vec<String> = analyzer
            .reports(&record)
            .into_iter()
            .map(|r| r.domain)
            .collect();
        assert_eq!(
            domains,
            vec![
                "BMI",
                "Blood Pressure",
                "Sleep",
                "Stress",
                "Cardiovascular",
                "Advanced Sleep",
                "Lifestyle"
            ]
        );
    }

    /// End-to-end scenario from the product acceptance checklist.
    #[test]
    fn test_warning_scenario_end_to_end() {
        let record = RawHealthRecord::new()
            .with_number(fields::HEIGHT, 175.0)
            .with_number(fields::WEIGHT, 80.0)
            .with_text(fields::BLOOD_PRESSURE, "130/85")
            .with_number(fields::SLEEP_DURATION, 6.5)
            .with_number(fields::SLEEP_QUALITY, 3.0)
            .with_number(fields::STRESS_LEVEL, 4.0);

        let analysis = HealthAnalyzer::new().analyze(&record);
        assert_eq!(analysis.reports.len(), 4);

        let by_domain = |name: &str| {
            analysis
                .reports
                .iter()
                .find(|r| r.domain == name)
                .expect("report present")
        };

        let bmi = by_domain("BMI");
        assert_eq!(bmi.status, HealthStatus::Warning);
        assert_eq!(bmi.message, "Overweight");
        assert_eq!(bmi.value, "26.1");

        assert_eq!(by_domain("Blood Pressure").message, "Elevated blood pressure");
        assert_eq!(by_domain("Sleep").message, "Insufficient sleep");
        assert_eq!(by_domain("Stress").message, "High stress");

        assert_eq!(analysis.summary.overall_status, HealthStatus::Warning);
        assert_eq!(analysis.summary.warning_count, 4);
        assert_eq!(analysis.summary.top_recommendations.len(), 5);
        assert_eq!(
            analysis.summary.top_recommendations[0],
            "Reduce daily calorie intake"
        );
    }
}
