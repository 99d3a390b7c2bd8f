//! Raw survey record types.
//!
//! One self-reported survey row, keyed by the original dataset's column
//! names. Any field may be absent, null, or empty; downstream policy
//! (defaults vs. validation errors) lives in the application layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Survey column names shared by the prediction pipeline and the
/// rule-based analyzer.
pub mod fields {
    pub const GENDER: &str = "Gender";
    pub const AGE: &str = "Age";
    pub const HEIGHT: &str = "Height";
    pub const WEIGHT: &str = "Weight";
    pub const BLOOD_PRESSURE: &str = "Blood pressure";
    pub const HEART_RATE: &str = "Heart rate";
    pub const SLEEP_DURATION: &str = "Sleep duration";
    pub const SLEEP_QUALITY: &str = "Sleep quality";
    pub const STRESS_LEVEL: &str = "Stress level";
    pub const DAILY_STEPS: &str = "Daily steps";
    pub const PHYSICAL_ACTIVITY: &str = "Physical activity";
    pub const SLEEP_DISORDER: &str = "Sleep disorder";
    pub const WAKE_UP_DURING_NIGHT: &str = "Wake up during night";
    pub const FEEL_SLEEPY_DURING_DAY: &str = "Feel sleepy during day";
    pub const CAFFEINE_CONSUMPTION: &str = "Caffeine consumption";
    pub const ALCOHOL_CONSUMPTION: &str = "Alcohol consumption";
    pub const SMOKING: &str = "Smoking";
    pub const MEDICAL_ISSUE: &str = "Medical issue";
    pub const ONGOING_MEDICATION: &str = "Ongoing medication";
    pub const SMART_DEVICE_BEFORE_BED: &str = "Smart device before bed";
    pub const AVERAGE_SCREEN_TIME: &str = "Average screen time";
    pub const BLUE_LIGHT_FILTER: &str = "Blue-light filter";
    pub const DISCOMFORT_EYE_STRAIN: &str = "Discomfort Eye-strain";
    pub const REDNESS_IN_EYE: &str = "Redness in eye";
    pub const ITCHINESS_IRRITATION: &str = "Itchiness/Irritation in eye";
}

/// A single survey field value.
///
/// Survey submissions arrive as loosely typed JSON, so numbers may show up
/// either as JSON numbers or as numeric strings ("6.5").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric value (age, hours, counts, 1-5 scales).
    Number(f64),
    /// Text value ("Y"/"N" flags, "120/80" blood pressure, gender).
    Text(String),
    /// Explicit null in the submitted payload.
    Null,
}

/// One person's raw self-reported health metrics, immutable once received.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawHealthRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl RawHealthRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion, mainly for tests and the demo binary.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    #[must_use]
    pub fn with_number(self, field: impl Into<String>, value: f64) -> Self {
        self.with(field, FieldValue::Number(value))
    }

    #[must_use]
    pub fn with_text(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(field, FieldValue::Text(value.into()))
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Whether a field is present with a usable value.
    ///
    /// Null values and empty/whitespace-only strings count as absent; this is
    /// the shared missing-data policy of both pipelines.
    #[must_use]
    pub fn is_present(&self, field: &str) -> bool {
        match self.fields.get(field) {
            Some(FieldValue::Number(n)) => n.is_finite(),
            Some(FieldValue::Text(s)) => !s.trim().is_empty(),
            Some(FieldValue::Null) | None => false,
        }
    }

    /// Numeric view of a field. Numeric strings are accepted.
    #[must_use]
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.fields.get(field)? {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Text view of a field (trimmed). Absent for null/empty values.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        match self.fields.get(field)? {
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        }
    }

    /// Whether a Y/N flag field is set to "Y".
    #[must_use]
    pub fn flag(&self, field: &str) -> bool {
        self.text(field) == Some("Y")
    }

    /// Iterate over all stored fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_policy() {
        let record = RawHealthRecord::new()
            .with_number(fields::AGE, 35.0)
            .with_text(fields::GENDER, "M")
            .with_text(fields::BLOOD_PRESSURE, "")
            .with(fields::HEART_RATE, FieldValue::Null);

        assert!(record.is_present(fields::AGE));
        assert!(record.is_present(fields::GENDER));
        assert!(!record.is_present(fields::BLOOD_PRESSURE));
        assert!(!record.is_present(fields::HEART_RATE));
        assert!(!record.is_present(fields::SMOKING));
    }

    #[test]
    fn test_numeric_text_is_accepted() {
        let record = RawHealthRecord::new()
            .with_text(fields::SLEEP_DURATION, "6.5")
            .with_text(fields::GENDER, "M");

        assert_eq!(record.number(fields::SLEEP_DURATION), Some(6.5));
        assert_eq!(record.number(fields::GENDER), None);
    }

    #[test]
    fn test_flag_requires_exact_yes() {
        let record = RawHealthRecord::new()
            .with_text(fields::SMOKING, "Y")
            .with_text(fields::ALCOHOL_CONSUMPTION, "N");

        assert!(record.flag(fields::SMOKING));
        assert!(!record.flag(fields::ALCOHOL_CONSUMPTION));
        assert!(!record.flag(fields::CAFFEINE_CONSUMPTION));
    }

    #[test]
    fn test_deserialize_mixed_payload() {
        let json = r#"{"Age": 35, "Gender": "M", "Sleep duration": "6.5", "Heart rate": null}"#;
        let record: RawHealthRecord = serde_json::from_str(json).expect("Should deserialize");

        assert_eq!(record.number(fields::AGE), Some(35.0));
        assert_eq!(record.text(fields::GENDER), Some("M"));
        assert_eq!(record.number(fields::SLEEP_DURATION), Some(6.5));
        assert!(!record.is_present(fields::HEART_RATE));
    }
}
