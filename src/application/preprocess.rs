//! Feature preprocessor: raw survey record to model-aligned feature vector.
//!
//! Applies the documented missing-data policy (fixed default tables), parses
//! the blood pressure string, encodes categoricals through the fixed
//! codebook persisted with the model artifact, derives BMI and the
//! engineered screen/sleep/stress features, and aligns the result to the
//! classifier's declared column order.
//!
//! Every substituted default is recorded in an audit list so degradation
//! stays observable.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::{fields, FeatureSchema, FeatureVector, RawHealthRecord};
use crate::OculensError;

/// Derived column names produced by preprocessing.
pub mod derived {
    pub const BP_SYSTOLIC: &str = "BP_Systolic";
    pub const BP_DIASTOLIC: &str = "BP_Diastolic";
    pub const BMI: &str = "BMI";
    pub const EYE_LOAD: &str = "Eye_Load";
    pub const SCREEN_TO_SLEEP_RATIO: &str = "Screen_to_Sleep_Ratio";
    pub const STRESS_METABOLIC: &str = "Stress_Metabolic";
}

/// Substituted when the blood pressure field is missing, empty or malformed.
pub const DEFAULT_BLOOD_PRESSURE: (i64, i64) = (120, 80);

/// Per-field numeric fallback values, applied when the field is absent.
pub const NUMERIC_DEFAULTS: &[(&str, f64)] = &[
    (fields::AGE, 30.0),
    (fields::HEIGHT, 165.0),
    (fields::WEIGHT, 70.0),
    (fields::HEART_RATE, 75.0),
    (fields::SLEEP_DURATION, 7.0),
    (fields::SLEEP_QUALITY, 3.0),
    (fields::STRESS_LEVEL, 3.0),
    (fields::DAILY_STEPS, 8000.0),
    (fields::PHYSICAL_ACTIVITY, 30.0),
    (fields::AVERAGE_SCREEN_TIME, 6.0),
];

/// Per-field categorical fallback levels, applied when the field is absent.
pub const CATEGORICAL_DEFAULTS: &[(&str, &str)] = &[
    (fields::GENDER, "M"),
    (fields::SLEEP_DISORDER, "N"),
    (fields::WAKE_UP_DURING_NIGHT, "N"),
    (fields::FEEL_SLEEPY_DURING_DAY, "N"),
    (fields::CAFFEINE_CONSUMPTION, "Y"),
    (fields::ALCOHOL_CONSUMPTION, "N"),
    (fields::SMOKING, "N"),
    (fields::MEDICAL_ISSUE, "N"),
    (fields::ONGOING_MEDICATION, "N"),
    (fields::SMART_DEVICE_BEFORE_BED, "Y"),
    (fields::BLUE_LIGHT_FILTER, "N"),
    (fields::DISCOMFORT_EYE_STRAIN, "N"),
    (fields::REDNESS_IN_EYE, "N"),
    (fields::ITCHINESS_IRRITATION, "N"),
];

/// Fixed category-to-code mapping, persisted alongside the model artifact.
///
/// Codes are indices into each column's ordered level list. The mapping is
/// fitted once at training time and never re-fitted at inference, so the
/// same category always maps to the same code across calls.
#[derive(Debug, Clone)]
pub struct CategoryEncoder {
    levels: BTreeMap<String, Vec<String>>,
}

impl CategoryEncoder {
    #[must_use]
    pub fn new(levels: BTreeMap<String, Vec<String>>) -> Self {
        Self { levels }
    }

    /// Codebook with the natural two-level encodings of the survey
    /// ("N"/"Y" flags, "F"/"M" gender), for callers without an artifact.
    #[must_use]
    pub fn survey_default() -> Self {
        let mut levels = BTreeMap::new();
        for (column, _) in CATEGORICAL_DEFAULTS {
            let column_levels = if *column == fields::GENDER {
                vec!["F".to_string(), "M".to_string()]
            } else {
                vec!["N".to_string(), "Y".to_string()]
            };
            levels.insert((*column).to_string(), column_levels);
        }
        Self { levels }
    }

    /// Code for a category value, if both column and level are known.
    #[must_use]
    pub fn encode(&self, column: &str, value: &str) -> Option<usize> {
        self.levels
            .get(column)?
            .iter()
            .position(|level| level == value)
    }

    /// Category value for a code, if both column and code are known.
    #[must_use]
    pub fn decode(&self, column: &str, code: usize) -> Option<&str> {
        self.levels.get(column)?.get(code).map(String::as_str)
    }
}

/// Preprocessing output: the aligned vector plus the audit of which raw
/// fields received documented defaults.
#[derive(Debug, Clone)]
pub struct PreparedFeatures {
    pub features: FeatureVector,
    pub defaulted_fields: Vec<String>,
}

/// Preprocessor bound to one classifier schema and one fixed codebook.
///
/// Read-only after construction; safe to share across concurrent calls.
pub struct Preprocessor {
    schema: Arc<FeatureSchema>,
    encoder: CategoryEncoder,
}

impl Preprocessor {
    #[must_use]
    pub fn new(schema: Arc<FeatureSchema>, encoder: CategoryEncoder) -> Self {
        Self { schema, encoder }
    }

    /// Prepare one record.
    ///
    /// # Errors
    /// Returns `OculensError::Validation` if height or weight is present but
    /// non-numeric or not strictly positive.
    pub fn prepare(&self, record: &RawHealthRecord) -> Result<PreparedFeatures, OculensError> {
        self.validate_body_metrics(record)?;

        let mut computed: BTreeMap<String, f64> = BTreeMap::new();
        let mut defaulted: Vec<String> = Vec::new();

        // Blood pressure: "<int>/<int>" or the documented default.
        let (systolic, diastolic) = match record
            .text(fields::BLOOD_PRESSURE)
            .and_then(parse_blood_pressure)
        {
            Some(bp) => bp,
            None => {
                defaulted.push(fields::BLOOD_PRESSURE.to_string());
                DEFAULT_BLOOD_PRESSURE
            }
        };
        computed.insert(derived::BP_SYSTOLIC.to_string(), systolic as f64);
        computed.insert(derived::BP_DIASTOLIC.to_string(), diastolic as f64);

        for &(field, default) in NUMERIC_DEFAULTS {
            let value = match record.number(field) {
                Some(v) => v,
                None => {
                    defaulted.push(field.to_string());
                    default
                }
            };
            computed.insert(field.to_string(), value);
        }

        for &(field, default_level) in CATEGORICAL_DEFAULTS {
            let raw = match record.text(field) {
                Some(v) => v,
                None => {
                    defaulted.push(field.to_string());
                    default_level
                }
            };
            let code = match self.encoder.encode(field, raw) {
                Some(code) => code,
                None => {
                    // Unknown category at inference time maps to the
                    // documented default level rather than re-fitting.
                    tracing::warn!("Unknown category for {field}, substituting default");
                    if !defaulted.iter().any(|f| f == field) {
                        defaulted.push(field.to_string());
                    }
                    self.encoder.encode(field, default_level).unwrap_or(0)
                }
            };
            computed.insert(field.to_string(), code as f64);
        }

        // Derived features.
        let height = computed[fields::HEIGHT];
        let weight = computed[fields::WEIGHT];
        computed.insert(
            derived::BMI.to_string(),
            weight / (height / 100.0).powi(2),
        );

        let screen_time = computed[fields::AVERAGE_SCREEN_TIME];
        let sleep_duration = computed[fields::SLEEP_DURATION];
        let blue_light = computed[fields::BLUE_LIGHT_FILTER];
        let stress = computed[fields::STRESS_LEVEL];

        let screen_to_sleep = screen_time / (sleep_duration + 0.1);
        computed.insert(
            derived::EYE_LOAD.to_string(),
            screen_to_sleep * (1.0 + 0.5 * blue_light),
        );
        computed.insert(derived::SCREEN_TO_SLEEP_RATIO.to_string(), screen_to_sleep);
        computed.insert(
            derived::STRESS_METABOLIC.to_string(),
            stress * systolic as f64,
        );

        // Schema alignment: select and order exactly the declared columns,
        // zero-filling anything the record pipeline did not produce.
        let values: Vec<f64> = self
            .schema
            .columns()
            .iter()
            .map(|column| computed.get(column).copied().unwrap_or(0.0))
            .collect();

        let features = FeatureVector::new(Arc::clone(&self.schema), values)
            .map_err(OculensError::Prediction)?;

        if !defaulted.is_empty() {
            tracing::debug!("Applied defaults to {} fields", defaulted.len());
        }

        Ok(PreparedFeatures {
            features,
            defaulted_fields: defaulted,
        })
    }

    /// Prepare a batch of records, failing on the first invalid one.
    ///
    /// # Errors
    /// Same per-record conditions as [`Preprocessor::prepare`].
    pub fn prepare_batch(
        &self,
        records: &[RawHealthRecord],
    ) -> Result<Vec<PreparedFeatures>, OculensError> {
        records.iter().map(|r| self.prepare(r)).collect()
    }

    fn validate_body_metrics(&self, record: &RawHealthRecord) -> Result<(), OculensError> {
        for field in [fields::HEIGHT, fields::WEIGHT] {
            if !record.is_present(field) {
                continue;
            }
            match record.number(field) {
                None => {
                    return Err(OculensError::Validation {
                        field: field.to_string(),
                        message: "must be numeric".to_string(),
                    })
                }
                Some(v) if v <= 0.0 => {
                    return Err(OculensError::Validation {
                        field: field.to_string(),
                        message: format!("must be positive, got {v}"),
                    })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Parse a "<int>/<int>" blood pressure string.
#[must_use]
pub fn parse_blood_pressure(text: &str) -> Option<(i64, i64)> {
    let (systolic, diastolic) = text.split_once('/')?;
    let systolic = systolic.trim().parse::<i64>().ok()?;
    let diastolic = diastolic.trim().parse::<i64>().ok()?;
    Some((systolic, diastolic))
}
