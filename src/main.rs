//! Oculens demo binary.
//!
//! Runs both pipelines over one survey record and prints the combined
//! result as JSON on stdout. The record comes from a JSON file given as
//! the first argument, or a built-in sample when none is given. The
//! model artifact is looked up under `OCULENS_MODEL_DIR` (default
//! `models`); when absent, a small bundled demonstration model is used
//! so the binary works out of the box.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use oculens::adapters::sanitize::SanitizingMakeWriter;
use oculens::adapters::{CalibratedLinearModel, ExportedCalibratedModel};
use oculens::application::{CategoryEncoder, SummaryAggregator};
use oculens::domain::fields;
use oculens::{HealthAnalyzer, RawHealthRecord, RiskService, StaticEnricher};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(SanitizingMakeWriter::new(std::io::stderr)),
        )
        .init();

    let record = match std::env::args().nth(1) {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("reading record from {path}"))?;
            serde_json::from_str(&content).with_context(|| format!("parsing record {path}"))?
        }
        None => sample_record(),
    };

    let model = load_model()?;
    let encoder = CategoryEncoder::new(model.categorical_levels().clone());
    let service = RiskService::new(Arc::new(model), encoder);

    let assessment = service.assess(&record)?;

    let analyzer = HealthAnalyzer::with_aggregator(SummaryAggregator::with_enricher(Arc::new(
        StaticEnricher::new(),
    )));
    let analysis = analyzer.analyze_with_prediction(&record, &assessment.prediction);

    let output = serde_json::json!({
        "assessment": assessment,
        "analysis": analysis,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn load_model() -> Result<CalibratedLinearModel> {
    let model_dir = std::env::var("OCULENS_MODEL_DIR").unwrap_or_else(|_| "models".to_string());
    if Path::new(&model_dir).exists() {
        return CalibratedLinearModel::load(&model_dir)
            .with_context(|| format!("loading model from {model_dir}"));
    }

    tracing::warn!("No model artifact under {model_dir}, using bundled demonstration model");
    demo_model()
}

/// Small hand-tuned model over a subset of the survey features, good
/// enough to exercise the full pipeline without a trained artifact.
fn demo_model() -> Result<CalibratedLinearModel> {
    let mut categorical_levels = BTreeMap::new();
    for column in [
        fields::SLEEP_DISORDER,
        fields::SMART_DEVICE_BEFORE_BED,
        fields::DISCOMFORT_EYE_STRAIN,
        fields::REDNESS_IN_EYE,
        fields::ITCHINESS_IRRITATION,
    ] {
        categorical_levels.insert(
            column.to_string(),
            vec!["N".to_string(), "Y".to_string()],
        );
    }

    let params = ExportedCalibratedModel {
        feature_names: vec![
            fields::AGE.to_string(),
            fields::SLEEP_DURATION.to_string(),
            fields::SLEEP_QUALITY.to_string(),
            fields::STRESS_LEVEL.to_string(),
            fields::AVERAGE_SCREEN_TIME.to_string(),
            "BMI".to_string(),
            "Eye_Load".to_string(),
            "Screen_to_Sleep_Ratio".to_string(),
            fields::SLEEP_DISORDER.to_string(),
            fields::SMART_DEVICE_BEFORE_BED.to_string(),
            fields::DISCOMFORT_EYE_STRAIN.to_string(),
            fields::REDNESS_IN_EYE.to_string(),
            fields::ITCHINESS_IRRITATION.to_string(),
        ],
        coefficients: vec![
            0.10, -0.45, -0.30, 0.35, 0.50, 0.15, 0.40, 0.25, 0.30, 0.20, 0.60, 0.45, 0.45,
        ],
        intercept: -0.25,
        scaler_mean: vec![
            32.0, 6.8, 3.1, 3.0, 6.2, 24.5, 1.2, 0.95, 0.2, 0.6, 0.4, 0.3, 0.3,
        ],
        scaler_std: vec![
            11.0, 1.4, 1.1, 1.3, 2.8, 4.2, 0.7, 0.5, 0.4, 0.5, 0.5, 0.45, 0.45,
        ],
        categorical_levels,
    };

    Ok(CalibratedLinearModel::from_params(params)?)
}

fn sample_record() -> RawHealthRecord {
    RawHealthRecord::new()
        .with_text(fields::GENDER, "M")
        .with_number(fields::AGE, 35.0)
        .with_number(fields::HEIGHT, 175.0)
        .with_number(fields::WEIGHT, 80.0)
        .with_text(fields::BLOOD_PRESSURE, "130/85")
        .with_number(fields::HEART_RATE, 75.0)
        .with_number(fields::SLEEP_DURATION, 6.5)
        .with_number(fields::SLEEP_QUALITY, 3.0)
        .with_number(fields::STRESS_LEVEL, 4.0)
        .with_number(fields::DAILY_STEPS, 5000.0)
        .with_number(fields::PHYSICAL_ACTIVITY, 30.0)
        .with_number(fields::AVERAGE_SCREEN_TIME, 8.5)
        .with_text(fields::SLEEP_DISORDER, "N")
        .with_text(fields::WAKE_UP_DURING_NIGHT, "Y")
        .with_text(fields::FEEL_SLEEPY_DURING_DAY, "Y")
        .with_text(fields::CAFFEINE_CONSUMPTION, "Y")
        .with_text(fields::ALCOHOL_CONSUMPTION, "N")
        .with_text(fields::SMOKING, "N")
        .with_text(fields::SMART_DEVICE_BEFORE_BED, "Y")
        .with_text(fields::BLUE_LIGHT_FILTER, "N")
        .with_text(fields::DISCOMFORT_EYE_STRAIN, "Y")
        .with_text(fields::REDNESS_IN_EYE, "N")
        .with_text(fields::ITCHINESS_IRRITATION, "Y")
}
