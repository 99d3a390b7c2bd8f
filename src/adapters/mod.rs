//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integrations behind the trait seams:
//! - `model`: calibrated linear classifier loaded from a JSON artifact
//! - `enrichment`: deterministic fallback recommendation enricher
//! - `sanitize`: PII filtering for logs

pub mod enrichment;
pub mod model;
pub mod sanitize;

pub use enrichment::StaticEnricher;
pub use model::{ArtifactError, CalibratedLinearModel, ExportedCalibratedModel};
