//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (model artifact,
//! recommendation enrichment).

mod enrichment;
mod scoring;

pub use enrichment::{EnrichmentError, RecommendationEnricher};
pub use scoring::{ContributionExplainer, ScoringError, ScoringModel};
