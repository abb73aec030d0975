//! Typed errors surfaced by the recommendation engine

use crate::models::HardwareTier;
use thiserror::Error;

/// Failure modes of a recommendation. Both are deterministic for the
/// same inputs and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// Bad player count or unrecognized tag
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No catalog entries for the requested tier
    #[error("no plans available for the {0} tier")]
    CatalogUnavailable(HardwareTier),
}

impl RecommendError {
    /// Stable machine-readable code for API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            RecommendError::InvalidInput(_) => "invalid_input",
            RecommendError::CatalogUnavailable(_) => "catalog_unavailable",
        }
    }
}
