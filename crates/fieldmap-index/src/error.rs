//! Error types for index operations.

use fieldmap_model::ModelError;
use thiserror::Error;

/// Errors raised while populating an index.
///
/// Lookups never fail; an unknown name is reported as `None`.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Raw input rejected by strict validation.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// Mapping input that is not a JSON array of records.
    #[error("invalid mapping input: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;
