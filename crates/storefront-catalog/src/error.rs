//! Catalog error types.

use thiserror::Error;

/// Errors raised by the fallible catalog entry points.
///
/// The listing pipeline itself never fails; these cover parsing of user
/// supplied configuration.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Sort key outside the supported set.
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    /// Catalog view name outside the supported set.
    #[error("Unknown catalog view: {0}")]
    UnknownView(String),

    /// Filter configuration could not be interpreted.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::SerializationError(e.to_string())
    }
}
