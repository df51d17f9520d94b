//! Cross-cutting error types for Fixwell.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `ConfigError`) live in their
//! respective crates. This module holds errors that can originate anywhere.

use thiserror::Error;

/// Errors that can be raised by any Fixwell crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (format, range, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
