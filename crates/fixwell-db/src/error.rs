//! Database error types and failure classification.
//!
//! The retry executor never inspects raw error text itself. All string
//! matching against driver error messages is confined to [`classify`], which
//! tags an error with an [`ErrorClass`] once, at the boundary where the
//! driver's native errors are first caught.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in a stored row).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuration did not describe a usable database target.
    #[error(transparent)]
    Config(#[from] fixwell_config::ConfigError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Broad failure category consumed by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The link to the store is suspect; a forced reconnect may recover it.
    Connection,
    /// The operation itself reported a condition (no rows, bad state).
    /// Retrying may still help, reconnecting will not.
    Operational,
    /// Anything we cannot place. Retried with backoff, never reconnected for.
    Unknown,
}

/// Known connection-failure signatures, matched case-sensitively against the
/// rendered error message.
///
/// "prepared statement" covers both the "already exists" and "does not exist"
/// conflicts a stale statement cache produces after a server-side reset. The
/// last two are transient wording from managed libSQL/Hrana infrastructure.
const CONNECTION_SIGNATURES: &[&str] = &[
    "prepared statement",
    "connection",
    "connector",
    "stream not found",
    "unable to acquire shared lock",
];

/// Tag an error with its [`ErrorClass`].
///
/// Structured variants that can only come from the operation itself are
/// classified without looking at text; everything else falls through to the
/// signature scan.
#[must_use]
pub fn classify(error: &DatabaseError) -> ErrorClass {
    match error {
        DatabaseError::NoResult | DatabaseError::InvalidState(_) | DatabaseError::Config(_) => {
            ErrorClass::Operational
        }
        _ => {
            let message = error.to_string();
            if CONNECTION_SIGNATURES.iter().any(|sig| message.contains(sig)) {
                ErrorClass::Connection
            } else {
                ErrorClass::Unknown
            }
        }
    }
}
