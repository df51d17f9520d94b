//! Errors surfaced while loading or validating configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A figment source failed to merge or extract.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A section is present but missing the fields that make it usable,
    /// e.g. `[database]` with neither a remote target nor a local path.
    #[error("Configuration section '{section}' is incomplete: {missing}")]
    NotConfigured {
        section: &'static str,
        missing: &'static str,
    },
}
