//! Database connection configuration.
//!
//! Two modes: a remote managed database (URL + auth token) for deployments,
//! or a plain local file path for development and tests. When both are set
//! the remote wins; tooling warns on the mismatch, not this crate.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default maximum attempts for the retry executor.
const fn default_max_attempts() -> u32 {
    3
}

/// Default pause after a forced reconnect, in milliseconds.
const fn default_reconnect_pause_ms() -> u64 {
    1000
}

/// Default exponential backoff base, in milliseconds.
const fn default_backoff_base_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Remote database URL (e.g., `libsql://fixwell-prod.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,

    /// Local database file path. Used when no remote URL is configured.
    #[serde(default)]
    pub local_path: String,

    /// Maximum attempts per unit of work (including the first).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pause after a successful forced reconnect, in milliseconds.
    #[serde(default = "default_reconnect_pause_ms")]
    pub reconnect_pause_ms: u64,

    /// Base delay for exponential backoff between retries, in milliseconds.
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: String::new(),
            local_path: String::new(),
            max_attempts: default_max_attempts(),
            reconnect_pause_ms: default_reconnect_pause_ms(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}

impl DatabaseConfig {
    /// Check whether remote access is configured.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    /// Check whether any database target is configured at all.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.is_remote() || !self.local_path.is_empty()
    }

    /// Require a usable database target.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when neither a remote target
    /// (url + auth token) nor a local path is set.
    pub fn require_target(&self) -> Result<(), ConfigError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ConfigError::NotConfigured {
                section: "database",
                missing: "set url + auth_token for a remote target, or local_path",
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = DatabaseConfig::default();
        assert!(!config.is_remote());
        assert!(!config.is_configured());
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.reconnect_pause_ms, 1000);
        assert_eq!(config.backoff_base_ms, 500);
    }

    #[test]
    fn require_target_names_the_section() {
        let error = DatabaseConfig::default().require_target().unwrap_err();
        assert!(matches!(
            error,
            ConfigError::NotConfigured {
                section: "database",
                ..
            }
        ));

        let config = DatabaseConfig {
            local_path: "./fixwell.db".into(),
            ..Default::default()
        };
        assert!(config.require_target().is_ok());
    }

    #[test]
    fn remote_when_url_and_token_set() {
        let config = DatabaseConfig {
            url: "libsql://fixwell-prod.turso.io".into(),
            auth_token: "token123".into(),
            ..Default::default()
        };
        assert!(config.is_remote());
        assert!(config.is_configured());
    }

    #[test]
    fn local_path_alone_is_configured() {
        let config = DatabaseConfig {
            local_path: "./fixwell.db".into(),
            ..Default::default()
        };
        assert!(!config.is_remote());
        assert!(config.is_configured());
    }
}
