//! # fixwell-config
//!
//! Figment-layered configuration for the Fixwell backend.
//!
//! A value can come from four places; later sources win:
//! built-in defaults, then `~/.config/fixwell/config.toml`, then the
//! project-local `.fixwell/config.toml`, then `FIXWELL_*` environment
//! variables. Nested sections use `__` in the variable name, so
//! `FIXWELL_DATABASE__AUTH_TOKEN` lands on `database.auth_token` and
//! `FIXWELL_SITE__BUSINESS_NAME` on `site.business_name`.
//!
//! ```no_run
//! use fixwell_config::FixwellConfig;
//!
//! let config = FixwellConfig::load_with_dotenv().expect("config");
//! if config.database.is_remote() {
//!     println!("Database URL: {}", config.database.url);
//! }
//! ```

mod database;
mod error;
mod site;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use site::SiteConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FixwellConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

impl FixwellConfig {
    /// Load configuration from TOML files and environment variables, without
    /// touching any `.env` file. The CLI goes through
    /// [`Self::load_with_dotenv`] instead.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or extract.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load a workspace `.env` file first (if one exists), then everything
    /// [`Self::load`] reads.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or extract.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// The provider chain itself, exposed so tests can extract from it
    /// directly or stack extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".fixwell/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Env vars merge last and therefore win.
        figment.merge(Env::prefixed("FIXWELL_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fixwell").join("config.toml"))
    }

    /// Find and apply a `.env`, searching the crate directory and up to two
    /// parents (crate -> crates/ -> workspace root). Missing files are fine.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..2 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }
        let _ = dotenvy::dotenv();
    }
}
