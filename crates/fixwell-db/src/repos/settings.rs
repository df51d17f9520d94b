//! Site settings repository — key/value content storage.
//!
//! Settings back the storefront's editable content (phone number, hours,
//! carousel copy). Reads that render public pages must never fail the page,
//! so [`StoreService::get_setting_or`] degrades through the full three-tier
//! fallback down to a built-in default.

use std::collections::HashMap;

use fixwell_core::entities::SiteSetting;
use tracing::warn;

use crate::error::DatabaseError;
use crate::helpers::parse_datetime;
use crate::retry::{execute_with_fresh_client, with_retry};
use crate::service::StoreService;

/// Built-in defaults for the keys the homepage renders. Also what the seed
/// command installs on a fresh database.
pub const HOMEPAGE_DEFAULTS: &[(&str, &str)] = &[
    ("contact_phone", ""),
    ("hours", "Mon-Sat 8:00-18:00"),
    ("service_area", "Greater metro area"),
    ("hero_text", "Same-day appliance repair, done right."),
    ("carousel_size", "6"),
];

fn row_to_setting(row: &libsql::Row) -> Result<SiteSetting, DatabaseError> {
    Ok(SiteSetting {
        key: row.get::<String>(0)?,
        value: row.get::<String>(1)?,
        updated_at: parse_datetime(&row.get::<String>(2)?)?,
    })
}

impl StoreService {
    /// Upsert a setting.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the write fails after all retries.
    pub async fn set_setting(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            handle
                .conn()
                .execute(
                    "INSERT INTO site_settings (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                     ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
                    libsql::params![key, value],
                )
                .await?;
            Ok(())
        })
        .await
    }

    /// Read a setting.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails after all retries.
    pub async fn get_setting(&self, key: &str) -> Result<Option<SiteSetting>, DatabaseError> {
        with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            let mut rows = handle
                .conn()
                .query(
                    "SELECT key, value, updated_at FROM site_settings WHERE key = ?1",
                    [key],
                )
                .await?;
            match rows.next().await? {
                Some(row) => Ok(Some(row_to_setting(&row)?)),
                None => Ok(None),
            }
        })
        .await
    }

    /// All settings, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails after all retries.
    pub async fn list_settings(&self) -> Result<Vec<SiteSetting>, DatabaseError> {
        with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            let mut rows = handle
                .conn()
                .query(
                    "SELECT key, value, updated_at FROM site_settings ORDER BY key",
                    (),
                )
                .await?;
            let mut settings = Vec::new();
            while let Some(row) = rows.next().await? {
                settings.push(row_to_setting(&row)?);
            }
            Ok(settings)
        })
        .await
    }

    /// Remove a setting.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails after all retries.
    pub async fn delete_setting(&self, key: &str) -> Result<bool, DatabaseError> {
        with_retry(self.supervisor(), self.retry_config(), move || async move {
            let handle = self.supervisor().get_handle().await?;
            let changed = handle
                .conn()
                .execute("DELETE FROM site_settings WHERE key = ?1", [key])
                .await?;
            Ok(changed > 0)
        })
        .await
    }

    /// Everything the homepage needs, in one degraded read: stored values
    /// overlaid on [`HOMEPAGE_DEFAULTS`]. Retry-wrapped bulk query, then a
    /// single shot on a forced-fresh handle, then the defaults alone. Never
    /// fails — a dead database renders the built-in storefront.
    pub async fn homepage_settings(&self) -> HashMap<String, String> {
        let mut settings: HashMap<String, String> = HOMEPAGE_DEFAULTS
            .iter()
            .map(|&(key, value)| (key.to_string(), value.to_string()))
            .collect();

        match self.list_settings().await {
            Ok(stored) => {
                for setting in stored {
                    settings.insert(setting.key, setting.value);
                }
                return settings;
            }
            Err(error) => warn!(%error, "homepage settings read failed, trying a fresh client"),
        }

        let fresh = execute_with_fresh_client(self.supervisor(), |handle| async move {
            let mut rows = handle
                .conn()
                .query("SELECT key, value FROM site_settings", ())
                .await?;
            let mut stored = Vec::new();
            while let Some(row) = rows.next().await? {
                stored.push((row.get::<String>(0)?, row.get::<String>(1)?));
            }
            Ok(stored)
        })
        .await;
        match fresh {
            Ok(stored) => {
                for (key, value) in stored {
                    settings.insert(key, value);
                }
            }
            Err(error) => {
                warn!(%error, "homepage settings read failed on fresh client, serving defaults");
            }
        }
        settings
    }

    /// Degraded read for page rendering: retry-wrapped lookup, then a single
    /// shot on a forced-fresh handle, then the supplied default. Never fails.
    pub async fn get_setting_or(&self, key: &str, default: &str) -> String {
        match self.get_setting(key).await {
            Ok(Some(setting)) => return setting.value,
            Ok(None) => return default.to_string(),
            Err(error) => warn!(key, %error, "setting read failed, trying a fresh client"),
        }

        let fresh = execute_with_fresh_client(self.supervisor(), |handle| async move {
            let mut rows = handle
                .conn()
                .query("SELECT value FROM site_settings WHERE key = ?1", [key])
                .await?;
            match rows.next().await? {
                Some(row) => Ok(Some(row.get::<String>(0)?)),
                None => Ok(None),
            }
        })
        .await;
        match fresh {
            Ok(Some(value)) => value,
            Ok(None) => default.to_string(),
            Err(error) => {
                warn!(key, %error, "setting read failed on fresh client, serving default");
                default.to_string()
            }
        }
    }
}
