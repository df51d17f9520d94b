//! libSQL connector: the production [`Connector`] implementation.
//!
//! A [`DbHandle`] pairs the `libsql::Database` with the single connection the
//! rest of the crate uses. Handles are opaque to the supervisor; only this
//! module knows they are libSQL.

use fixwell_config::DatabaseConfig;
use libsql::Builder;
use tracing::debug;

use crate::error::DatabaseError;
use crate::supervisor::Connector;

/// One live link to the backing store.
pub struct DbHandle {
    // Owns the database; dropping it tears the link down.
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl DbHandle {
    /// Access the underlying libSQL connection for queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID, e.g. `"lst-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce an 8-char hex tail.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

/// Where the connector points.
#[derive(Debug, Clone)]
enum DbTarget {
    /// Local database file (dev, tests). `":memory:"` works too.
    Local(String),
    /// Managed remote database.
    Remote { url: String, auth_token: String },
}

/// Builds [`DbHandle`]s against a fixed target and probes them with `SELECT 1`.
pub struct LibsqlConnector {
    target: DbTarget,
}

impl LibsqlConnector {
    /// Build a connector from configuration. Remote wins when both remote and
    /// local targets are present.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Config` when no target is configured.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        config.require_target()?;
        if config.is_remote() {
            return Ok(Self {
                target: DbTarget::Remote {
                    url: config.url.clone(),
                    auth_token: config.auth_token.clone(),
                },
            });
        }
        Ok(Self::local(&config.local_path))
    }

    /// Connector for a local database file.
    #[must_use]
    pub fn local(path: &str) -> Self {
        Self {
            target: DbTarget::Local(path.to_string()),
        }
    }
}

impl Connector for LibsqlConnector {
    type Handle = DbHandle;

    async fn connect(&self) -> Result<DbHandle, DatabaseError> {
        let db = match &self.target {
            DbTarget::Local(path) => {
                debug!(path, "opening local database");
                Builder::new_local(path).build().await?
            }
            DbTarget::Remote { url, auth_token } => {
                debug!(url, "opening remote database");
                Builder::new_remote(url.clone(), auth_token.clone())
                    .build()
                    .await?
            }
        };
        let conn = db.connect()?;

        // Foreign keys are per-connection in SQLite; remote servers manage
        // their own pragmas.
        if matches!(self.target, DbTarget::Local(_)) {
            conn.execute("PRAGMA foreign_keys = ON", ())
                .await
                .map_err(|e| DatabaseError::Query(format!("PRAGMA foreign_keys: {e}")))?;
        }

        Ok(DbHandle { db, conn })
    }

    async fn probe(&self, handle: &DbHandle) -> Result<(), DatabaseError> {
        let mut rows = handle.conn.query("SELECT 1", ()).await?;
        rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixwell_config::DatabaseConfig;

    #[tokio::test]
    async fn local_connector_builds_and_probes() {
        let connector = LibsqlConnector::local(":memory:");
        let handle = connector.connect().await.unwrap();
        connector.probe(&handle).await.unwrap();
    }

    #[tokio::test]
    async fn generated_ids_are_prefixed_hex() {
        let connector = LibsqlConnector::local(":memory:");
        let handle = connector.connect().await.unwrap();
        let id = handle.generate_id("lst").await.unwrap();
        assert!(fixwell_core::ids::is_valid_id(&id, "lst"), "bad id: {id}");
    }

    #[test]
    fn unconfigured_target_is_rejected() {
        let config = DatabaseConfig::default();
        let result = LibsqlConnector::from_config(&config);
        assert!(matches!(result, Err(DatabaseError::Config(_))));
    }

    #[test]
    fn remote_wins_over_local_path() {
        let config = DatabaseConfig {
            url: "libsql://fixwell-prod.turso.io".into(),
            auth_token: "tok".into(),
            local_path: "./dev.db".into(),
            ..Default::default()
        };
        let connector = LibsqlConnector::from_config(&config).unwrap();
        assert!(matches!(connector.target, DbTarget::Remote { .. }));
    }
}
