//! Service layer: the supervisor plus retry policy, packaged for callers.
//!
//! `StoreService` is what the CLI and request handlers hold. Every repository
//! method routes its queries through [`crate::retry::with_retry`], fetching
//! the handle *inside* the unit of work so a mid-retry reconnect is picked up
//! on the next attempt.

use std::sync::Arc;

use fixwell_config::DatabaseConfig;

use crate::connector::LibsqlConnector;
use crate::error::DatabaseError;
use crate::retry::{RetryConfig, with_retry};
use crate::supervisor::ConnectionSupervisor;
use crate::{migrations, DbSupervisor};

/// Shared data-access facade for the Fixwell backend.
pub struct StoreService {
    supervisor: Arc<DbSupervisor>,
    retry: RetryConfig,
}

impl StoreService {
    /// Build a service from configuration and bring the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if no target is configured or migrations fail.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let connector = LibsqlConnector::from_config(config)?;
        let service = Self {
            supervisor: Arc::new(ConnectionSupervisor::new(connector)),
            retry: RetryConfig::from_database_config(config),
        };
        service.run_migrations().await?;
        Ok(service)
    }

    /// Service over a local database file (dev and tests).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let service = Self {
            supervisor: Arc::new(ConnectionSupervisor::new(LibsqlConnector::local(path))),
            retry: RetryConfig::default(),
        };
        service.run_migrations().await?;
        Ok(service)
    }

    /// Access the connection supervisor (health checks, shutdown, escape hatch).
    #[must_use]
    pub fn supervisor(&self) -> &Arc<DbSupervisor> {
        &self.supervisor
    }

    /// The retry policy this service applies to its units of work.
    #[must_use]
    pub const fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Probe the store, rebuilding the connection once if needed.
    pub async fn check_health(&self) -> bool {
        self.supervisor.check_health().await
    }

    /// Release the connection handle. Best-effort, called on process exit.
    pub async fn shutdown(&self) {
        self.supervisor.shutdown().await;
    }

    async fn run_migrations(&self) -> Result<(), DatabaseError> {
        with_retry(&self.supervisor, &self.retry, move || async move {
            let handle = self.supervisor.get_handle().await?;
            migrations::run(&handle).await
        })
        .await
    }
}
