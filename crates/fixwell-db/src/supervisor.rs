//! Connection supervisor: single-handle ownership and forced rebuild.
//!
//! The supervisor owns at most one live handle to the backing store. Callers
//! share it through `Arc`; replacement is swap-the-singleton, never pooling.
//! The supervisor is an explicit, injectable owner object — tests construct
//! their own instance with a scriptable connector, production code uses
//! [`crate::connector::LibsqlConnector`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::DatabaseError;

/// Seam between the supervisor and the backing store.
///
/// A connector knows how to build one opaque handle and how to run a trivial
/// liveness round trip against it. The supervisor treats both as black boxes.
pub trait Connector: Send + Sync {
    type Handle: Send + Sync;

    /// Construct a brand-new handle. Construction is expected to be cheap and
    /// lazy; a handle that builds fine may still fail its first real use.
    async fn connect(&self) -> Result<Self::Handle, DatabaseError>;

    /// One trivial round trip (e.g., `SELECT 1`) to confirm liveness.
    async fn probe(&self, handle: &Self::Handle) -> Result<(), DatabaseError>;
}

/// Owns the current handle and the only code path that replaces it.
///
/// Lifecycle: process-wide state, lazily initialized on first
/// [`Self::get_handle`], torn down by [`Self::shutdown`]. The slot mutex is
/// held only to read or swap the `Arc` — rebuilds run outside it, so two
/// callers failing at the same moment may both rebuild. That race is accepted
/// as harmless-but-wasteful: each rebuild is independent and the last one
/// installed wins.
pub struct ConnectionSupervisor<C: Connector> {
    connector: C,
    current: Mutex<Option<Arc<C::Handle>>>,
    rebuilds: AtomicU64,
}

impl<C: Connector> ConnectionSupervisor<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            current: Mutex::new(None),
            rebuilds: AtomicU64::new(0),
        }
    }

    /// Return the current handle, constructing it on first call.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` only when lazy construction itself fails;
    /// a constructed handle is returned unprobed and surfaces failures on
    /// first real use.
    pub async fn get_handle(&self) -> Result<Arc<C::Handle>, DatabaseError> {
        let mut slot = self.current.lock().await;
        if let Some(handle) = slot.as_ref() {
            return Ok(Arc::clone(handle));
        }
        debug!("constructing initial database handle");
        let handle = Arc::new(self.connector.connect().await?);
        *slot = Some(Arc::clone(&handle));
        Ok(handle)
    }

    /// Discard the current handle and install a validated replacement.
    ///
    /// Builds a new handle, probes it, and only on probe success swaps it in;
    /// the old handle is dropped at swap time (its teardown happens when the
    /// last caller releases its `Arc`). On any failure the previously-current
    /// handle stays installed, untouched. This is the only way the current
    /// handle is ever replaced.
    ///
    /// # Errors
    ///
    /// Returns the connect or probe error; no partially-validated handle is
    /// ever installed.
    pub async fn force_new_connection(&self) -> Result<(), DatabaseError> {
        self.rebuilds.fetch_add(1, Ordering::Relaxed);
        let started = Instant::now();

        // Build and validate outside the slot lock so concurrent rebuilds
        // can race; last install wins.
        let fresh = self.connector.connect().await?;
        self.connector.probe(&fresh).await?;

        let mut slot = self.current.lock().await;
        *slot = Some(Arc::new(fresh));
        info!(
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "installed fresh database handle"
        );
        Ok(())
    }

    /// Probe the current handle; on failure attempt exactly one rebuild and
    /// report health from that rebuild's outcome. Never fails.
    pub async fn check_health(&self) -> bool {
        let probe_error = match self.get_handle().await {
            Ok(handle) => match self.connector.probe(&handle).await {
                Ok(()) => return true,
                Err(error) => error,
            },
            Err(error) => error,
        };
        warn!(error = %probe_error, "health probe failed, rebuilding connection");
        match self.force_new_connection().await {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "rebuild after failed health probe did not recover");
                false
            }
        }
    }

    /// Drop the current handle, if any. Best-effort shutdown teardown; a
    /// caller still holding an `Arc` keeps its handle alive until it lets go.
    pub async fn shutdown(&self) {
        let mut slot = self.current.lock().await;
        if slot.take().is_some() {
            info!("database handle released on shutdown");
        }
    }

    /// Whether a handle is currently installed (without constructing one).
    pub async fn is_connected(&self) -> bool {
        self.current.lock().await.is_some()
    }

    /// Number of rebuilds attempted so far (successful or not).
    pub fn rebuild_attempts(&self) -> u64 {
        self.rebuilds.load(Ordering::Relaxed)
    }

    #[cfg(test)]
    pub(crate) const fn connector(&self) -> &C {
        &self.connector
    }
}
