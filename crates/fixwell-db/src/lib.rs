//! # fixwell-db
//!
//! Resilient libSQL data access for the Fixwell backend.
//!
//! The interesting piece here is not the CRUD — it is the connection
//! resilience wrapper that papers over transient failures from a managed
//! database (stale prepared statements after a server-side reset, dropped
//! streams, node recycling):
//!
//! - [`ConnectionSupervisor`] owns at most one live handle, can tear it down
//!   and rebuild it on demand, and exposes a health probe.
//! - [`with_retry`] wraps a unit of work in a bounded retry loop, forcing a
//!   reconnect when failures look connection-shaped (and unconditionally on
//!   the first retry).
//! - [`execute_with_fresh_client`] is the single-shot, no-retry escape hatch
//!   callers reach for before degrading to a default payload.
//!
//! [`StoreService`] packages all of it with the repositories the site and
//! back office use.

pub mod connector;
pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod retry;
pub mod seed;
pub mod service;
pub mod supervisor;

mod test_support;

pub use connector::{DbHandle, LibsqlConnector};
pub use error::{DatabaseError, ErrorClass, classify};
pub use retry::{RetryConfig, execute_with_fresh_client, with_retry};
pub use seed::SeedReport;
pub use service::StoreService;
pub use supervisor::{ConnectionSupervisor, Connector};

/// The production supervisor type: libSQL handles under supervision.
pub type DbSupervisor = ConnectionSupervisor<LibsqlConnector>;
