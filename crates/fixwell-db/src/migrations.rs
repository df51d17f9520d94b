//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time. All statements use
//! `IF NOT EXISTS` so re-running on every fresh handle is safe.

use crate::connector::DbHandle;
use crate::error::DatabaseError;

/// Initial schema: listings, reviews, site settings.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

/// Run all embedded migrations in sequence against the given handle.
pub(crate) async fn run(handle: &DbHandle) -> Result<(), DatabaseError> {
    handle
        .conn()
        .execute_batch(MIGRATION_001)
        .await
        .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
    Ok(())
}
