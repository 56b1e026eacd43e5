//! Schema migration seam.
//!
//! The migration algorithm lives outside this crate; startup only
//! triggers it, exactly once, after the registry is populated.

use async_trait::async_trait;

use crate::db::Database;

/// External collaborator that brings the schema up to date.
///
/// Implementations should render table names through
/// [`Database::table_name`] so the configured prefix is honored.
#[async_trait]
pub trait Migrator: Send + Sync {
    async fn migrate(&self, db: &Database) -> anyhow::Result<()>;
}

/// Migrator that performs no schema work.
///
/// For callers that manage their schema out of band.
pub struct NoopMigrator;

#[async_trait]
impl Migrator for NoopMigrator {
    async fn migrate(&self, _db: &Database) -> anyhow::Result<()> {
        Ok(())
    }
}
