//! Process-wide connection registry.
//!
//! A single slot, written once per startup cycle. Readers see either
//! `NotReady` or the fully tuned handle; no partial state is observable.

use std::sync::RwLock;

use crate::db::Database;
use crate::error::{Result, StoreError};

static ACTIVE: RwLock<Option<Database>> = RwLock::new(None);

/// Publish the startup handle. Fails if a handle is already installed;
/// replacing it requires an explicit [`teardown`] first.
pub fn install(db: Database) -> Result<()> {
    let mut slot = ACTIVE.write().unwrap();
    if slot.is_some() {
        return Err(StoreError::AlreadyInitialized);
    }
    *slot = Some(db);
    Ok(())
}

/// Fetch the active handle. `NotReady` before startup completes.
pub fn handle() -> Result<Database> {
    ACTIVE
        .read()
        .unwrap()
        .clone()
        .ok_or(StoreError::NotReady)
}

/// Remove the active handle, returning it so the caller can close it.
pub fn teardown() -> Option<Database> {
    ACTIVE.write().unwrap().take()
}
