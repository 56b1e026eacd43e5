//! Structured error types for the anchorage library.
//!
//! Uses `thiserror` for a composable API surface. Binary callers can wrap
//! these in `anyhow` and decide for themselves whether a startup failure
//! terminates the process.

use std::io;
use thiserror::Error;

/// Main error type for persistence startup and registry access.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The configured backend tag is not one of the supported engines.
    #[error("unsupported database backend {tag:?}")]
    UnsupportedBackend { tag: String },

    /// The backend described by the descriptor could not be opened.
    #[error("failed to open database connection: {source}")]
    OpenFailed {
        #[source]
        source: sqlx::Error,
    },

    /// The registry was read before startup completed. This is a
    /// programming-contract violation, not an expected runtime condition.
    #[error("database connection not initialized")]
    NotReady,

    /// Startup ran twice without an explicit teardown in between.
    #[error("database connection already initialized")]
    AlreadyInitialized,

    /// The migration collaborator reported a failure.
    #[error("schema migration failed: {source}")]
    Migration {
        #[source]
        source: anyhow::Error,
    },

    /// I/O failure preparing a file-based backend.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Result type alias for anchorage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Wrap a driver error from a failed connection attempt.
    pub fn open_failed(source: sqlx::Error) -> Self {
        Self::OpenFailed { source }
    }

    /// Wrap a migration collaborator failure.
    pub fn migration(source: anyhow::Error) -> Self {
        Self::Migration { source }
    }
}
