//! Resolved database configuration consumed by startup.
//!
//! The service's outer config layer owns file discovery and layering; this
//! module only defines the database section and a thin TOML loader for it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::StoreError;

/// The database engines a descriptor can target.
///
/// The unset/empty tag and both sqlite spellings collapse into `Sqlite`;
/// everything outside this enum is rejected at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
    MySql,
    Mssql,
}

impl Backend {
    /// Parse a configured backend tag, case-insensitively.
    ///
    /// There is no default fallback: an unrecognized tag is an error, not
    /// a silent sqlite.
    pub fn parse(tag: &str) -> Result<Self, StoreError> {
        match tag.to_ascii_lowercase().as_str() {
            "" | "unset" | "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "postgres" => Ok(Self::Postgres),
            "mysql" => Ok(Self::MySql),
            "mssql" => Ok(Self::Mssql),
            _ => Err(StoreError::UnsupportedBackend {
                tag: tag.to_string(),
            }),
        }
    }

    /// File-based backends are single-writer and get the tight pool limit.
    pub fn is_file_based(self) -> bool {
        matches!(self, Self::Sqlite)
    }
}

/// Whether the process serves real traffic or runs under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessMode {
    #[default]
    Normal,
    /// Forces an ephemeral in-memory store, regardless of backend config.
    Test,
}

/// Read-only snapshot of the resolved database settings.
///
/// Immutable for the lifetime of startup; nothing here is re-read after
/// the connection is established.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Backend tag: unset/empty, sqlite, sqlite3, postgres, mysql, mssql.
    #[serde(rename = "type")]
    pub backend: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub db_name: String,
    pub charset: String,
    /// Use unix-socket host formatting for mysql/mssql.
    pub unix_socket: bool,
    /// File location for file-based backends; relative paths resolve
    /// against the process working directory.
    pub file_path: PathBuf,
    /// Prepended to every logical table name.
    pub table_prefix: String,
    /// Toggles verbose statement logging on the connection.
    pub debug: bool,
    pub mode: ProcessMode,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: String::new(),
            host: "127.0.0.1".to_string(),
            port: 3306,
            user: String::new(),
            password: String::new(),
            db_name: String::new(),
            charset: "utf8".to_string(),
            unix_socket: false,
            file_path: PathBuf::from("anchorage.db"),
            table_prefix: String::new(),
            debug: false,
            mode: ProcessMode::Normal,
        }
    }
}

impl DatabaseConfig {
    /// Load the database section from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;

        let config: Self =
            toml::from_str(&content).context("Failed to parse config file (invalid TOML)")?;

        Ok(config)
    }
}
