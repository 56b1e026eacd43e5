//! Backend-specific connection descriptor construction.
//!
//! Maps a [`DatabaseConfig`] to the connection string a given engine
//! expects. Produced once during startup and consumed once by the
//! connection factory.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::{Backend, DatabaseConfig};
use crate::error::Result;

/// A resolved backend target: the engine tag plus the strings needed to
/// reach it.
///
/// `dsn` is the engine's native connection string; `url` is the same
/// target in the form the driver layer dials. Credential and host values
/// are interpolated verbatim, with no URL escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    backend: Backend,
    dsn: String,
    url: String,
    file: Option<PathBuf>,
}

impl ConnectionDescriptor {
    /// Build the descriptor for the configured backend.
    ///
    /// Total over the supported tags; anything else fails with
    /// `UnsupportedBackend` before any connection is attempted.
    pub fn resolve(config: &DatabaseConfig) -> Result<Self> {
        let backend = Backend::parse(&config.backend)?;

        let descriptor = match backend {
            Backend::Sqlite => {
                let path = resolve_file_path(&config.file_path);
                Self {
                    backend,
                    dsn: path.display().to_string(),
                    url: format!("sqlite://{}?mode=rwc", path.display()),
                    file: Some(path),
                }
            }
            Backend::Postgres => Self {
                backend,
                dsn: format!(
                    "host={} user={} password={} dbname={} port={} sslmode=disable",
                    config.host, config.user, config.password, config.db_name, config.port
                ),
                url: format!(
                    "postgres://{}:{}@{}:{}/{}?sslmode=disable",
                    config.user, config.password, config.host, config.port, config.db_name
                ),
                file: None,
            },
            Backend::MySql | Backend::Mssql => {
                let host = if config.unix_socket {
                    format!("unix({})", config.host)
                } else {
                    format!("({}:{})", config.host, config.port)
                };
                let dsn = format!(
                    "{}:{}@{}/{}?charset={}&parseTime=True&loc=Local",
                    config.user, config.password, host, config.db_name, config.charset
                );
                let url = match (backend, config.unix_socket) {
                    (Backend::MySql, true) => format!(
                        "mysql://{}:{}@localhost/{}?socket={}&charset={}",
                        config.user, config.password, config.db_name, config.host, config.charset
                    ),
                    (Backend::MySql, false) => format!(
                        "mysql://{}:{}@{}:{}/{}?charset={}",
                        config.user,
                        config.password,
                        config.host,
                        config.port,
                        config.db_name,
                        config.charset
                    ),
                    // No mssql driver is compiled in; dialing this URL
                    // surfaces as an open failure.
                    _ => format!(
                        "mssql://{}:{}@{}:{}/{}",
                        config.user, config.password, config.host, config.port, config.db_name
                    ),
                };
                Self {
                    backend,
                    dsn,
                    url,
                    file: None,
                }
            }
        };

        tracing::debug!(backend = ?descriptor.backend, "resolved connection descriptor");
        Ok(descriptor)
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// The engine-native connection string.
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    /// The URL handed to the driver layer.
    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    /// Backing file for file-based backends.
    pub(crate) fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }
}

fn resolve_file_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn base_config() -> DatabaseConfig {
        DatabaseConfig {
            backend: "postgres".to_string(),
            host: "h".to_string(),
            port: 5432,
            user: "u".to_string(),
            password: "p".to_string(),
            db_name: "d".to_string(),
            charset: "utf8".to_string(),
            ..DatabaseConfig::default()
        }
    }

    #[test]
    fn postgres_dsn_matches_template() {
        let descriptor = ConnectionDescriptor::resolve(&base_config()).unwrap();
        assert_eq!(descriptor.backend(), Backend::Postgres);
        assert_eq!(
            descriptor.dsn(),
            "host=h user=u password=p dbname=d port=5432 sslmode=disable"
        );
    }

    #[test]
    fn mysql_tcp_dsn_matches_template() {
        let config = DatabaseConfig {
            backend: "mysql".to_string(),
            port: 3306,
            ..base_config()
        };
        let descriptor = ConnectionDescriptor::resolve(&config).unwrap();
        assert_eq!(
            descriptor.dsn(),
            "u:p@(h:3306)/d?charset=utf8&parseTime=True&loc=Local"
        );
    }

    #[test]
    fn mysql_unix_socket_dsn_matches_template() {
        let config = DatabaseConfig {
            backend: "mysql".to_string(),
            host: "/tmp/sock".to_string(),
            unix_socket: true,
            ..base_config()
        };
        let descriptor = ConnectionDescriptor::resolve(&config).unwrap();
        assert_eq!(
            descriptor.dsn(),
            "u:p@unix(/tmp/sock)/d?charset=utf8&parseTime=True&loc=Local"
        );
    }

    #[test]
    fn mssql_shares_the_mysql_dsn_shape() {
        let config = DatabaseConfig {
            backend: "mssql".to_string(),
            port: 1433,
            ..base_config()
        };
        let descriptor = ConnectionDescriptor::resolve(&config).unwrap();
        assert_eq!(descriptor.backend(), Backend::Mssql);
        assert_eq!(
            descriptor.dsn(),
            "u:p@(h:1433)/d?charset=utf8&parseTime=True&loc=Local"
        );
    }

    #[test]
    fn sqlite_descriptor_resolves_relative_path() {
        let config = DatabaseConfig {
            backend: String::new(),
            file_path: PathBuf::from("data/app.db"),
            ..base_config()
        };
        let descriptor = ConnectionDescriptor::resolve(&config).unwrap();
        assert_eq!(descriptor.backend(), Backend::Sqlite);
        assert!(descriptor.file().unwrap().is_absolute());
        assert!(descriptor.dsn().ends_with("app.db"));
    }

    #[test]
    fn sqlite_descriptor_keeps_absolute_path() {
        let config = DatabaseConfig {
            backend: "sqlite3".to_string(),
            file_path: PathBuf::from("/var/lib/app/data.db"),
            ..base_config()
        };
        let descriptor = ConnectionDescriptor::resolve(&config).unwrap();
        assert_eq!(descriptor.dsn(), "/var/lib/app/data.db");
    }

    #[test]
    fn unsupported_backend_never_resolves() {
        let config = DatabaseConfig {
            backend: "oracle".to_string(),
            ..base_config()
        };
        let err = ConnectionDescriptor::resolve(&config).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedBackend { .. }));
    }
}
