pub mod config;
pub mod db;
pub mod dialect;
pub mod error;
pub mod migrate;
pub mod naming;
pub mod pool;
pub mod registry;

pub use config::{Backend, DatabaseConfig, ProcessMode};
pub use db::{connect, startup, Database};
pub use dialect::ConnectionDescriptor;
pub use error::{Result, StoreError};
pub use migrate::{Migrator, NoopMigrator};
pub use naming::TablePrefix;
pub use pool::PoolPolicy;
