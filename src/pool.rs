//! Connection pool limits.
//!
//! The policy is derived from the backend tag alone, never from runtime
//! load, and the pool is the system's sole backpressure mechanism.

use std::time::Duration;

use sqlx::any::AnyPoolOptions;

use crate::config::Backend;

const MAX_IDLE_CONNS: u32 = 50;
const MAX_OPEN_CONNS: u32 = 100;
const SINGLE_WRITER_CONNS: u32 = 1;
const CONN_MAX_LIFETIME: Duration = Duration::from_secs(30);

/// Pool limits applied when the connection is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolPolicy {
    /// Target number of idle connections to keep around.
    pub max_idle: u32,
    /// Hard cap on concurrently open connections.
    pub max_open: u32,
    /// Connections are recycled after this long.
    pub max_lifetime: Duration,
}

impl PoolPolicy {
    /// Derive the policy for a backend: file-based engines are
    /// single-writer and get an open limit of 1, everything else 100.
    /// Idle limit and lifetime are fixed.
    pub fn for_backend(backend: Backend) -> Self {
        let max_open = if backend.is_file_based() {
            SINGLE_WRITER_CONNS
        } else {
            MAX_OPEN_CONNS
        };
        Self {
            max_idle: MAX_IDLE_CONNS,
            max_open,
            max_lifetime: CONN_MAX_LIFETIME,
        }
    }

    /// Render the policy as sqlx pool options.
    ///
    /// sqlx pools have no separate idle cap; idle connections are bounded
    /// by `max_connections`, so `max_idle` takes effect only below the
    /// open limit.
    pub(crate) fn pool_options(&self) -> AnyPoolOptions {
        AnyPoolOptions::new()
            .max_connections(self.max_open)
            .max_lifetime(self.max_lifetime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_based_backends_are_single_writer() {
        let policy = PoolPolicy::for_backend(Backend::Sqlite);
        assert_eq!(policy.max_open, 1);
        assert_eq!(policy.max_idle, 50);
        assert_eq!(policy.max_lifetime, Duration::from_secs(30));
    }

    #[test]
    fn server_backends_get_the_wide_limit() {
        for backend in [Backend::Postgres, Backend::MySql, Backend::Mssql] {
            let policy = PoolPolicy::for_backend(backend);
            assert_eq!(policy.max_open, 100);
            assert_eq!(policy.max_idle, 50);
            assert_eq!(policy.max_lifetime, Duration::from_secs(30));
        }
    }
}
