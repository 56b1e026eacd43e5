//! Table naming strategy.
//!
//! An explicit value composed into the connection handle, rather than a
//! hook mutated at a distance. Must be in place before any schema or
//! query operation runs.

/// Deterministic prefix transform for logical table names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TablePrefix(String);

impl TablePrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    pub fn prefix(&self) -> &str {
        &self.0
    }

    /// Prefix a logical table name. Always concatenates; a name that
    /// happens to start with the prefix is still prefixed.
    pub fn apply(&self, raw: &str) -> String {
        format!("{}{}", self.0, raw)
    }
}
