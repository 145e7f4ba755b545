//! Native-type capability detection.
//!
//! Engines differ sharply in which logical types have a native equivalent:
//! MySQL carries the tiered text types (`tinytext`, `mediumtext`,
//! `longtext`) and inline `enum` columns; PostgreSQL and SQLite have
//! neither. Rather than branching per dialect at every call site, type
//! resolution asks a single question -- "is this logical type supported
//! here?" -- through [`CapabilityService`]. Absence of support is a normal
//! answer, never an error.

use crate::dialect::DialectKind;

/// Answers whether a logical type name has a native equivalent on the
/// active dialect.
///
/// Implementations must treat unknown logical names as unsupported. Tests
/// substitute a fake implementation to exercise both branches of every
/// resolution path.
pub trait CapabilityService: Send + Sync {
    /// Returns `true` if `logical_type` has a native equivalent.
    ///
    /// Logical type names are lowercase: `"tinytext"`, `"mediumtext"`,
    /// `"longtext"`, `"enum"`.
    fn supports_type(&self, logical_type: &str) -> bool;
}

/// The real per-dialect capability tables.
#[derive(Debug, Clone, Copy)]
pub struct DialectCapabilities {
    kind: DialectKind,
}

impl DialectCapabilities {
    /// Creates the capability table for a dialect.
    pub fn new(kind: DialectKind) -> Self {
        Self { kind }
    }

    /// Returns the dialect this table describes.
    pub fn kind(&self) -> DialectKind {
        self.kind
    }
}

impl CapabilityService for DialectCapabilities {
    fn supports_type(&self, logical_type: &str) -> bool {
        match self.kind {
            DialectKind::MySql => matches!(
                logical_type,
                "tinytext" | "mediumtext" | "longtext" | "enum"
            ),
            // PostgreSQL enums exist but require a CREATE TYPE that outlives
            // the column; inline enum columns are not expressible.
            DialectKind::Postgres | DialectKind::Sqlite => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_supports_text_tiers() {
        let caps = DialectCapabilities::new(DialectKind::MySql);
        assert!(caps.supports_type("tinytext"));
        assert!(caps.supports_type("mediumtext"));
        assert!(caps.supports_type("longtext"));
    }

    #[test]
    fn test_mysql_supports_enum() {
        let caps = DialectCapabilities::new(DialectKind::MySql);
        assert!(caps.supports_type("enum"));
    }

    #[test]
    fn test_pg_supports_nothing_tiered() {
        let caps = DialectCapabilities::new(DialectKind::Postgres);
        assert!(!caps.supports_type("tinytext"));
        assert!(!caps.supports_type("mediumtext"));
        assert!(!caps.supports_type("longtext"));
        assert!(!caps.supports_type("enum"));
    }

    #[test]
    fn test_sqlite_supports_nothing_tiered() {
        let caps = DialectCapabilities::new(DialectKind::Sqlite);
        assert!(!caps.supports_type("mediumtext"));
        assert!(!caps.supports_type("enum"));
    }

    #[test]
    fn test_unknown_logical_type_unsupported() {
        let caps = DialectCapabilities::new(DialectKind::MySql);
        assert!(!caps.supports_type("hyperloglog"));
    }
}
