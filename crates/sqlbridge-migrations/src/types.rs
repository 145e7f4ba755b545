//! Dialect-aware column type resolution.
//!
//! Text tiering and enum support vary sharply across engines. The
//! [`TypeResolver`] centralizes the decision: ask the capability service
//! whether a logical type has a native equivalent and return either the
//! native descriptor or a documented, conservative fallback. Absence of
//! native support is an expected branch, never an error -- a migration
//! author writes one statement and it is correct everywhere.

use std::sync::Arc;

use sqlbridge_db::capabilities::CapabilityService;
use sqlbridge_db::column::{ColumnDescriptor, ColumnType};
use sqlbridge_db::dialect::DialectKind;
use sqlbridge_db::value::Value;
use sqlbridge_db::{UID_DEFAULT, UID_LENGTH};

/// The size tier of an oversized text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    /// Up to 255 bytes natively.
    Tiny,
    /// Up to 16 MB natively.
    Medium,
    /// Up to 4 GB natively.
    Long,
}

impl TextSize {
    /// The logical type name queried against the capability service.
    pub fn logical_name(self) -> &'static str {
        match self {
            Self::Tiny => "tinytext",
            Self::Medium => "mediumtext",
            Self::Long => "longtext",
        }
    }

    fn native_type(self) -> ColumnType {
        match self {
            Self::Tiny => ColumnType::TinyText,
            Self::Medium => ColumnType::MediumText,
            Self::Long => ColumnType::LongText,
        }
    }
}

/// Resolves logical column declarations against a dialect's capabilities.
///
/// Stateless beyond its collaborator references: every call re-queries the
/// capability service, since migrations run once and correctness matters
/// more than caching redundant lookups.
pub struct TypeResolver {
    capabilities: Arc<dyn CapabilityService>,
    dialect: DialectKind,
}

impl TypeResolver {
    /// Creates a resolver over a capability service for one dialect.
    pub fn new(capabilities: Arc<dyn CapabilityService>, dialect: DialectKind) -> Self {
        Self {
            capabilities,
            dialect,
        }
    }

    /// Resolves an oversized text column.
    ///
    /// Dialects with the native tiered type get exactly that type; all
    /// others get the same unconstrained-length `TEXT` fallback regardless
    /// of the requested tier. Callers must not assume fallback storage
    /// limits differ by tier.
    pub fn oversized_text(&self, size: TextSize) -> ColumnDescriptor {
        if self.capabilities.supports_type(size.logical_name()) {
            ColumnDescriptor::new(size.native_type())
        } else {
            ColumnDescriptor::new(ColumnType::Text)
        }
    }

    /// Resolves an enum-like column over an ordered value set.
    ///
    /// With native enum support the descriptor carries the values in their
    /// exact order. Without it, the column becomes a generic string with a
    /// check constraint restricting it to the value set; each value is
    /// rendered through the dialect's own value-quoting function. An empty
    /// value set yields a well-formed but always-false check; that is
    /// accepted caller responsibility, not validated here.
    pub fn enum_column(&self, column: &str, values: &[&str]) -> ColumnDescriptor {
        if self.capabilities.supports_type("enum") {
            ColumnDescriptor::new(ColumnType::Enum(
                values.iter().map(|v| (*v).to_string()).collect(),
            ))
        } else {
            let rendered: Vec<String> = values
                .iter()
                .map(|v| self.dialect.quote_value(&Value::String((*v).to_string())))
                .collect();
            let check = format!(
                "{} IN ({})",
                self.dialect.quote_ident(column),
                rendered.join(",")
            );
            ColumnDescriptor::new(ColumnType::VarChar(255)).with_check(check)
        }
    }

    /// The uid column: `CHAR(36)`, non-nullable, defaulting to the
    /// single-character sentinel `"0"`.
    ///
    /// Its shape is identical everywhere it is used, so foreign-key-like
    /// joins between uid columns type-match across the whole schema.
    pub fn uid_column(&self) -> ColumnDescriptor {
        ColumnDescriptor::new(ColumnType::FixedChar(UID_LENGTH))
            .with_default(Value::String(UID_DEFAULT.to_string()))
    }
}
