//! Column type descriptors.
//!
//! A [`ColumnDescriptor`] is the builder-style value describing a column's
//! logical type, nullability, default, and check constraint. The type
//! resolver produces descriptors; schema-definition statements (create
//! table / add column) consume them. Descriptors are immutable values:
//! every `with_*` refinement returns a new descriptor, and the final state
//! is only read when [`ColumnDescriptor::sql`] renders it at
//! statement-build time.

use crate::dialect::DialectKind;
use crate::value::Value;

/// The logical type of a column, resolved against a dialect's capabilities
/// before the descriptor is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    /// Unconstrained-length text. Also the fallback for every oversized
    /// text tier on dialects without native tiered types.
    Text,
    /// Native `TINYTEXT` (up to 255 bytes).
    TinyText,
    /// Native `MEDIUMTEXT` (up to 16 MB).
    MediumText,
    /// Native `LONGTEXT` (up to 4 GB).
    LongText,
    /// Variable-length string with a maximum length.
    VarChar(u32),
    /// Fixed-width string, blank-padded where the engine does so.
    FixedChar(u32),
    /// Native enum over an ordered value set. Order is preserved exactly as
    /// supplied: it affects the generated SQL text and therefore schema
    /// diffing and hashing downstream.
    Enum(Vec<String>),
    /// A date and time.
    Timestamp,
}

impl ColumnType {
    /// Renders the bare type name for a dialect.
    pub fn sql(&self, dialect: DialectKind) -> String {
        match self {
            Self::Text => "TEXT".to_string(),
            Self::TinyText => "TINYTEXT".to_string(),
            Self::MediumText => "MEDIUMTEXT".to_string(),
            Self::LongText => "LONGTEXT".to_string(),
            Self::VarChar(len) => format!("VARCHAR({len})"),
            Self::FixedChar(len) => format!("CHAR({len})"),
            Self::Enum(values) => {
                let rendered: Vec<String> = values
                    .iter()
                    .map(|v| dialect.quote_value(&Value::String(v.clone())))
                    .collect();
                format!("ENUM({})", rendered.join(","))
            }
            Self::Timestamp => match dialect {
                DialectKind::MySql => "DATETIME".to_string(),
                DialectKind::Postgres => "TIMESTAMP".to_string(),
                DialectKind::Sqlite => "TEXT".to_string(),
            },
        }
    }
}

/// A builder-style description of one column.
///
/// # Examples
///
/// ```
/// use sqlbridge_db::column::{ColumnDescriptor, ColumnType};
/// use sqlbridge_db::dialect::DialectKind;
/// use sqlbridge_db::value::Value;
///
/// let col = ColumnDescriptor::new(ColumnType::VarChar(64))
///     .with_default(Value::String("draft".into()));
/// assert_eq!(
///     col.sql(DialectKind::Postgres),
///     "VARCHAR(64) NOT NULL DEFAULT 'draft'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    column_type: ColumnType,
    nullable: bool,
    default: Option<Value>,
    check: Option<String>,
}

impl ColumnDescriptor {
    /// Creates a non-nullable descriptor with no default and no check.
    pub fn new(column_type: ColumnType) -> Self {
        Self {
            column_type,
            nullable: false,
            default: None,
            check: None,
        }
    }

    /// Returns a copy marked nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Returns a copy with the given default value.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Returns a copy carrying a check-constraint expression.
    ///
    /// The expression must already be fully rendered for the target dialect
    /// (identifiers and literals quoted).
    #[must_use]
    pub fn with_check(mut self, expression: impl Into<String>) -> Self {
        self.check = Some(expression.into());
        self
    }

    /// Returns the logical column type.
    pub fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    /// Returns whether the column accepts NULL.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns the default value, if any.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns the check-constraint expression, if any.
    pub fn check(&self) -> Option<&str> {
        self.check.as_deref()
    }

    /// Renders the full column definition fragment (type, nullability,
    /// default, check) for a dialect.
    pub fn sql(&self, dialect: DialectKind) -> String {
        let mut sql = self.column_type.sql(dialect);
        sql.push_str(if self.nullable { " NULL" } else { " NOT NULL" });
        if let Some(ref default) = self.default {
            sql.push_str(&format!(" DEFAULT {}", dialect.quote_value(default)));
        }
        if let Some(ref check) = self.check {
            sql.push_str(&format!(" CHECK ({check})"));
        }
        sql
    }
}
