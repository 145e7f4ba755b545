//! Dialect identification and quoting rules.
//!
//! [`DialectKind`] answers the purely syntactic questions that vary between
//! engines: how identifiers are quoted, what parameter placeholders look
//! like, and how literal values are rendered inside generated SQL text
//! (e.g. check-constraint expressions). Anything involving *type* support
//! goes through [`CapabilityService`](crate::capabilities::CapabilityService)
//! instead.

use crate::value::Value;

/// The database engine a connection targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialectKind {
    /// MySQL / MariaDB.
    MySql,
    /// PostgreSQL.
    Postgres,
    /// SQLite.
    Sqlite,
}

impl DialectKind {
    /// Returns the vendor name (e.g. "mysql", "postgresql", "sqlite").
    pub fn vendor(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgresql",
            Self::Sqlite => "sqlite",
        }
    }

    /// Quotes an identifier (table, column, constraint name).
    ///
    /// MySQL uses backticks; PostgreSQL and SQLite use double quotes.
    pub fn quote_ident(self, ident: &str) -> String {
        match self {
            Self::MySql => format!("`{ident}`"),
            Self::Postgres | Self::Sqlite => format!("\"{ident}\""),
        }
    }

    /// Returns the parameter placeholder for the `n`-th bound value
    /// (1-based).
    ///
    /// PostgreSQL uses numbered placeholders (`$1`, `$2`, ...); MySQL and
    /// SQLite use positional `?`.
    pub fn placeholder(self, n: usize) -> String {
        match self {
            Self::Postgres => format!("${n}"),
            Self::MySql | Self::Sqlite => "?".to_string(),
        }
    }

    /// Renders a value as a SQL literal.
    ///
    /// This is the dialect's own value-quoting function, used wherever a
    /// value must appear inline in generated SQL text (check-constraint
    /// expressions, column defaults). Strings are escaped by doubling
    /// single quotes; parameters bound at execution time never pass through
    /// here.
    pub fn quote_value(self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => match self {
                // SQLite and MySQL store booleans as integers.
                Self::MySql | Self::Sqlite => (i32::from(*b)).to_string(),
                Self::Postgres => (if *b { "TRUE" } else { "FALSE" }).to_string(),
            },
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => format!("'{}'", s.replace('\'', "''")),
            Value::Bytes(_) => "NULL".to_string(),
            Value::DateTime(dt) => format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Uuid(u) => format!("'{u}'"),
            Value::Json(j) => format!("'{}'", j.to_string().replace('\'', "''")),
        }
    }
}

impl std::fmt::Display for DialectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.vendor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Identifier quoting ──────────────────────────────────────────

    #[test]
    fn test_mysql_quote_ident() {
        assert_eq!(DialectKind::MySql.quote_ident("users"), "`users`");
    }

    #[test]
    fn test_pg_quote_ident() {
        assert_eq!(DialectKind::Postgres.quote_ident("users"), "\"users\"");
    }

    #[test]
    fn test_sqlite_quote_ident() {
        assert_eq!(DialectKind::Sqlite.quote_ident("users"), "\"users\"");
    }

    // ── Placeholders ────────────────────────────────────────────────

    #[test]
    fn test_pg_placeholder_numbered() {
        assert_eq!(DialectKind::Postgres.placeholder(1), "$1");
        assert_eq!(DialectKind::Postgres.placeholder(3), "$3");
    }

    #[test]
    fn test_mysql_placeholder_positional() {
        assert_eq!(DialectKind::MySql.placeholder(1), "?");
        assert_eq!(DialectKind::MySql.placeholder(9), "?");
    }

    // ── Literal quoting ─────────────────────────────────────────────

    #[test]
    fn test_quote_string_escapes_single_quotes() {
        let v = Value::String("it's".into());
        assert_eq!(DialectKind::MySql.quote_value(&v), "'it''s'");
    }

    #[test]
    fn test_quote_null() {
        assert_eq!(DialectKind::Postgres.quote_value(&Value::Null), "NULL");
    }

    #[test]
    fn test_quote_bool_per_dialect() {
        let v = Value::Bool(true);
        assert_eq!(DialectKind::Postgres.quote_value(&v), "TRUE");
        assert_eq!(DialectKind::MySql.quote_value(&v), "1");
        assert_eq!(DialectKind::Sqlite.quote_value(&v), "1");
    }

    #[test]
    fn test_quote_int() {
        assert_eq!(DialectKind::Sqlite.quote_value(&Value::Int(-5)), "-5");
    }

    #[test]
    fn test_vendor_names() {
        assert_eq!(DialectKind::MySql.vendor(), "mysql");
        assert_eq!(DialectKind::Postgres.vendor(), "postgresql");
        assert_eq!(DialectKind::Sqlite.vendor(), "sqlite");
    }
}
