//! The command-executor contract.
//!
//! [`CommandExecutor`] is the boundary between the migration layer and
//! statement construction/execution. The migration layer passes every
//! caller-supplied parameter through unchanged, adding only the
//! `include_audit` flag on the four audited operations; the executor owns
//! building the dialect-correct statement, computing audit values when
//! requested, and running the result against the connection.

use sqlbridge_core::SqlBridgeError;

use crate::dialect::DialectKind;
use crate::value::Value;

/// Referential action for foreign keys (`ON DELETE` / `ON UPDATE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnAction {
    /// Cascade the change to referencing rows.
    Cascade,
    /// Reject the change while references exist.
    Restrict,
    /// Null out the referencing columns.
    SetNull,
    /// Reset the referencing columns to their default.
    SetDefault,
    /// Take no action (deferred check).
    NoAction,
}

impl OnAction {
    /// Returns the SQL keyword sequence for this action.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// Builds and runs statements for every migration operation.
///
/// Implementations must treat each call as one statement round-trip: build,
/// execute, return. Failures are returned unchanged; no retries or
/// suppression happen at this level either.
#[async_trait::async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Returns the dialect statements are built for.
    fn dialect(&self) -> DialectKind;

    /// Renders a value as a SQL literal using the dialect's own quoting.
    ///
    /// Used by the type resolver when embedding values in generated check
    /// constraints; values must never be hand-escaped above this boundary.
    fn quote_value(&self, value: &Value) -> String;

    /// Inserts one row. With `include_audit`, the executor adds creation
    /// and update timestamps (now) and a freshly generated UID to the
    /// caller-supplied columns.
    async fn insert(
        &self,
        table: &str,
        columns: &[(&str, Value)],
        include_audit: bool,
    ) -> Result<u64, SqlBridgeError>;

    /// Inserts many rows in one statement. Audit handling as for
    /// [`CommandExecutor::insert`], with a distinct UID generated per row.
    ///
    /// Every row must have exactly one value per entry in `columns`.
    async fn batch_insert(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<Value>],
        include_audit: bool,
    ) -> Result<u64, SqlBridgeError>;

    /// Inserts or updates keyed on `key_columns`. `update_columns` are
    /// applied on both branches. With `include_audit`, the insert branch
    /// receives full audit values and the conflict branch refreshes only
    /// the update timestamp.
    async fn upsert(
        &self,
        table: &str,
        key_columns: &[(&str, Value)],
        update_columns: &[(&str, Value)],
        include_audit: bool,
    ) -> Result<u64, SqlBridgeError>;

    /// Updates rows matching `condition`. With `include_audit`, only the
    /// update timestamp is added to the SET clause; creation time and UID
    /// are immutable once set.
    ///
    /// `condition` is raw SQL passed through unchanged (empty means no
    /// WHERE clause); on dialects with numbered placeholders its parameter
    /// references must continue the numbering after the SET clause.
    async fn update(
        &self,
        table: &str,
        columns: &[(&str, Value)],
        condition: &str,
        params: &[Value],
        include_audit: bool,
    ) -> Result<u64, SqlBridgeError>;

    /// Replaces every occurrence of `find` with `replace_with` inside one
    /// text column, optionally filtered by `condition`. Never touches audit
    /// columns.
    async fn replace(
        &self,
        table: &str,
        column: &str,
        find: &str,
        replace_with: &str,
        condition: &str,
        params: &[Value],
    ) -> Result<u64, SqlBridgeError>;

    /// Drops a table if it exists. A missing table is not an error.
    async fn drop_table_if_exists(&self, table: &str) -> Result<(), SqlBridgeError>;

    /// Adds a named primary-key constraint.
    async fn add_primary_key(
        &self,
        name: &str,
        table: &str,
        columns: &[&str],
    ) -> Result<(), SqlBridgeError>;

    /// Adds a named foreign-key constraint.
    #[allow(clippy::too_many_arguments)]
    async fn add_foreign_key(
        &self,
        name: &str,
        table: &str,
        columns: &[&str],
        ref_table: &str,
        ref_columns: &[&str],
        on_delete: Option<OnAction>,
        on_update: Option<OnAction>,
    ) -> Result<(), SqlBridgeError>;

    /// Creates a named, optionally unique index.
    async fn create_index(
        &self,
        name: &str,
        table: &str,
        columns: &[&str],
        unique: bool,
    ) -> Result<(), SqlBridgeError>;
}
