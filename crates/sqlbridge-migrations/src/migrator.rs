//! The migration base contract.
//!
//! [`Migrator`] is the single surface a migration author writes against. It
//! composes the type resolver, the naming policy, and the audit-aware
//! operation wrapper over an injected [`CommandExecutor`]. It holds shared
//! references to its collaborators but owns no mutable state and caches
//! nothing: every call re-resolves capabilities and re-derives names, since
//! migrations run once and correctness matters more than micro-optimizing
//! redundant lookups.
//!
//! Every mutating operation follows the same shape: start notification,
//! timestamp, delegate, completion notification with elapsed milliseconds.
//! From the caller's perspective each call is atomic -- it either completes
//! (notification emitted) or the delegate's error propagates and no
//! completion notification is emitted.

use std::sync::Arc;
use std::time::Instant;

use sqlbridge_core::SqlBridgeResult;
use sqlbridge_db::capabilities::CapabilityService;
use sqlbridge_db::column::ColumnDescriptor;
use sqlbridge_db::executor::{CommandExecutor, OnAction};
use sqlbridge_db::value::Value;

use crate::naming::{ConstraintKind, DefaultNameDeriver, NameDeriver};
use crate::progress::{ProgressReporter, TracingReporter};
use crate::types::{TextSize, TypeResolver};

/// The surface migration authors call.
pub struct Migrator {
    executor: Arc<dyn CommandExecutor>,
    capabilities: Arc<dyn CapabilityService>,
    deriver: Arc<dyn NameDeriver>,
    reporter: Arc<dyn ProgressReporter>,
}

impl Migrator {
    /// Creates a migrator with the default name deriver and the
    /// tracing-backed progress reporter.
    pub fn new(
        executor: Arc<dyn CommandExecutor>,
        capabilities: Arc<dyn CapabilityService>,
    ) -> Self {
        Self {
            executor,
            capabilities,
            deriver: Arc::new(DefaultNameDeriver),
            reporter: Arc::new(TracingReporter),
        }
    }

    /// Replaces the name deriver.
    #[must_use]
    pub fn with_deriver(mut self, deriver: Arc<dyn NameDeriver>) -> Self {
        self.deriver = deriver;
        self
    }

    /// Replaces the progress reporter.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    fn resolver(&self) -> TypeResolver {
        TypeResolver::new(Arc::clone(&self.capabilities), self.executor.dialect())
    }

    /// Explicit names pass through verbatim; the deriver is called when and
    /// only when the caller supplied none.
    fn resolve_name(
        &self,
        name: Option<&str>,
        kind: ConstraintKind,
        table: &str,
        columns: &[&str],
        unique: bool,
    ) -> String {
        name.map_or_else(
            || self.deriver.derive(kind, table, columns, unique),
            ToString::to_string,
        )
    }

    // ── Type resolution ──────────────────────────────────────────────

    /// Resolves an oversized text column for the active dialect.
    pub fn oversized_text(&self, size: TextSize) -> ColumnDescriptor {
        self.resolver().oversized_text(size)
    }

    /// Resolves an enum-like column for the active dialect.
    pub fn enum_column(&self, column: &str, values: &[&str]) -> ColumnDescriptor {
        self.resolver().enum_column(column, values)
    }

    /// Shortcut for the uid column descriptor.
    pub fn uid(&self) -> ColumnDescriptor {
        self.resolver().uid_column()
    }

    // ── Naming policy ────────────────────────────────────────────────

    /// Adds a primary-key constraint, deriving a name when none is given.
    pub async fn add_primary_key(
        &self,
        name: Option<&str>,
        table: &str,
        columns: &[&str],
    ) -> SqlBridgeResult<()> {
        let resolved =
            self.resolve_name(name, ConstraintKind::PrimaryKey, table, columns, false);
        self.executor.add_primary_key(&resolved, table, columns).await
    }

    /// Adds a foreign-key constraint, deriving a name when none is given.
    ///
    /// Derivation input is the owning `(table, columns)` only -- the
    /// referenced table does not participate. Two foreign keys from the
    /// same table and columns to different targets therefore derive the
    /// same name and collide at creation time; callers needing both must
    /// supply explicit names.
    #[allow(clippy::too_many_arguments)]
    pub async fn add_foreign_key(
        &self,
        name: Option<&str>,
        table: &str,
        columns: &[&str],
        ref_table: &str,
        ref_columns: &[&str],
        on_delete: Option<OnAction>,
        on_update: Option<OnAction>,
    ) -> SqlBridgeResult<()> {
        let resolved =
            self.resolve_name(name, ConstraintKind::ForeignKey, table, columns, false);
        self.executor
            .add_foreign_key(
                &resolved, table, columns, ref_table, ref_columns, on_delete, on_update,
            )
            .await
    }

    /// Creates an index, deriving a name when none is given. The `unique`
    /// flag participates in derivation, so a unique and a plain index over
    /// the same columns never share a name.
    pub async fn create_index(
        &self,
        name: Option<&str>,
        table: &str,
        columns: &[&str],
        unique: bool,
    ) -> SqlBridgeResult<()> {
        let resolved = self.resolve_name(name, ConstraintKind::Index, table, columns, unique);
        self.executor
            .create_index(&resolved, table, columns, unique)
            .await
    }

    // ── Audit-aware CRUD ─────────────────────────────────────────────

    /// Inserts one row, auditing by default.
    pub async fn insert(
        &self,
        table: &str,
        columns: &[(&str, Value)],
        include_audit: bool,
    ) -> SqlBridgeResult<u64> {
        let label = format!("insert into '{table}'");
        self.reporter.begin(&label);
        let started = Instant::now();
        let affected = self.executor.insert(table, columns, include_audit).await?;
        self.reporter.complete(&label, started.elapsed());
        Ok(affected)
    }

    /// Inserts many rows in one statement, auditing by default.
    pub async fn batch_insert(
        &self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<Value>],
        include_audit: bool,
    ) -> SqlBridgeResult<u64> {
        let label = format!("batch insert of {} rows into '{table}'", rows.len());
        self.reporter.begin(&label);
        let started = Instant::now();
        let affected = self
            .executor
            .batch_insert(table, columns, rows, include_audit)
            .await?;
        self.reporter.complete(&label, started.elapsed());
        Ok(affected)
    }

    /// Inserts or updates keyed on `key_columns`, auditing by default.
    pub async fn upsert(
        &self,
        table: &str,
        key_columns: &[(&str, Value)],
        update_columns: &[(&str, Value)],
        include_audit: bool,
    ) -> SqlBridgeResult<u64> {
        let label = format!("upsert into '{table}'");
        self.reporter.begin(&label);
        let started = Instant::now();
        let affected = self
            .executor
            .upsert(table, key_columns, update_columns, include_audit)
            .await?;
        self.reporter.complete(&label, started.elapsed());
        Ok(affected)
    }

    /// Updates rows matching `condition`, auditing by default.
    pub async fn update(
        &self,
        table: &str,
        columns: &[(&str, Value)],
        condition: &str,
        params: &[Value],
        include_audit: bool,
    ) -> SqlBridgeResult<u64> {
        let label = format!("update of '{table}'");
        self.reporter.begin(&label);
        let started = Instant::now();
        let affected = self
            .executor
            .update(table, columns, condition, params, include_audit)
            .await?;
        self.reporter.complete(&label, started.elapsed());
        Ok(affected)
    }

    /// Replaces text inside one column. Never touches audit columns.
    pub async fn replace(
        &self,
        table: &str,
        column: &str,
        find: &str,
        replace_with: &str,
        condition: &str,
        params: &[Value],
    ) -> SqlBridgeResult<u64> {
        let label = format!("replace in '{table}.{column}'");
        self.reporter.begin(&label);
        let started = Instant::now();
        let affected = self
            .executor
            .replace(table, column, find, replace_with, condition, params)
            .await?;
        self.reporter.complete(&label, started.elapsed());
        Ok(affected)
    }

    /// Drops a table if it exists. A missing table completes without error
    /// and without performing DDL.
    pub async fn drop_table_if_exists(&self, table: &str) -> SqlBridgeResult<()> {
        let label = format!("drop of table '{table}'");
        self.reporter.begin(&label);
        let started = Instant::now();
        self.executor.drop_table_if_exists(table).await?;
        self.reporter.complete(&label, started.elapsed());
        Ok(())
    }
}

/// One migration, as written by an author.
///
/// Implementations declare their schema changes and data fixes against the
/// [`Migrator`]; the surrounding runner decides ordering and bookkeeping.
#[async_trait::async_trait]
pub trait Migration: Send + Sync {
    /// The migration's identifying name.
    fn name(&self) -> &str;

    /// Applies the migration.
    async fn apply(&self, migrator: &Migrator) -> SqlBridgeResult<()>;
}
