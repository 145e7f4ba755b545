//! # sqlbridge
//!
//! A dialect-abstraction layer for relational schema migrations. A migration
//! is written once against the [`Migrator`](migrations::Migrator) and renders
//! correctly on MySQL, PostgreSQL, and SQLite: column types resolve through
//! per-dialect capability tables with documented fallbacks, constraint and
//! index names derive deterministically when omitted, and every data-level
//! write injects the audit columns unless explicitly told not to.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient
//! access. Depend on `sqlbridge` for the whole surface, or on individual
//! crates for finer-grained control.

/// Error types and logging setup.
pub use sqlbridge_core as core;

/// Dialects, values, column descriptors, and the SQL-building executor.
pub use sqlbridge_db as db;

/// The migration surface: type resolution, naming, and the `Migrator`.
pub use sqlbridge_migrations as migrations;
