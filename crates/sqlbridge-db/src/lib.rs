//! # sqlbridge-db
//!
//! Database layer for sqlbridge. Defines the backend-agnostic [`Value`]
//! model, the [`DialectKind`] quoting/placeholder rules, the
//! [`CapabilityService`] abstraction over native-type support, column
//! descriptors, and the [`CommandExecutor`] contract together with its
//! SQL-building implementation [`SqlCommandExecutor`].
//!
//! ## Architecture
//!
//! Statement construction is split in two: [`DialectKind`] answers the purely
//! syntactic questions (identifier quoting, placeholder style, literal
//! rendering) while [`SqlCommandExecutor`] assembles full statements and runs
//! them through a [`DatabaseBackend`]. Dialect branching for *types* goes
//! through [`CapabilityService`] instead of per-dialect subclassing, so the
//! fallback logic above this crate stays centralized and testable.
//!
//! ## Module Overview
//!
//! - [`value`] - the backend-agnostic [`Value`] enum
//! - [`dialect`] - [`DialectKind`] quoting and placeholder rules
//! - [`capabilities`] - [`CapabilityService`] and the per-dialect tables
//! - [`column`] - [`ColumnType`] and the [`ColumnDescriptor`] builder
//! - [`audit`] - the audit-column contract (names, UID shape, value sets)
//! - [`backend`] - the [`DatabaseBackend`] connection boundary
//! - [`executor`] - the [`CommandExecutor`] trait and [`OnAction`]
//! - [`sql`] - [`SqlCommandExecutor`], the SQL-building executor

// format_push_string: format! with push_str is clearer than write! for SQL generation
#![allow(clippy::format_push_string)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::use_self)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::match_same_arms)]

pub mod audit;
pub mod backend;
pub mod capabilities;
pub mod column;
pub mod dialect;
pub mod executor;
pub mod sql;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use audit::{AuditColumns, UID_DEFAULT, UID_LENGTH};
pub use backend::DatabaseBackend;
pub use capabilities::{CapabilityService, DialectCapabilities};
pub use column::{ColumnDescriptor, ColumnType};
pub use dialect::DialectKind;
pub use executor::{CommandExecutor, OnAction};
pub use sql::SqlCommandExecutor;
pub use value::Value;
