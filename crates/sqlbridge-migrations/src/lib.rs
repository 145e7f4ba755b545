//! # sqlbridge-migrations
//!
//! The migration surface of sqlbridge. A migration author implements
//! [`Migration`] and writes every schema change and data fix against a
//! [`Migrator`]; the migrator resolves dialect-specific column types through
//! the capability service, derives constraint and index names when the
//! author omits them, and wraps every mutating operation with audit-column
//! handling and timed progress reporting.
//!
//! ## Module Overview
//!
//! - [`types`] - [`TypeResolver`]: oversized text tiers, enum-with-fallback,
//!   the uid column shape
//! - [`naming`] - [`NameDeriver`] and the deterministic
//!   [`DefaultNameDeriver`]
//! - [`progress`] - [`ProgressReporter`] sinks
//! - [`migrator`] - [`Migrator`] and the [`Migration`] trait

#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::use_self)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::option_if_let_else)]

pub mod migrator;
pub mod naming;
pub mod progress;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use migrator::{Migration, Migrator};
pub use naming::{ConstraintKind, DefaultNameDeriver, NameDeriver};
pub use progress::{BufferReporter, ProgressReporter, TracingReporter};
pub use types::{TextSize, TypeResolver};
