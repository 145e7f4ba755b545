//! # sqlbridge-core
//!
//! Foundation crate for sqlbridge. Provides the shared error type
//! [`SqlBridgeError`] used across every layer and the [`logging`] helpers
//! for configuring `tracing`-based output.

pub mod error;
pub mod logging;

pub use error::{SqlBridgeError, SqlBridgeResult};
