//! The database connection boundary.
//!
//! [`DatabaseBackend`] is the trait every driver adapter implements: it
//! executes one statement at a time against the live connection. The
//! migration layer holds a reference to a backend but never constructs or
//! closes connections and never mutates connection-level state (transaction
//! scope, isolation level) -- it only issues statements through it.

use sqlbridge_core::SqlBridgeError;

use crate::dialect::DialectKind;
use crate::value::Value;

/// A live database connection capable of running parameterized statements.
///
/// All methods are async because database operations are inherently
/// I/O-bound; adapters over synchronous drivers wrap calls in
/// `spawn_blocking` to keep the interface uniform. Within a migration,
/// statements are always awaited one at a time, so implementations never
/// see concurrent calls from this layer.
#[async_trait::async_trait]
pub trait DatabaseBackend: Send + Sync {
    /// Returns the dialect this connection targets.
    fn dialect(&self) -> DialectKind;

    /// Executes a statement that does not return rows.
    ///
    /// Returns the number of rows affected. Errors are propagated unchanged
    /// to the caller; this layer adds no wrapping or retries.
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<u64, SqlBridgeError>;
}
