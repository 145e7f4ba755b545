//! Core error types for sqlbridge.
//!
//! [`SqlBridgeError`] covers every failure category the migration layer can
//! surface. The layer itself is a pass-through for delegate failures: errors
//! originating in a database backend are carried unchanged inside
//! [`SqlBridgeError::DatabaseError`], with no wrapping, retries, or
//! suppression added along the way.

use thiserror::Error;

/// The primary error type for sqlbridge.
#[derive(Error, Debug)]
pub enum SqlBridgeError {
    /// A statement failed at the database: constraint violation, duplicate
    /// constraint/index name, malformed SQL from a misused argument.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// The connection to the database was lost or could not be established.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A migration-level failure outside statement execution, e.g. a
    /// migration author returning early with a domain problem.
    #[error("Migration error: {0}")]
    MigrationError(String),

    /// An underlying IO failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the workspace.
pub type SqlBridgeResult<T> = Result<T, SqlBridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_display() {
        let err = SqlBridgeError::DatabaseError("duplicate key".into());
        assert_eq!(err.to_string(), "Database error: duplicate key");
    }

    #[test]
    fn test_connection_error_display() {
        let err = SqlBridgeError::ConnectionError("refused".into());
        assert_eq!(err.to_string(), "Connection error: refused");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SqlBridgeError = io.into();
        assert!(matches!(err, SqlBridgeError::Io(_)));
    }
}
