//! Deterministic constraint and index naming.
//!
//! When a migration author omits a constraint name, the [`NameDeriver`]
//! supplies one derived from the defining table, columns, and kind. The
//! derivation must be pure: identical inputs always produce the identical
//! name, so re-running a migration (or diffing a schema) sees stable
//! identifiers. Collisions are not detected here -- a duplicate name
//! surfaces as a database error from the delegated DDL statement.

use sha2::{Digest, Sha256};

/// The kind of database object a name is derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// A primary-key constraint.
    PrimaryKey,
    /// A foreign-key constraint.
    ForeignKey,
    /// An index, unique or plain.
    Index,
}

impl ConstraintKind {
    fn suffix(self, unique: bool) -> &'static str {
        match self {
            Self::PrimaryKey => "pk",
            Self::ForeignKey => "fk",
            Self::Index => {
                if unique {
                    "uq"
                } else {
                    "ix"
                }
            }
        }
    }
}

/// Derives a name from `(kind, table, columns, unique)`.
///
/// Required to be pure and deterministic for identical inputs. The `unique`
/// flag only participates for [`ConstraintKind::Index`] call sites, but
/// implementations receive it unconditionally.
pub trait NameDeriver: Send + Sync {
    /// Returns the derived name.
    fn derive(&self, kind: ConstraintKind, table: &str, columns: &[&str], unique: bool)
        -> String;
}

/// The default derivation: `{table}_{hash}_{suffix}`.
///
/// The hash is a truncated SHA-256 over every derivation input, so
/// different column sets, kinds, or uniqueness over the same table are
/// extremely unlikely to collide while names stay short enough for the
/// common 63/64-character identifier limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNameDeriver;

impl DefaultNameDeriver {
    /// Hash prefix length in hex characters.
    const HASH_LEN: usize = 10;

    /// Longest table-name fragment carried into the derived name.
    const TABLE_FRAGMENT: usize = 40;
}

impl NameDeriver for DefaultNameDeriver {
    fn derive(
        &self,
        kind: ConstraintKind,
        table: &str,
        columns: &[&str],
        unique: bool,
    ) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!("{kind:?}"));
        hasher.update([0]);
        hasher.update(table.as_bytes());
        for column in columns {
            hasher.update([0]);
            hasher.update(column.as_bytes());
        }
        hasher.update([0]);
        hasher.update([u8::from(unique)]);

        let digest = hasher.finalize();
        let hash: String = digest
            .iter()
            .take(Self::HASH_LEN / 2)
            .map(|b| format!("{b:02x}"))
            .collect();

        let fragment: String = table.chars().take(Self::TABLE_FRAGMENT).collect();
        format!("{fragment}_{hash}_{}", kind.suffix(unique))
    }
}
