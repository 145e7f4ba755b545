//! The audit-column contract.
//!
//! Every audited table carries the same bookkeeping trio: a creation
//! timestamp, an update timestamp, and a stable 36-character row UID whose
//! column default is the single-character sentinel `"0"`. The trio is a
//! cross-cutting contract, not a stored object: a flag on each CRUD call
//! decides whether these columns are auto-populated for that call, and the
//! UID column must have the identical shape everywhere so UID-to-UID joins
//! type-match across the schema.

use chrono::Utc;
use uuid::Uuid;

use crate::value::Value;

/// Column name for the creation timestamp.
pub const CREATED_AT: &str = "created_at";

/// Column name for the update timestamp.
pub const UPDATED_AT: &str = "updated_at";

/// Column name for the stable row UID.
pub const ROW_UID: &str = "row_uid";

/// Width of the row UID column: a hyphenated UUID.
pub const UID_LENGTH: u32 = 36;

/// Column default for the row UID: a sentinel meaning "never assigned".
pub const UID_DEFAULT: &str = "0";

/// Produces the audit values a mutating statement injects.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditColumns;

impl AuditColumns {
    /// The column names of the audit trio, in definition order.
    pub const NAMES: [&'static str; 3] = [CREATED_AT, UPDATED_AT, ROW_UID];

    /// Values injected on the insert path: both timestamps set to now and a
    /// freshly generated UID.
    pub fn insert_values() -> Vec<(String, Value)> {
        let now = Utc::now();
        vec![
            (CREATED_AT.to_string(), Value::DateTime(now)),
            (UPDATED_AT.to_string(), Value::DateTime(now)),
            (
                ROW_UID.to_string(),
                Value::String(Uuid::new_v4().to_string()),
            ),
        ]
    }

    /// Values injected on the update path: only the update timestamp is
    /// refreshed. Creation time and UID are immutable once set.
    pub fn update_values() -> Vec<(String, Value)> {
        vec![(UPDATED_AT.to_string(), Value::DateTime(Utc::now()))]
    }
}
