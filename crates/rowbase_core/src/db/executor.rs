//! Statement execution contract and bind-value preparation.
//!
//! # Responsibility
//! - Define the `QueryExecutor` seam between persistence logic and the
//!   concrete store connection.
//! - Coerce in-memory values into bind parameters SQLite accepts.
//!
//! # Invariants
//! - Temporal values are bound as their canonical RFC 3339 UTC text.
//! - Every other value kind is bound unchanged.

use crate::db::StoreResult;
use crate::model::value::AttrValue;
use chrono::SecondsFormat;
use rusqlite::types::Value;
use std::collections::BTreeMap;

/// One decoded result row: column name to coerced scalar value.
pub type RowMap = BTreeMap<String, AttrValue>;

/// Execution seam for parameterized statements.
///
/// Implemented by [`ConnectionContext`](crate::db::ConnectionContext) for the
/// real store; tests substitute capturing doubles to assert emitted SQL and
/// bind order.
pub trait QueryExecutor {
    /// Executes a data-modifying statement with positionally bound `args`
    /// and returns the affected-row count.
    fn execute(&self, sql: &str, args: &[AttrValue]) -> StoreResult<usize>;

    /// Executes a row-returning statement with positionally bound `args`
    /// and returns the decoded rows.
    fn query(&self, sql: &str, args: &[AttrValue]) -> StoreResult<Vec<RowMap>>;

    /// Returns the identifier generated by the most recent successful
    /// insert on the underlying connection.
    ///
    /// Only meaningful immediately after an insert; stale otherwise.
    fn last_insert_id(&self) -> StoreResult<i64>;
}

/// Converts one attribute value into its bind representation.
///
/// Timestamps become canonical RFC 3339 UTC text; all other kinds map onto
/// the matching SQLite scalar unchanged.
pub fn prepare_value(value: &AttrValue) -> Value {
    match value {
        AttrValue::Null => Value::Null,
        AttrValue::Integer(n) => Value::Integer(*n),
        AttrValue::Real(r) => Value::Real(*r),
        AttrValue::Text(s) => Value::Text(s.clone()),
        AttrValue::Blob(bytes) => Value::Blob(bytes.clone()),
        AttrValue::Timestamp(ts) => {
            Value::Text(ts.to_rfc3339_opts(SecondsFormat::Millis, true))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::prepare_value;
    use crate::model::value::AttrValue;
    use chrono::{TimeZone, Utc};
    use rusqlite::types::Value;

    #[test]
    fn timestamps_bind_as_canonical_text() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 45).unwrap();
        let bound = prepare_value(&AttrValue::Timestamp(ts));
        assert_eq!(bound, Value::Text("2026-03-01T12:30:45.000Z".to_string()));
    }

    #[test]
    fn non_temporal_values_bind_unchanged() {
        assert_eq!(prepare_value(&AttrValue::Null), Value::Null);
        assert_eq!(prepare_value(&AttrValue::Integer(42)), Value::Integer(42));
        assert_eq!(prepare_value(&AttrValue::Real(1.5)), Value::Real(1.5));
        assert_eq!(
            prepare_value(&AttrValue::Text("plain".to_string())),
            Value::Text("plain".to_string())
        );
        assert_eq!(
            prepare_value(&AttrValue::Blob(vec![0xde, 0xad])),
            Value::Blob(vec![0xde, 0xad])
        );
    }
}
