use serde_json::Value;

use crate::api::{FilterValue, Filters};

/// Look up a field on a record. Non-object records have no fields.
pub fn field_value<'a>(record: &'a Value, field: &str) -> Option<&'a Value> {
    record.as_object().and_then(|obj| obj.get(field))
}

/// Strict equality between two JSON values, except that numbers compare by
/// value so `1` and `1.0` are equal.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Check a single record field against one filter entry.
///
/// An empty `OneOf` set imposes no constraint.
pub fn matches_filter(record: &Value, field: &str, filter: &FilterValue) -> bool {
    match filter {
        FilterValue::OneOf(accepted) if accepted.is_empty() => true,
        FilterValue::OneOf(accepted) => field_value(record, field)
            .map(|v| accepted.iter().any(|a| values_equal(v, a)))
            .unwrap_or(false),
        FilterValue::Equals(expected) => field_value(record, field)
            .map(|v| values_equal(v, expected))
            .unwrap_or(false),
    }
}

/// A record passes iff every filter entry matches.
pub fn matches_filters(record: &Value, filters: &Filters) -> bool {
    filters
        .iter()
        .all(|(field, filter)| matches_filter(record, field, filter))
}

/// Keep the records that pass `filters`; `None` keeps everything.
pub fn apply_filters<'a>(records: &'a [Value], filters: Option<&Filters>) -> Vec<&'a Value> {
    match filters {
        Some(filters) if !filters.is_empty() => records
            .iter()
            .filter(|r| matches_filters(r, filters))
            .collect(),
        _ => records.iter().collect(),
    }
}
