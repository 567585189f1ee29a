use std::cmp::Ordering;

use serde_json::Value;

use super::filtering::field_value;
use crate::api::{SortDirection, SortSpec};

/// Rank of a JSON value kind in the sort order.
fn kind_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

/// Total order over optional JSON values.
///
/// Missing and null sort first, then booleans, numbers, strings, arrays and
/// objects. Values of the same kind compare naturally; arrays and objects
/// compare equal among themselves.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.total_cmp(&y)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// Sort record references in place by `sort.field`.
///
/// The sort is stable: records whose keys compare equal keep their input order
/// in both directions.
pub fn sort_records(records: &mut [&Value], sort: &SortSpec) {
    records.sort_by(|a, b| {
        let ord = compare_values(field_value(a, &sort.field), field_value(b, &sort.field));
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Return a sorted copy of `records`.
pub fn sort_data(records: &[Value], sort: &SortSpec) -> Vec<Value> {
    let mut refs: Vec<&Value> = records.iter().collect();
    sort_records(&mut refs, sort);
    refs.into_iter().cloned().collect()
}
