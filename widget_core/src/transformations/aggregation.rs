use std::collections::HashMap;

use serde_json::Value;

use super::filtering::field_value;
use crate::api::Aggregation;

/// Field read by numeric aggregations when none is configured.
pub const DEFAULT_VALUE_FIELD: &str = "value";

/// Bucket label used when no `groupBy` field is configured.
pub const ALL_BUCKET: &str = "All";

/// Bucket label for records missing the `groupBy` field.
pub const UNKNOWN_BUCKET: &str = "Unknown";

/// Coerce a JSON value to a finite number.
///
/// Numbers pass through, numeric strings are parsed, booleans map to 1/0 and
/// everything else (including blank or non-numeric strings) is 0.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Aggregate a record set.
///
/// Empty input always yields 0. `count` ignores `field`; the numeric kinds read
/// `field` (default `"value"`) through [`coerce_number`]. `None` means `count`.
/// The result is always finite.
pub fn calculate_aggregation<'a, I>(
    records: I,
    aggregation: Option<Aggregation>,
    field: Option<&str>,
) -> f64
where
    I: IntoIterator<Item = &'a Value>,
{
    let field = field.unwrap_or(DEFAULT_VALUE_FIELD);
    let aggregation = aggregation.unwrap_or_default();

    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for record in records {
        count += 1;
        if aggregation == Aggregation::Count {
            continue;
        }
        let n = coerce_number(field_value(record, field));
        sum += n;
        min = min.min(n);
        max = max.max(n);
    }

    if count == 0 {
        return 0.0;
    }

    let result = match aggregation {
        Aggregation::Count => count as f64,
        Aggregation::Sum => sum,
        Aggregation::Avg => sum / count as f64,
        Aggregation::Min => min,
        Aggregation::Max => max,
    };

    if result.is_finite() {
        result
    } else {
        0.0
    }
}

/// Display label for a group key.
pub fn group_label(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => UNKNOWN_BUCKET.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Group records by `group_by`, preserving first-seen bucket order.
///
/// Without a `group_by` field every record lands in a single [`ALL_BUCKET`].
pub fn group_records<'a>(
    records: &[&'a Value],
    group_by: Option<&str>,
) -> Vec<(String, Vec<&'a Value>)> {
    let Some(field) = group_by else {
        if records.is_empty() {
            return Vec::new();
        }
        return vec![(ALL_BUCKET.to_string(), records.to_vec())];
    };

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, Vec<&'a Value>)> = Vec::new();

    for &record in records {
        let label = group_label(field_value(record, field));
        match index.get(&label) {
            Some(&i) => buckets[i].1.push(record),
            None => {
                index.insert(label.clone(), buckets.len());
                buckets.push((label, vec![record]));
            }
        }
    }

    buckets
}

/// Clamp a value into the percentage range `[0, 100]`.
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ALL_KINDS: [Aggregation; 5] = [
        Aggregation::Count,
        Aggregation::Sum,
        Aggregation::Avg,
        Aggregation::Min,
        Aggregation::Max,
    ];

    #[test]
    fn test_empty_input_is_zero() {
        let records: Vec<Value> = vec![];
        for kind in ALL_KINDS {
            assert_eq!(calculate_aggregation(&records, Some(kind), Some("qty")), 0.0);
        }
        assert_eq!(calculate_aggregation(&records, None, None), 0.0);
    }

    #[test]
    fn test_aggregations() {
        let records = vec![
            json!({ "value": 4 }),
            json!({ "value": "6" }),
            json!({ "value": 2.0 }),
        ];
        assert_eq!(calculate_aggregation(&records, Some(Aggregation::Count), None), 3.0);
        assert_eq!(calculate_aggregation(&records, Some(Aggregation::Sum), None), 12.0);
        assert_eq!(calculate_aggregation(&records, Some(Aggregation::Avg), None), 4.0);
        assert_eq!(calculate_aggregation(&records, Some(Aggregation::Min), None), 2.0);
        assert_eq!(calculate_aggregation(&records, Some(Aggregation::Max), None), 6.0);
        assert_eq!(calculate_aggregation(&records, None, None), 3.0);
    }

    #[test]
    fn test_malformed_fields_count_as_zero() {
        let records = vec![
            json!({ "qty": "n/a" }),
            json!({ "qty": null }),
            json!({}),
            json!({ "qty": [1, 2] }),
            json!({ "qty": 9 }),
        ];
        assert_eq!(calculate_aggregation(&records, Some(Aggregation::Sum), Some("qty")), 9.0);
        assert_eq!(calculate_aggregation(&records, Some(Aggregation::Min), Some("qty")), 0.0);
        assert_eq!(calculate_aggregation(&records, Some(Aggregation::Avg), Some("qty")), 1.8);
    }

    #[test]
    fn test_overflowing_sum_stays_finite() {
        let records = vec![json!({ "value": 1.0e308 }), json!({ "value": 1.0e308 })];
        let sum = calculate_aggregation(&records, Some(Aggregation::Sum), None);
        assert!(sum.is_finite());
    }

    #[test]
    fn test_grouping_keeps_first_seen_order() {
        let records = vec![
            json!({ "category": "x" }),
            json!({ "category": "x" }),
            json!({ "category": "y" }),
            json!({}),
        ];
        let refs: Vec<&Value> = records.iter().collect();
        let groups = group_records(&refs, Some("category"));
        let labels: Vec<&str> = groups.iter().map(|(l, _)| l.as_str()).collect();
        let sizes: Vec<usize> = groups.iter().map(|(_, r)| r.len()).collect();
        assert_eq!(labels, vec!["x", "y", "Unknown"]);
        assert_eq!(sizes, vec![2, 1, 1]);
    }

    #[test]
    fn test_grouping_without_field() {
        let records = vec![json!({ "a": 1 }), json!({ "a": 2 })];
        let refs: Vec<&Value> = records.iter().collect();
        let groups = group_records(&refs, None);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, "All");
        assert!(group_records(&[], None).is_empty());
    }

    #[test]
    fn test_clamp_percentage() {
        assert_eq!(clamp_percentage(-5.0), 0.0);
        assert_eq!(clamp_percentage(150.0), 100.0);
        assert_eq!(clamp_percentage(42.5), 42.5);
        assert_eq!(clamp_percentage(f64::NAN), 0.0);
    }
}
