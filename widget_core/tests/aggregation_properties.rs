//! Property tests for aggregation totality and percentage clamping.

use proptest::prelude::*;
use serde_json::{json, Value};
use widget_core::api::{Aggregation, DataSource, WidgetConfig, WidgetType};
use widget_core::models::SystemData;
use widget_core::services::WidgetDataProcessor;
use widget_core::transformations::{calculate_aggregation, clamp_percentage};

fn aggregation() -> impl Strategy<Value = Aggregation> {
    prop_oneof![
        Just(Aggregation::Count),
        Just(Aggregation::Sum),
        Just(Aggregation::Avg),
        Just(Aggregation::Min),
        Just(Aggregation::Max),
    ]
}

/// Field values of every JSON kind, including malformed numbers.
fn field_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<f64>().prop_map(|n| serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z0-9.e+-]{0,8}".prop_map(Value::String),
        any::<bool>().prop_map(Value::Bool),
        Just(Value::Null),
        Just(json!([1, 2])),
    ]
}

fn records() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(
        prop::option::of(field_value()).prop_map(|v| match v {
            Some(v) => json!({ "value": v }),
            None => json!({}),
        }),
        0..40,
    )
}

proptest! {
    #[test]
    fn aggregation_is_always_finite(records in records(), kind in aggregation()) {
        let result = calculate_aggregation(&records, Some(kind), None);
        prop_assert!(result.is_finite());
        if records.is_empty() {
            prop_assert_eq!(result, 0.0);
        }
    }

    #[test]
    fn clamp_stays_in_range(value in any::<f64>()) {
        let clamped = clamp_percentage(value);
        prop_assert!((0.0..=100.0).contains(&clamped));
    }

    #[test]
    fn progress_and_gauge_stay_in_range(records in records(), kind in aggregation()) {
        let mut data = SystemData::new();
        data.set_collection(&DataSource::Resources, records);

        for widget_type in [WidgetType::Progress, WidgetType::Gauge] {
            let mut config = WidgetConfig::new("p", widget_type, DataSource::Resources, "P");
            config.aggregation = Some(kind);
            let result = WidgetDataProcessor::new(&data).process_widget_data(&config).unwrap();
            let pct = result.progress_value.or(result.gauge_value).unwrap();
            prop_assert!((0.0..=100.0).contains(&pct));
        }
    }
}
