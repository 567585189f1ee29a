//! Record-shaping primitives used by the widget processor.
//!
//! All functions operate on dynamic JSON records (`serde_json::Value`) and
//! never mutate their input. Field lookups on missing fields or non-object
//! records read as absent.
//!
//! # Modules
//!
//! - [`filtering`]: Equality and set-membership filters
//! - [`sorting`]: Stable, total-order sorting by a record field
//! - [`aggregation`]: Numeric coercion, count/sum/avg/min/max, grouping and clamping
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use widget_core::api::{Aggregation, Filters};
//! use widget_core::transformations::{apply_filters, calculate_aggregation};
//!
//! let records = vec![json!({ "status": "open", "qty": 4 }), json!({ "status": "done", "qty": 6 })];
//! let filters: Filters = serde_json::from_value(json!({ "status": "open" })).unwrap();
//! let open = apply_filters(&records, Some(&filters));
//! let total = calculate_aggregation(open.iter().copied(), Some(Aggregation::Sum), Some("qty"));
//! assert_eq!(total, 4.0);
//! ```

pub mod aggregation;
pub mod filtering;
pub mod sorting;

pub use aggregation::{
    calculate_aggregation, clamp_percentage, coerce_number, group_label, group_records,
};
pub use filtering::{
    apply_filters, field_value, matches_filter, matches_filters, values_equal,
};
pub use sorting::{compare_values, sort_data, sort_records};
