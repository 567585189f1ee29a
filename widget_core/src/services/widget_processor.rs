//! Widget data processing.
//!
//! [`WidgetDataProcessor`] maps a [`WidgetConfig`] over the collections in a
//! [`SystemData`] bag and returns the renderer-ready [`ProcessedWidgetData`].
//! Processing is synchronous and side-effect free: the same config and data
//! always produce the same result.
//!
//! # Dispatch
//!
//! The source collection is resolved first. An absent or empty collection
//! yields [`ProcessedWidgetData::empty_state`] for every widget type. Otherwise
//! the widget type selects one branch:
//!
//! | type               | output                                              |
//! |--------------------|-----------------------------------------------------|
//! | `kpi`              | `value`, `label`, up to 3 sample `items`            |
//! | `chart`            | `chartData` (one bucket per group)                  |
//! | `table` / `list`   | `tableData` / `items`, sorted and limited           |
//! | `alert`            | `alertData`, newest `created_at` first by default   |
//! | `timeline`         | `items`, earliest `scheduled_date` first by default |
//! | `progress`/`gauge` | `progressValue`/`gaugeValue` clamped to `[0, 100]`  |
//! | `button` / `text`  | static `value`/`label` from the config              |

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::api::{
    ChartData, ChartDataset, ProcessedWidgetData, SortDirection, SortSpec,
    WidgetConfig, WidgetType, WidgetValue,
};
use crate::models::{ResolvedSource, SystemData};
use crate::transformations::aggregation::{
    calculate_aggregation, clamp_percentage, coerce_number, group_records,
};
use crate::transformations::filtering::apply_filters;
use crate::transformations::sorting::sort_records;

/// Colours used for chart buckets when the config has none.
pub const DEFAULT_CHART_COLORS: [&str; 10] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#06b6d4", "#84cc16", "#f97316",
    "#ec4899", "#6b7280",
];

/// Number of sample records attached to a KPI result.
pub const KPI_SAMPLE_ITEMS: usize = 3;

const DEFAULT_BUTTON_LABEL: &str = "Click to execute";
const DEFAULT_BUTTON_ACTION: &str = "custom";
const DEFAULT_TEXT_CONTENT: &str = "Add your content here...";
const ALERT_SORT_FIELD: &str = "created_at";
const TIMELINE_SORT_FIELD: &str = "scheduled_date";

/// Error raised inside a processing branch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProcessingError {
    #[error("Unknown widget type: {0}")]
    UnknownWidgetType(String),

    #[error("Widget type '{0}' has no data processing branch")]
    UnsupportedWidgetType(String),
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;

/// Pure mapping from widget configs to processed widget data over one
/// snapshot of system data.
#[derive(Debug, Clone, Copy)]
pub struct WidgetDataProcessor<'a> {
    data: &'a SystemData,
}

impl<'a> WidgetDataProcessor<'a> {
    pub fn new(data: &'a SystemData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &'a SystemData {
        self.data
    }

    /// Process one widget.
    ///
    /// Returns `None` when processing fails (the error is logged); callers
    /// render a "no data" placeholder in that case.
    pub fn process_widget_data(&self, config: &WidgetConfig) -> Option<ProcessedWidgetData> {
        match self.try_process_widget_data(config) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("Failed to process widget '{}': {}", config.id, e);
                None
            }
        }
    }

    /// Process one widget, surfacing the failure reason.
    pub fn try_process_widget_data(
        &self,
        config: &WidgetConfig,
    ) -> ProcessingResult<ProcessedWidgetData> {
        let source = self.data.resolve(&config.data_source);
        if source.is_empty() {
            debug!(
                "Widget '{}': no {} data, returning empty state",
                config.id, config.data_source
            );
            return Ok(ProcessedWidgetData::empty_state(&config.data_source));
        }

        debug!(
            "Widget '{}': processing {} widget over {} {} entries",
            config.id,
            config.widget_type,
            source.len(),
            config.data_source
        );

        match (&config.widget_type, source) {
            (WidgetType::Button, _) => Ok(button_data(config)),
            (WidgetType::Text, _) => Ok(text_data(config)),
            (WidgetType::ScheduleOptimization, _) => Err(ProcessingError::UnsupportedWidgetType(
                config.widget_type.to_string(),
            )),
            (WidgetType::Other(tag), _) => Err(ProcessingError::UnknownWidgetType(tag.clone())),
            (WidgetType::Kpi, ResolvedSource::Metrics(metrics)) => {
                Ok(metric_kpi_data(metrics, config))
            }
            (_, ResolvedSource::Metrics(_)) => {
                debug!(
                    "Widget '{}': {} widgets need record data, metrics is a map",
                    config.id, config.widget_type
                );
                Ok(ProcessedWidgetData::empty_state(&config.data_source))
            }
            (_, ResolvedSource::Records(records)) => {
                let filtered = apply_filters(records, config.filters.as_ref());
                Ok(record_data(filtered, config))
            }
        }
    }
}

/// Record-backed branches. Types without a record branch fall through to the
/// static button/text output.
fn record_data(filtered: Vec<&Value>, config: &WidgetConfig) -> ProcessedWidgetData {
    match config.widget_type {
        WidgetType::Kpi => kpi_data(&filtered, config),
        WidgetType::Chart => chart_data(&filtered, config),
        WidgetType::Table => ProcessedWidgetData {
            table_data: Some(shaped_records(filtered, config, None, true)),
            ..Default::default()
        },
        WidgetType::List => ProcessedWidgetData {
            items: Some(shaped_records(filtered, config, None, true)),
            ..Default::default()
        },
        WidgetType::Alert => {
            let default_sort = SortSpec::new(ALERT_SORT_FIELD, SortDirection::Desc);
            ProcessedWidgetData {
                alert_data: Some(shaped_records(filtered, config, Some(default_sort), true)),
                ..Default::default()
            }
        }
        WidgetType::Timeline => {
            let default_sort = SortSpec::new(TIMELINE_SORT_FIELD, SortDirection::Asc);
            ProcessedWidgetData {
                items: Some(shaped_records(filtered, config, Some(default_sort), false)),
                ..Default::default()
            }
        }
        WidgetType::Progress => {
            let pct = percentage(&filtered, config);
            ProcessedWidgetData {
                value: Some(WidgetValue::Number(pct)),
                label: Some(config.title.clone()),
                progress_value: Some(pct),
                ..Default::default()
            }
        }
        WidgetType::Gauge => {
            let pct = percentage(&filtered, config);
            ProcessedWidgetData {
                value: Some(WidgetValue::Number(pct)),
                label: Some(config.title.clone()),
                gauge_value: Some(pct),
                ..Default::default()
            }
        }
        WidgetType::Text => text_data(config),
        WidgetType::Button
        | WidgetType::ScheduleOptimization
        | WidgetType::Other(_) => button_data(config),
    }
}

/// Field read by scalar aggregations (kpi, progress, gauge).
fn scalar_field(config: &WidgetConfig) -> Option<&str> {
    config
        .aggregation_field
        .as_deref()
        .or(config.group_by.as_deref())
}

fn kpi_data(filtered: &[&Value], config: &WidgetConfig) -> ProcessedWidgetData {
    let value = calculate_aggregation(
        filtered.iter().copied(),
        config.aggregation,
        scalar_field(config),
    );
    ProcessedWidgetData {
        value: Some(WidgetValue::Number(value)),
        label: Some(config.title.clone()),
        items: Some(
            filtered
                .iter()
                .take(KPI_SAMPLE_ITEMS)
                .map(|r| (*r).clone())
                .collect(),
        ),
        ..Default::default()
    }
}

/// KPI over the flat metrics map. `groupBy` names the metric; without it the
/// first numeric entry in snapshot order is used.
fn metric_kpi_data(metrics: &Map<String, Value>, config: &WidgetConfig) -> ProcessedWidgetData {
    let value = match config.group_by.as_deref() {
        Some(key) => coerce_number(metrics.get(key)),
        None => metrics
            .values()
            .find_map(|v| v.as_f64())
            .filter(|n| n.is_finite())
            .unwrap_or(0.0),
    };
    ProcessedWidgetData {
        value: Some(WidgetValue::Number(value)),
        label: Some(config.title.clone()),
        ..Default::default()
    }
}

fn chart_data(filtered: &[&Value], config: &WidgetConfig) -> ProcessedWidgetData {
    let buckets = group_records(filtered, config.group_by.as_deref());
    if buckets.is_empty() {
        return ProcessedWidgetData::empty_state(&config.data_source);
    }

    let field = config.aggregation_field.as_deref();
    let mut labels = Vec::with_capacity(buckets.len());
    let mut data = Vec::with_capacity(buckets.len());
    for (label, records) in buckets {
        data.push(calculate_aggregation(records, config.aggregation, field));
        labels.push(label);
    }

    let palette: Vec<&str> = match config.colors.as_deref() {
        Some(colors) if !colors.is_empty() => colors.iter().map(String::as_str).collect(),
        _ => DEFAULT_CHART_COLORS.to_vec(),
    };
    let colors: Vec<String> = (0..labels.len())
        .map(|i| palette[i % palette.len()].to_string())
        .collect();

    ProcessedWidgetData {
        chart_data: Some(ChartData {
            labels,
            datasets: vec![ChartDataset {
                label: config.title.clone(),
                data,
                background_color: colors.clone(),
                border_color: colors,
                border_width: 1,
            }],
        }),
        ..Default::default()
    }
}

/// Sort (config sort, else `default_sort`) and optionally truncate to `limit`.
fn shaped_records(
    mut records: Vec<&Value>,
    config: &WidgetConfig,
    default_sort: Option<SortSpec>,
    apply_limit: bool,
) -> Vec<Value> {
    if let Some(sort) = config.sort_by.as_ref().or(default_sort.as_ref()) {
        sort_records(&mut records, sort);
    }
    if apply_limit {
        if let Some(limit) = config.limit {
            records.truncate(limit);
        }
    }
    records.into_iter().cloned().collect()
}

fn percentage(filtered: &[&Value], config: &WidgetConfig) -> f64 {
    clamp_percentage(calculate_aggregation(
        filtered.iter().copied(),
        config.aggregation,
        scalar_field(config),
    ))
}

fn button_data(config: &WidgetConfig) -> ProcessedWidgetData {
    ProcessedWidgetData {
        value: Some(WidgetValue::Text(config.title.clone())),
        label: Some(
            config
                .subtitle
                .clone()
                .unwrap_or_else(|| DEFAULT_BUTTON_LABEL.to_string()),
        ),
        action: Some(
            config
                .action
                .clone()
                .unwrap_or_else(|| DEFAULT_BUTTON_ACTION.to_string()),
        ),
        ..Default::default()
    }
}

fn text_data(config: &WidgetConfig) -> ProcessedWidgetData {
    ProcessedWidgetData {
        value: Some(WidgetValue::Text(config.title.clone())),
        label: Some(
            config
                .content
                .clone()
                .unwrap_or_else(|| DEFAULT_TEXT_CONTENT.to_string()),
        ),
        ..Default::default()
    }
}

/// Convenience wrapper for one-off processing.
pub fn process_widget_data(
    data: &SystemData,
    config: &WidgetConfig,
) -> Option<ProcessedWidgetData> {
    WidgetDataProcessor::new(data).process_widget_data(config)
}
