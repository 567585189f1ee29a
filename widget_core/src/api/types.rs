//! Widget wire types shared by every host surface.
//!
//! This module defines the declarative widget description ([`WidgetConfig`]),
//! the closed tag sets it is built from, the renderer-facing result
//! ([`ProcessedWidgetData`]) and the two persisted record shapes used by the
//! cockpit layout API and the canvas session API.
//!
//! ## Design Guidelines
//!
//! 1. **Wire compatible**: Tag enums serialize to the exact strings the backend uses
//! 2. **Permissive**: Unknown `type`/`dataSource` tags deserialize into an `Other` variant
//!    instead of failing, so a single bad tile never breaks a whole layout
//! 3. **Optional shaping**: Every shaping option is independently omittable
//! 4. **Records stay dynamic**: Domain records are `serde_json::Value` objects accessed by
//!    field name; an unknown field reads as absent

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =========================================================
// Tag Sets
// =========================================================

/// Widget kind. Selects both the processing branch and the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WidgetType {
    Kpi,
    Chart,
    Table,
    Alert,
    Progress,
    Gauge,
    List,
    Timeline,
    Button,
    Text,
    ScheduleOptimization,
    /// Unrecognized tag, kept verbatim.
    Other(String),
}

impl WidgetType {
    pub fn as_str(&self) -> &str {
        match self {
            WidgetType::Kpi => "kpi",
            WidgetType::Chart => "chart",
            WidgetType::Table => "table",
            WidgetType::Alert => "alert",
            WidgetType::Progress => "progress",
            WidgetType::Gauge => "gauge",
            WidgetType::List => "list",
            WidgetType::Timeline => "timeline",
            WidgetType::Button => "button",
            WidgetType::Text => "text",
            WidgetType::ScheduleOptimization => "schedule-optimization",
            WidgetType::Other(tag) => tag,
        }
    }
}

impl From<String> for WidgetType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "kpi" => WidgetType::Kpi,
            "chart" => WidgetType::Chart,
            "table" => WidgetType::Table,
            "alert" => WidgetType::Alert,
            "progress" => WidgetType::Progress,
            "gauge" => WidgetType::Gauge,
            "list" => WidgetType::List,
            "timeline" => WidgetType::Timeline,
            "button" => WidgetType::Button,
            "text" => WidgetType::Text,
            "schedule-optimization" => WidgetType::ScheduleOptimization,
            _ => WidgetType::Other(tag),
        }
    }
}

impl From<&str> for WidgetType {
    fn from(tag: &str) -> Self {
        WidgetType::from(tag.to_string())
    }
}

impl From<WidgetType> for String {
    fn from(widget_type: WidgetType) -> Self {
        widget_type.as_str().to_string()
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named collection in [`crate::models::SystemData`] that feeds a widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataSource {
    ProductionOrders,
    Operations,
    Resources,
    Customers,
    Vendors,
    Plants,
    Capabilities,
    Recipes,
    ProductionVersions,
    PlannedOrders,
    Users,
    Metrics,
    Alerts,
    Optimization,
    /// Unrecognized tag; always resolves to an empty collection.
    Other(String),
}

impl DataSource {
    /// Every recognized source, in declaration order.
    pub const ALL: [DataSource; 14] = [
        DataSource::ProductionOrders,
        DataSource::Operations,
        DataSource::Resources,
        DataSource::Customers,
        DataSource::Vendors,
        DataSource::Plants,
        DataSource::Capabilities,
        DataSource::Recipes,
        DataSource::ProductionVersions,
        DataSource::PlannedOrders,
        DataSource::Users,
        DataSource::Metrics,
        DataSource::Alerts,
        DataSource::Optimization,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            DataSource::ProductionOrders => "productionOrders",
            DataSource::Operations => "operations",
            DataSource::Resources => "resources",
            DataSource::Customers => "customers",
            DataSource::Vendors => "vendors",
            DataSource::Plants => "plants",
            DataSource::Capabilities => "capabilities",
            DataSource::Recipes => "recipes",
            DataSource::ProductionVersions => "productionVersions",
            DataSource::PlannedOrders => "plannedOrders",
            DataSource::Users => "users",
            DataSource::Metrics => "metrics",
            DataSource::Alerts => "alerts",
            DataSource::Optimization => "optimization",
            DataSource::Other(tag) => tag,
        }
    }
}

impl From<String> for DataSource {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "productionOrders" => DataSource::ProductionOrders,
            "operations" => DataSource::Operations,
            "resources" => DataSource::Resources,
            "customers" => DataSource::Customers,
            "vendors" => DataSource::Vendors,
            "plants" => DataSource::Plants,
            "capabilities" => DataSource::Capabilities,
            "recipes" => DataSource::Recipes,
            "productionVersions" => DataSource::ProductionVersions,
            "plannedOrders" => DataSource::PlannedOrders,
            "users" => DataSource::Users,
            "metrics" => DataSource::Metrics,
            "alerts" => DataSource::Alerts,
            "optimization" => DataSource::Optimization,
            _ => DataSource::Other(tag),
        }
    }
}

impl From<&str> for DataSource {
    fn from(tag: &str) -> Self {
        DataSource::from(tag.to_string())
    }
}

impl From<DataSource> for String {
    fn from(source: DataSource) -> Self {
        source.as_str().to_string()
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregation applied over a filtered record set.
///
/// Deserialization is lenient: any unrecognized tag becomes [`Aggregation::Count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Aggregation {
    #[default]
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Count => "count",
            Aggregation::Sum => "sum",
            Aggregation::Avg => "avg",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
        }
    }
}

impl From<String> for Aggregation {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "sum" => Aggregation::Sum,
            "avg" => Aggregation::Avg,
            "min" => Aggregation::Min,
            "max" => Aggregation::Max,
            _ => Aggregation::Count,
        }
    }
}

impl From<Aggregation> for String {
    fn from(aggregation: Aggregation) -> Self {
        aggregation.as_str().to_string()
    }
}

/// Chart flavour handed to the renderer. Opaque to processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Doughnut,
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort key for table, list, alert and timeline widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Right-hand side of a filter: a single value or a set of accepted values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    OneOf(Vec<Value>),
    Equals(Value),
}

/// Field name to accepted value(s). Every entry must match for a record to pass.
pub type Filters = BTreeMap<String, FilterValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub value: f64,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSize {
    pub width: u32,
    pub height: u32,
}

impl WidgetSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WidgetPosition {
    pub x: i32,
    pub y: i32,
}

// =========================================================
// Widget Configuration
// =========================================================

/// Declarative description of one dashboard tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Stable across edits.
    pub id: String,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub data_source: DataSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
    /// Record field read by numeric aggregations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Vec<Threshold>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Polling interval in milliseconds, used by hosts only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval: Option<u64>,
    /// Body of a `text` widget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Action tag of a `button` widget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<WidgetSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<WidgetPosition>,
}

impl WidgetConfig {
    /// Bare config with every shaping option unset.
    pub fn new(
        id: impl Into<String>,
        widget_type: WidgetType,
        data_source: DataSource,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            widget_type,
            title: title.into(),
            subtitle: None,
            data_source,
            chart_type: None,
            aggregation: None,
            aggregation_field: None,
            group_by: None,
            sort_by: None,
            filters: None,
            colors: None,
            thresholds: None,
            limit: None,
            refresh_interval: None,
            content: None,
            action: None,
            size: None,
            position: None,
        }
    }
}

// =========================================================
// Processed Output
// =========================================================

/// Scalar headline of a widget: a number for data-driven tiles, text for
/// button and text tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidgetValue {
    Number(f64),
    Text(String),
}

impl WidgetValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            WidgetValue::Number(n) => Some(*n),
            WidgetValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            WidgetValue::Number(_) => None,
            WidgetValue::Text(s) => Some(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
    pub border_color: Vec<String>,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// Renderer-ready result of applying a [`WidgetConfig`] to system data.
///
/// Only the fields relevant to the widget type are populated; `None` means
/// the shape does not apply and serializes as an absent key, except
/// `chartData`, which is always written and is `null` outside charts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedWidgetData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<WidgetValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Value>>,
    #[serde(default)]
    pub chart_data: Option<ChartData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_data: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_data: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gauge_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl ProcessedWidgetData {
    /// Result used whenever the resolved source collection is absent or empty.
    pub fn empty_state(source: &DataSource) -> Self {
        Self {
            value: Some(WidgetValue::Number(0.0)),
            label: Some(format!("No {} data available", source)),
            items: Some(Vec::new()),
            chart_data: None,
            table_data: Some(Vec::new()),
            alert_data: Some(Vec::new()),
            progress_value: Some(0.0),
            gauge_value: Some(0.0),
            action: None,
        }
    }

    /// Numeric headline, if the widget produced one.
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.as_ref().and_then(WidgetValue::as_f64)
    }
}

// =========================================================
// Host Surface Records
// =========================================================

/// Widget as persisted by the production cockpit layout API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CockpitWidget {
    pub id: i64,
    #[serde(default)]
    pub layout_id: i64,
    /// Cockpit tag (`metrics`, `chart`, `alerts`, `schedule`, ...).
    #[serde(rename = "type")]
    pub widget_type: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
    #[serde(default)]
    pub position: WidgetPosition,
    #[serde(default)]
    pub configuration: Map<String, Value>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Widget as persisted by the session-scoped canvas API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasWidget {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub widget_type: String,
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default)]
    pub position: WidgetPosition,
    pub size: WidgetSize,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub created_by_max: bool,
}

fn default_visible() -> bool {
    true
}

// =========================================================
// Stored Widgets
// =========================================================

/// Surface a stored widget is published to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    Mobile,
    Desktop,
    #[default]
    Both,
}

impl TargetPlatform {
    /// Whether a widget targeting `self` is visible on `requested`.
    pub fn serves(&self, requested: TargetPlatform) -> bool {
        requested == TargetPlatform::Both || *self == TargetPlatform::Both || *self == requested
    }
}

impl std::str::FromStr for TargetPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mobile" => Ok(TargetPlatform::Mobile),
            "desktop" => Ok(TargetPlatform::Desktop),
            "both" => Ok(TargetPlatform::Both),
            _ => Err(format!("Unknown target platform: {}", s)),
        }
    }
}

/// Strongly-typed identifier for a stored widget.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StoredWidgetId(pub i64);

impl fmt::Display for StoredWidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Widget definition kept by the widget store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWidget {
    pub id: StoredWidgetId,
    pub target_platform: TargetPlatform,
    pub config: WidgetConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a stored widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStoredWidget {
    #[serde(default)]
    pub target_platform: TargetPlatform,
    pub config: WidgetConfig,
}

/// Partial update of a stored widget. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_platform: Option<TargetPlatform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<WidgetConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_widget_config_deserializes_camel_case() {
        let config: WidgetConfig = serde_json::from_value(json!({
            "id": "w1",
            "type": "chart",
            "title": "Orders by status",
            "dataSource": "productionOrders",
            "chartType": "pie",
            "groupBy": "status",
            "sortBy": { "field": "status", "direction": "desc" },
            "filters": { "status": ["open", "released"], "plant": "P1" },
            "limit": 5
        }))
        .unwrap();

        assert_eq!(config.widget_type, WidgetType::Chart);
        assert_eq!(config.data_source, DataSource::ProductionOrders);
        assert_eq!(config.chart_type, Some(ChartType::Pie));
        assert_eq!(config.sort_by.unwrap().direction, SortDirection::Desc);
        let filters = config.filters.unwrap();
        assert!(matches!(filters["status"], FilterValue::OneOf(ref v) if v.len() == 2));
        assert!(matches!(filters["plant"], FilterValue::Equals(_)));
        assert_eq!(config.limit, Some(5));
    }

    #[test]
    fn test_unknown_tags_are_preserved() {
        let config: WidgetConfig = serde_json::from_value(json!({
            "id": "w2",
            "type": "sparkline",
            "dataSource": "shipments"
        }))
        .unwrap();

        assert_eq!(config.widget_type, WidgetType::Other("sparkline".to_string()));
        assert_eq!(config.data_source, DataSource::Other("shipments".to_string()));

        let back = serde_json::to_value(&config).unwrap();
        assert_eq!(back["type"], "sparkline");
        assert_eq!(back["dataSource"], "shipments");
    }

    #[test]
    fn test_unknown_aggregation_falls_back_to_count() {
        let agg: Aggregation = serde_json::from_value(json!("median")).unwrap();
        assert_eq!(agg, Aggregation::Count);
        let agg: Aggregation = serde_json::from_value(json!("avg")).unwrap();
        assert_eq!(agg, Aggregation::Avg);
    }

    #[test]
    fn test_schedule_optimization_tag() {
        let t = WidgetType::from("schedule-optimization");
        assert_eq!(t, WidgetType::ScheduleOptimization);
        assert_eq!(t.to_string(), "schedule-optimization");
    }

    #[test]
    fn test_empty_state_shape() {
        let empty = ProcessedWidgetData::empty_state(&DataSource::Operations);
        assert_eq!(empty.numeric_value(), Some(0.0));
        assert_eq!(empty.label.as_deref(), Some("No operations data available"));
        assert_eq!(empty.items, Some(vec![]));
        assert!(empty.chart_data.is_none());
        assert_eq!(empty.table_data, Some(vec![]));
        assert_eq!(empty.alert_data, Some(vec![]));
        assert_eq!(empty.progress_value, Some(0.0));
        assert_eq!(empty.gauge_value, Some(0.0));
    }

    #[test]
    fn test_empty_state_serializes_null_chart_data() {
        let empty = ProcessedWidgetData::empty_state(&DataSource::Plants);
        let json = serde_json::to_value(&empty).unwrap();
        assert!(json.as_object().unwrap().contains_key("chartData"));
        assert!(json["chartData"].is_null());
        assert!(json.get("action").is_none());
    }

    #[test]
    fn test_target_platform_serves() {
        assert!(TargetPlatform::Both.serves(TargetPlatform::Mobile));
        assert!(TargetPlatform::Mobile.serves(TargetPlatform::Mobile));
        assert!(!TargetPlatform::Desktop.serves(TargetPlatform::Mobile));
        assert!(TargetPlatform::Desktop.serves(TargetPlatform::Both));
    }
}
