//! Built-in widget template catalogue.
//!
//! Templates are static presets used to seed a new [`WidgetConfig`]. The
//! catalogue is built once on first access and never mutated.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::{
    Aggregation, ChartType, DataSource, Filters, SortDirection, SortSpec, Threshold, WidgetConfig,
    WidgetSize, WidgetType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Production,
    Operations,
    Resources,
    Quality,
    Alerts,
    Analytics,
    Actions,
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TemplateCategory::Production => "production",
            TemplateCategory::Operations => "operations",
            TemplateCategory::Resources => "resources",
            TemplateCategory::Quality => "quality",
            TemplateCategory::Alerts => "alerts",
            TemplateCategory::Analytics => "analytics",
            TemplateCategory::Actions => "actions",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateComplexity {
    Simple,
    Moderate,
    Advanced,
}

/// Partial widget config carried by a template. Unset fields fall back to
/// the defaults applied by [`WidgetConfig::from_template`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDefaults {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub widget_type: Option<WidgetType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<Vec<Threshold>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<WidgetSize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: TemplateCategory,
    pub complexity: TemplateComplexity,
    pub default_config: WidgetDefaults,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("Unknown widget template: {0}")]
    UnknownTemplate(String),
}

impl WidgetConfig {
    /// Seed a config from a template.
    ///
    /// A missing type defaults to `kpi`, a missing data source to
    /// `productionOrders` and a missing title to the template name.
    pub fn from_template(template: &WidgetTemplate, id: impl Into<String>) -> Self {
        let defaults = template.default_config.clone();
        let mut config = WidgetConfig::new(
            id,
            defaults.widget_type.unwrap_or(WidgetType::Kpi),
            defaults.data_source.unwrap_or(DataSource::ProductionOrders),
            defaults.title.unwrap_or_else(|| template.name.clone()),
        );
        config.subtitle = defaults.subtitle;
        config.chart_type = defaults.chart_type;
        config.aggregation = defaults.aggregation;
        config.aggregation_field = defaults.aggregation_field;
        config.group_by = defaults.group_by;
        config.sort_by = defaults.sort_by;
        config.filters = defaults.filters;
        config.thresholds = defaults.thresholds;
        config.limit = defaults.limit;
        config.content = defaults.content;
        config.action = defaults.action;
        config.size = defaults.size;
        config
    }
}

fn filters(value: Value) -> Option<Filters> {
    serde_json::from_value(value).ok()
}

fn threshold(value: f64, color: &str, label: &str) -> Threshold {
    Threshold {
        value,
        color: color.to_string(),
        label: Some(label.to_string()),
    }
}

fn template(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    category: TemplateCategory,
    complexity: TemplateComplexity,
    default_config: WidgetDefaults,
) -> WidgetTemplate {
    WidgetTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        category,
        complexity,
        default_config,
    }
}

static TEMPLATES: Lazy<Vec<WidgetTemplate>> = Lazy::new(|| {
    use TemplateCategory::*;
    use TemplateComplexity::*;

    vec![
        template(
            "active-orders-kpi",
            "Active Production Orders",
            "Count of released and in-progress production orders",
            "package",
            Production,
            Simple,
            WidgetDefaults {
                widget_type: Some(WidgetType::Kpi),
                data_source: Some(DataSource::ProductionOrders),
                aggregation: Some(Aggregation::Count),
                filters: filters(json!({ "status": ["released", "in-progress"] })),
                ..Default::default()
            },
        ),
        template(
            "orders-by-status-chart",
            "Orders by Status",
            "Production orders grouped by status",
            "pie-chart",
            Production,
            Simple,
            WidgetDefaults {
                widget_type: Some(WidgetType::Chart),
                data_source: Some(DataSource::ProductionOrders),
                chart_type: Some(ChartType::Pie),
                aggregation: Some(Aggregation::Count),
                group_by: Some("status".to_string()),
                ..Default::default()
            },
        ),
        template(
            "recent-orders-table",
            "Recent Orders",
            "Latest production orders",
            "table",
            Production,
            Simple,
            WidgetDefaults {
                widget_type: Some(WidgetType::Table),
                data_source: Some(DataSource::ProductionOrders),
                sort_by: Some(SortSpec::new("created_at", SortDirection::Desc)),
                limit: Some(10),
                size: Some(WidgetSize::new(600, 400)),
                ..Default::default()
            },
        ),
        template(
            "high-priority-orders-list",
            "High Priority Orders",
            "Production orders flagged high or critical",
            "list",
            Production,
            Simple,
            WidgetDefaults {
                widget_type: Some(WidgetType::List),
                data_source: Some(DataSource::ProductionOrders),
                filters: filters(json!({ "priority": ["high", "critical"] })),
                limit: Some(8),
                ..Default::default()
            },
        ),
        template(
            "operations-progress",
            "Operations Completion",
            "Average completion percentage across operations",
            "activity",
            Operations,
            Moderate,
            WidgetDefaults {
                widget_type: Some(WidgetType::Progress),
                data_source: Some(DataSource::Operations),
                aggregation: Some(Aggregation::Avg),
                aggregation_field: Some("percent_complete".to_string()),
                ..Default::default()
            },
        ),
        template(
            "operations-by-resource-chart",
            "Operations by Resource",
            "Operation count per assigned resource",
            "bar-chart",
            Operations,
            Moderate,
            WidgetDefaults {
                widget_type: Some(WidgetType::Chart),
                data_source: Some(DataSource::Operations),
                chart_type: Some(ChartType::Bar),
                aggregation: Some(Aggregation::Count),
                group_by: Some("assignedResource".to_string()),
                ..Default::default()
            },
        ),
        template(
            "planned-orders-timeline",
            "Planned Orders Timeline",
            "Planned orders in scheduled order",
            "calendar",
            Operations,
            Moderate,
            WidgetDefaults {
                widget_type: Some(WidgetType::Timeline),
                data_source: Some(DataSource::PlannedOrders),
                size: Some(WidgetSize::new(800, 300)),
                ..Default::default()
            },
        ),
        template(
            "resource-utilization-gauge",
            "Resource Utilization",
            "Average utilization across resources",
            "gauge",
            Resources,
            Moderate,
            WidgetDefaults {
                widget_type: Some(WidgetType::Gauge),
                data_source: Some(DataSource::Resources),
                aggregation: Some(Aggregation::Avg),
                group_by: Some("utilization".to_string()),
                thresholds: Some(vec![
                    threshold(60.0, "#10b981", "Normal"),
                    threshold(85.0, "#f59e0b", "High"),
                    threshold(95.0, "#ef4444", "Overloaded"),
                ]),
                ..Default::default()
            },
        ),
        template(
            "oee-kpi",
            "Overall Equipment Effectiveness",
            "OEE from plant metrics",
            "target",
            Quality,
            Simple,
            WidgetDefaults {
                widget_type: Some(WidgetType::Kpi),
                data_source: Some(DataSource::Metrics),
                group_by: Some("oee".to_string()),
                ..Default::default()
            },
        ),
        template(
            "critical-alerts",
            "Critical Alerts",
            "Newest critical and high severity alerts",
            "alert-triangle",
            Alerts,
            Simple,
            WidgetDefaults {
                widget_type: Some(WidgetType::Alert),
                data_source: Some(DataSource::Alerts),
                filters: filters(json!({ "severity": ["critical", "high"] })),
                limit: Some(5),
                ..Default::default()
            },
        ),
        template(
            "order-quantity-trend",
            "Order Quantity by Due Date",
            "Total ordered quantity per due date",
            "trending-up",
            Analytics,
            Advanced,
            WidgetDefaults {
                widget_type: Some(WidgetType::Chart),
                data_source: Some(DataSource::ProductionOrders),
                chart_type: Some(ChartType::Line),
                aggregation: Some(Aggregation::Sum),
                aggregation_field: Some("quantity".to_string()),
                group_by: Some("due_date".to_string()),
                size: Some(WidgetSize::new(800, 300)),
                ..Default::default()
            },
        ),
        template(
            "run-optimizer-button",
            "Run Optimizer",
            "Trigger a schedule optimization run",
            "play",
            Actions,
            Simple,
            WidgetDefaults {
                widget_type: Some(WidgetType::Button),
                data_source: Some(DataSource::Optimization),
                subtitle: Some("Optimize the current schedule".to_string()),
                action: Some("optimize-schedule".to_string()),
                size: Some(WidgetSize::new(200, 100)),
                ..Default::default()
            },
        ),
        template(
            "notes-text",
            "Notes",
            "Free-form text block",
            "file-text",
            Actions,
            Simple,
            WidgetDefaults {
                widget_type: Some(WidgetType::Text),
                data_source: Some(DataSource::ProductionOrders),
                content: Some("Add your content here...".to_string()),
                ..Default::default()
            },
        ),
    ]
});

/// Every built-in template, in catalogue order.
pub fn widget_templates() -> &'static [WidgetTemplate] {
    &TEMPLATES
}

pub fn find_template(id: &str) -> Option<&'static WidgetTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

pub fn templates_by_category(category: TemplateCategory) -> Vec<&'static WidgetTemplate> {
    TEMPLATES.iter().filter(|t| t.category == category).collect()
}

/// Build a config for `widget_id` from the template named `template_id`.
pub fn create_widget_from_template(
    template_id: &str,
    widget_id: impl Into<String>,
) -> Result<WidgetConfig, TemplateError> {
    find_template(template_id)
        .map(|template| WidgetConfig::from_template(template, widget_id))
        .ok_or_else(|| TemplateError::UnknownTemplate(template_id.to_string()))
}
