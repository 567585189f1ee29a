//! Conversions between [`WidgetConfig`] and the host-specific persisted shapes.
//!
//! The cockpit layout API and the canvas session API each store widgets in
//! their own record format. These functions translate in both directions.
//!
//! ## Conversion Strategy
//!
//! - Shaping options (`dataSource`, `aggregation`, `groupBy`, ...) live inside the
//!   record's free-form `configuration`/`config` object and are read key by key;
//!   a malformed option is dropped rather than failing the whole widget
//! - Cockpit records carry their own type vocabulary, bridged by
//!   [`map_cockpit_type_to_universal_type`] and its inverse
//! - Conversions are deterministic but not round-trip exact: the cockpit path
//!   always produces a `400x300` size because cockpit records carry no size

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::api::types::{
    CanvasWidget, CockpitWidget, DataSource, WidgetConfig, WidgetPosition, WidgetSize, WidgetType,
};

/// Size assigned to every widget converted from a cockpit record.
pub const COCKPIT_DEFAULT_SIZE: WidgetSize = WidgetSize::new(400, 300);

/// Size used for canvas records when the config has none.
pub const CANVAS_DEFAULT_SIZE: WidgetSize = WidgetSize::new(400, 300);

/// Keys of `WidgetConfig` that are stored as top-level record fields rather
/// than inside the configuration object.
const RECORD_LEVEL_KEYS: [&str; 6] = ["id", "type", "title", "subtitle", "size", "position"];

// =========================================================
// Type Tag Mapping
// =========================================================

/// Map a cockpit widget tag to the universal widget type.
pub fn map_cockpit_type_to_universal_type(cockpit_type: &str) -> WidgetType {
    match cockpit_type {
        "metrics" => WidgetType::Kpi,
        "chart" => WidgetType::Chart,
        "alerts" => WidgetType::Alert,
        "schedule" => WidgetType::Timeline,
        "resources" => WidgetType::Table,
        "production" => WidgetType::Progress,
        "kpi" => WidgetType::Kpi,
        "activity" => WidgetType::List,
        _ => WidgetType::Kpi,
    }
}

/// Map a universal widget type to the closest cockpit tag.
pub fn map_universal_type_to_cockpit_type(widget_type: &WidgetType) -> &'static str {
    match widget_type {
        WidgetType::Kpi => "kpi",
        WidgetType::Chart => "chart",
        WidgetType::Alert => "alerts",
        WidgetType::Timeline => "schedule",
        WidgetType::Table => "resources",
        WidgetType::Progress => "production",
        WidgetType::List => "activity",
        WidgetType::Gauge
        | WidgetType::Button
        | WidgetType::Text
        | WidgetType::ScheduleOptimization
        | WidgetType::Other(_) => "metrics",
    }
}

// =========================================================
// Cockpit
// =========================================================

/// Convert a cockpit layout widget into a universal config.
///
/// The resulting size is always [`COCKPIT_DEFAULT_SIZE`].
pub fn convert_cockpit_widget_to_universal(widget: &CockpitWidget) -> WidgetConfig {
    let mut config = config_from_options(
        widget.id.to_string(),
        map_cockpit_type_to_universal_type(&widget.widget_type),
        widget.title.clone(),
        &widget.configuration,
    );
    config.subtitle = widget.sub_title.clone();
    config.position = Some(widget.position);
    config.size = Some(COCKPIT_DEFAULT_SIZE);
    config
}

/// Convert a universal config into a cockpit layout widget for `layout_id`.
///
/// Non-numeric config ids map to `0`, which the layout API treats as a new record.
pub fn convert_universal_to_cockpit_widget(config: &WidgetConfig, layout_id: i64) -> CockpitWidget {
    CockpitWidget {
        id: config.id.parse().unwrap_or(0),
        layout_id,
        widget_type: map_universal_type_to_cockpit_type(&config.widget_type).to_string(),
        title: config.title.clone(),
        sub_title: config.subtitle.clone(),
        position: config.position.unwrap_or_default(),
        configuration: options_from_config(config),
        is_visible: true,
        created_at: None,
        updated_at: None,
    }
}

// =========================================================
// Canvas
// =========================================================

/// Convert a canvas session widget into a universal config. Size is kept.
pub fn convert_canvas_widget_to_universal(widget: &CanvasWidget) -> WidgetConfig {
    let mut config = config_from_options(
        widget.id.to_string(),
        WidgetType::from(widget.widget_type.as_str()),
        widget.title.clone(),
        &widget.config,
    );
    config.subtitle = option_field(&widget.config, "subtitle");
    config.position = Some(widget.position);
    config.size = Some(widget.size);
    config
}

/// Convert a universal config into a canvas session widget.
pub fn convert_universal_to_canvas_widget(config: &WidgetConfig) -> CanvasWidget {
    let mut options = options_from_config(config);
    if let Some(subtitle) = &config.subtitle {
        options.insert("subtitle".to_string(), Value::String(subtitle.clone()));
    }

    CanvasWidget {
        id: config.id.parse().unwrap_or(0),
        title: config.title.clone(),
        widget_type: config.widget_type.to_string(),
        config: options,
        position: config.position.unwrap_or(WidgetPosition::default()),
        size: config.size.unwrap_or(CANVAS_DEFAULT_SIZE),
        is_visible: true,
        created_by_max: false,
    }
}

// =========================================================
// Helpers
// =========================================================

fn option_field<T: DeserializeOwned>(options: &Map<String, Value>, key: &str) -> Option<T> {
    options
        .get(key)
        .filter(|v| !v.is_null())
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

fn config_from_options(
    id: String,
    widget_type: WidgetType,
    title: String,
    options: &Map<String, Value>,
) -> WidgetConfig {
    let data_source = option_field::<String>(options, "dataSource")
        .map(DataSource::from)
        .unwrap_or(DataSource::ProductionOrders);

    let mut config = WidgetConfig::new(id, widget_type, data_source, title);
    config.chart_type = option_field(options, "chartType");
    config.aggregation = option_field(options, "aggregation");
    config.aggregation_field = option_field(options, "aggregationField");
    config.group_by = option_field(options, "groupBy");
    config.sort_by = option_field(options, "sortBy");
    config.filters = option_field(options, "filters");
    config.colors = option_field(options, "colors");
    config.thresholds = option_field(options, "thresholds");
    config.limit = option_field(options, "limit");
    config.refresh_interval = option_field(options, "refreshInterval");
    config.content = option_field(options, "content");
    config.action = option_field(options, "action");
    config
}

fn options_from_config(config: &WidgetConfig) -> Map<String, Value> {
    let mut options = match serde_json::to_value(config) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    for key in RECORD_LEVEL_KEYS {
        options.remove(key);
    }
    options
}
