use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::api::{
    convert_canvas_widget_to_universal, convert_cockpit_widget_to_universal, CanvasWidget,
    CockpitWidget, WidgetConfig,
};
use crate::models::SystemData;

/// Record shape a layout file was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSourceType {
    /// `WidgetConfig` objects
    Universal,
    /// Cockpit layout API records (`layout_id`, `configuration`)
    Cockpit,
    /// Canvas session API records (`config`, `size`)
    Canvas,
}

impl LayoutSourceType {
    /// Guess the record shape from the first entry of a layout.
    pub fn detect(first: Option<&Value>) -> Self {
        let Some(obj) = first.and_then(Value::as_object) else {
            return LayoutSourceType::Universal;
        };
        if obj.contains_key("configuration") || obj.contains_key("layout_id") {
            LayoutSourceType::Cockpit
        } else if obj.contains_key("config") {
            LayoutSourceType::Canvas
        } else {
            LayoutSourceType::Universal
        }
    }
}

/// Result of loading a widget layout
#[derive(Debug)]
pub struct LayoutLoadResult {
    pub widgets: Vec<WidgetConfig>,
    pub source_type: LayoutSourceType,
}

/// Deserialize with the JSON path of the failing field in the error.
fn from_json_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        let path = e.path().to_string();
        anyhow::anyhow!("{} (at {})", e.into_inner(), path)
    })
}

fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Loads `SystemData` snapshots.
pub struct SnapshotLoader;

impl SnapshotLoader {
    pub fn load_from_file(path: &Path) -> Result<SystemData> {
        let value = read_json(path)?;
        from_json_value(value)
            .with_context(|| format!("Failed to parse system data snapshot {}", path.display()))
    }

    pub fn load_from_str(json_str: &str) -> Result<SystemData> {
        let value: Value = serde_json::from_str(json_str).context("Invalid JSON snapshot")?;
        from_json_value(value).context("Failed to parse system data snapshot")
    }
}

/// Loads widget layouts in any of the three record shapes.
///
/// A layout is either a JSON array of widget records or an object with a
/// `widgets` array.
pub struct LayoutLoader;

impl LayoutLoader {
    pub fn load_from_file(path: &Path) -> Result<LayoutLoadResult> {
        let value = read_json(path)?;
        Self::load_from_value(value)
            .with_context(|| format!("Failed to load widget layout {}", path.display()))
    }

    pub fn load_from_str(json_str: &str) -> Result<LayoutLoadResult> {
        let value: Value = serde_json::from_str(json_str).context("Invalid JSON layout")?;
        Self::load_from_value(value)
    }

    pub fn load_from_value(value: Value) -> Result<LayoutLoadResult> {
        let entries = match value {
            Value::Array(entries) => entries,
            Value::Object(mut obj) => match obj.remove("widgets") {
                Some(Value::Array(entries)) => entries,
                _ => anyhow::bail!("Layout object has no 'widgets' array"),
            },
            other => anyhow::bail!("Layout must be an array or an object, got {}", other),
        };

        let source_type = LayoutSourceType::detect(entries.first());
        let widgets = match source_type {
            LayoutSourceType::Universal => {
                from_json_value::<Vec<WidgetConfig>>(Value::Array(entries))
                    .context("Failed to parse widget configs")?
            }
            LayoutSourceType::Cockpit => {
                from_json_value::<Vec<CockpitWidget>>(Value::Array(entries))
                    .context("Failed to parse cockpit widgets")?
                    .iter()
                    .map(convert_cockpit_widget_to_universal)
                    .collect()
            }
            LayoutSourceType::Canvas => {
                from_json_value::<Vec<CanvasWidget>>(Value::Array(entries))
                    .context("Failed to parse canvas widgets")?
                    .iter()
                    .map(convert_canvas_widget_to_universal)
                    .collect()
            }
        };

        Ok(LayoutLoadResult {
            widgets,
            source_type,
        })
    }
}
