//! Dashboard rendering service.
//!
//! Fetches one `SystemData` snapshot from a repository and runs every widget
//! of a layout through a single [`WidgetDataProcessor`].

use log::info;
use serde::{Deserialize, Serialize};

use super::widget_processor::WidgetDataProcessor;
use crate::api::{ChartType, ProcessedWidgetData, TargetPlatform, WidgetConfig, WidgetType};
use crate::db::repository::{FullRepository, RepositoryResult, SystemDataRepository};
use crate::models::SystemData;

/// One processed tile of a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedWidget {
    pub id: String,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    /// `None` when processing failed; hosts show a "no data" placeholder.
    pub data: Option<ProcessedWidgetData>,
}

/// A processed layout, in layout order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRender {
    pub widgets: Vec<RenderedWidget>,
    pub rendered: usize,
    pub empty: usize,
}

/// Process every widget of `layout` against an in-memory snapshot.
pub fn render_layout(data: &SystemData, layout: &[WidgetConfig]) -> DashboardRender {
    let processor = WidgetDataProcessor::new(data);
    let widgets: Vec<RenderedWidget> = layout
        .iter()
        .map(|config| RenderedWidget {
            id: config.id.clone(),
            widget_type: config.widget_type.clone(),
            chart_type: config.chart_type,
            data: processor.process_widget_data(config),
        })
        .collect();

    let rendered = widgets.iter().filter(|w| w.data.is_some()).count();
    DashboardRender {
        empty: widgets.len() - rendered,
        rendered,
        widgets,
    }
}

/// Fetch the current snapshot and render `layout` over it.
pub async fn render_dashboard<R>(
    repo: &R,
    layout: &[WidgetConfig],
) -> RepositoryResult<DashboardRender>
where
    R: SystemDataRepository + ?Sized,
{
    let data = repo.fetch_system_data().await?;
    let render = render_layout(&data, layout);
    info!(
        "Rendered dashboard: {} widgets, {} with data, {} without",
        render.widgets.len(),
        render.rendered,
        render.empty
    );
    Ok(render)
}

/// Render every stored widget visible on `platform`.
pub async fn render_stored_widgets<R>(
    repo: &R,
    platform: TargetPlatform,
) -> RepositoryResult<DashboardRender>
where
    R: FullRepository + ?Sized,
{
    let layout: Vec<WidgetConfig> = repo
        .list_widgets(Some(platform))
        .await?
        .into_iter()
        .map(|w| w.config)
        .collect();
    info!("Rendering {} stored widgets for {:?}", layout.len(), platform);
    render_dashboard(repo, &layout).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DataSource;
    use serde_json::json;

    #[test]
    fn test_render_layout_counts() {
        let mut data = SystemData::new();
        data.set_collection(&DataSource::Operations, vec![json!({ "status": "active" })]);

        let layout = vec![
            WidgetConfig::new("a", WidgetType::Kpi, DataSource::Operations, "Ops"),
            WidgetConfig::new("b", WidgetType::from("sparkline"), DataSource::Operations, "?"),
            WidgetConfig::new("c", WidgetType::Table, DataSource::Users, "Users"),
        ];

        let render = render_layout(&data, &layout);
        let ids: Vec<&str> = render.widgets.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(render.rendered, 2);
        assert_eq!(render.empty, 1);
        assert!(render.widgets[1].data.is_none());
    }

    #[test]
    fn test_render_empty_layout() {
        let render = render_layout(&SystemData::new(), &[]);
        assert_eq!(render, DashboardRender::default());
    }
}
