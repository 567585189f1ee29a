//! Service layer for widget processing and orchestration.
//!
//! This module sits between the data-access layer and the host surfaces:
//! - `widget_processor`: maps a widget config over system data
//! - `templates`: built-in widget presets
//! - `dashboard`: renders whole layouts from a repository

pub mod dashboard;
pub mod templates;
pub mod widget_processor;

pub use dashboard::{
    render_dashboard, render_layout, render_stored_widgets, DashboardRender, RenderedWidget,
};
pub use templates::{
    create_widget_from_template, find_template, templates_by_category, widget_templates,
    TemplateCategory, TemplateComplexity, TemplateError, WidgetDefaults, WidgetTemplate,
};
pub use widget_processor::{
    process_widget_data, ProcessingError, ProcessingResult, WidgetDataProcessor,
    DEFAULT_CHART_COLORS,
};
