//! # API Module
//!
//! Public widget contract shared by every host surface (cockpit, analytics
//! canvas, dashboard). Hosts construct [`WidgetConfig`] values, hand them to
//! the processor in [`crate::services`], and paint the returned
//! [`ProcessedWidgetData`].
//!
//! ## Architecture
//!
//! - [`types`]: Widget configuration, tag enums, processed output and host record shapes
//! - [`conversions`]: Adapters between [`WidgetConfig`] and the cockpit/canvas records

pub mod conversions;
pub mod types;

pub use conversions::{
    convert_canvas_widget_to_universal, convert_cockpit_widget_to_universal,
    convert_universal_to_canvas_widget, convert_universal_to_cockpit_widget,
    map_cockpit_type_to_universal_type, map_universal_type_to_cockpit_type,
};
pub use types::*;
