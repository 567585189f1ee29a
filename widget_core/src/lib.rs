//! Widget configuration and data-processing engine.
//!
//! A host screen loads domain collections into a [`models::SystemData`] bag,
//! describes each dashboard tile with an [`api::WidgetConfig`] and runs it
//! through [`services::WidgetDataProcessor`] to get renderer-ready
//! [`api::ProcessedWidgetData`].
//!
//! # Modules
//!
//! - [`api`]: wire types and cockpit/canvas adapters
//! - [`models`]: the system data bag
//! - [`transformations`]: filtering, sorting, grouping and aggregation
//! - [`services`]: the processor, template catalogue and dashboard service
//! - [`db`]: repository traits, in-memory repository and configuration
//! - [`io`]: JSON loaders for snapshots and layouts

pub mod api;
pub mod db;
pub mod io;
pub mod models;
pub mod services;
pub mod transformations;
