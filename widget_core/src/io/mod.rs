//! High-level data loading utilities.
//!
//! Loaders read `SystemData` snapshots and widget layouts from JSON, attach
//! file and field-path context to failures, and normalize cockpit and canvas
//! layouts into `WidgetConfig`s.
//!
//! # Example
//!
//! ```no_run
//! use widget_core::io::loaders::{LayoutLoader, SnapshotLoader};
//! use std::path::Path;
//!
//! let data = SnapshotLoader::load_from_file(Path::new("snapshot.json"))
//!     .expect("Failed to load snapshot");
//! let layout = LayoutLoader::load_from_file(Path::new("layout.json"))
//!     .expect("Failed to load layout");
//! println!("Loaded {} widgets", layout.widgets.len());
//! ```

pub mod loaders;

#[cfg(test)]
mod loaders_tests;

pub use loaders::{LayoutLoadResult, LayoutLoader, LayoutSourceType, SnapshotLoader};
