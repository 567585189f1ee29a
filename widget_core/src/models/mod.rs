//! Domain data handed to the widget processor.

pub mod system_data;

pub use system_data::{ResolvedSource, SystemData};
