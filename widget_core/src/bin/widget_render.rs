//! Widget Render Binary
//!
//! Loads a system data snapshot and a widget layout, processes every widget
//! and prints the rendered dashboard as JSON on stdout.
//!
//! # Usage
//!
//! ```bash
//! # Render a layout over a snapshot
//! cargo run --bin widget-render -- snapshot.json layout.json
//!
//! # Render the built-in template widgets over a snapshot
//! cargo run --bin widget-render -- snapshot.json
//! ```
//!
//! # Environment Variables
//!
//! - `WIDGET_ENGINE_CONFIG`: Path to a `widget-engine.toml` (default: searched)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use widget_core::db::{EngineConfig, RepositoryBuilder};
use widget_core::io::{LayoutLoader, SnapshotLoader};
use widget_core::models::SystemData;
use widget_core::services::{render_dashboard, render_stored_widgets};

fn load_config() -> anyhow::Result<EngineConfig> {
    if let Ok(path) = env::var("WIDGET_ENGINE_CONFIG") {
        return EngineConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path));
    }
    match EngineConfig::from_default_location() {
        Ok(config) => Ok(config),
        Err(e) => {
            info!("{}; using defaults", e);
            Ok(EngineConfig::default())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config()?;

    // Positional args override the configured paths
    let mut args = env::args().skip(1);
    if let Some(snapshot) = args.next() {
        config.data.snapshot_path = Some(PathBuf::from(snapshot));
    }
    if let Some(layout) = args.next() {
        config.dashboard.layout_path = Some(PathBuf::from(layout));
    }

    let system_data = match &config.data.snapshot_path {
        Some(path) => {
            let data = SnapshotLoader::load_from_file(path)?;
            for (source, count) in data.summary() {
                info!("Loaded {} {} entries", count, source);
            }
            data
        }
        None => {
            warn!("No snapshot given; every widget will render its empty state");
            SystemData::default()
        }
    };

    let repo = RepositoryBuilder::new()
        .repository_type(config.repository_type()?)
        .system_data(system_data)
        .seed_default_widgets(config.dashboard.layout_path.is_none())
        .build()
        .await?;
    info!("Repository initialized successfully");

    let render = match &config.dashboard.layout_path {
        Some(path) => {
            let layout = LayoutLoader::load_from_file(path)?;
            info!(
                "Loaded {} widgets ({:?} layout)",
                layout.widgets.len(),
                layout.source_type
            );
            render_dashboard(repo.as_ref(), &layout.widgets).await?
        }
        None => render_stored_widgets(repo.as_ref(), config.dashboard.default_platform).await?,
    };

    println!("{}", serde_json::to_string_pretty(&render)?);
    Ok(())
}
