//! Engine configuration file support.
//!
//! This module provides utilities for reading the widget engine configuration
//! from TOML configuration files.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::factory::RepositoryType;
use super::repository::RepositoryError;
use crate::api::TargetPlatform;

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "widget-engine.toml";

/// Engine configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

/// Where the system data snapshot comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

/// Dashboard rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSettings {
    #[serde(default)]
    pub layout_path: Option<PathBuf>,
    #[serde(default)]
    pub default_platform: TargetPlatform,
}

fn default_repo_type() -> String {
    "local".to_string()
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

impl EngineConfig {
    /// Load engine configuration from a TOML file.
    ///
    /// Relative `snapshot_path` and `layout_path` entries are resolved
    /// against the directory containing the file.
    ///
    /// # Returns
    /// * `Ok(EngineConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parse engine configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        let config: EngineConfig = toml::from_str(content).map_err(|e| {
            RepositoryError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load engine configuration from the default location.
    ///
    /// Searches for `widget-engine.toml` in:
    /// 1. Current directory
    /// 2. `widget_core/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("widget_core").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths.iter() {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Err(RepositoryError::ConfigurationError(format!(
            "No {} found in standard locations",
            CONFIG_FILE_NAME
        )))
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, RepositoryError> {
        self.repository.repo_type.parse::<RepositoryType>().map_err(|e| {
            RepositoryError::ConfigurationError(format!("Invalid repository type: {}", e))
        })
    }

    fn validate(&self) -> Result<(), RepositoryError> {
        self.repository_type().map(|_| ())
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut Option<PathBuf>| {
            if let Some(path) = p.as_mut() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        };
        resolve(&mut self.data.snapshot_path);
        resolve(&mut self.dashboard.layout_path);
    }
}
