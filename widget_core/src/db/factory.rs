//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use std::sync::Arc;

use log::info;

use super::repositories::LocalRepository;
use super::repository::{seed_default_widgets, RepositoryError, RepositoryResult};
use crate::models::SystemData;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepositoryType {
    /// In-memory repository
    #[default]
    Local,
}

impl std::str::FromStr for RepositoryType {
    type Err = String;

    /// Accepts "local" or "memory", case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```no_run
/// use widget_core::db::{RepositoryFactory, RepositoryType};
///
/// let repo = RepositoryFactory::create(RepositoryType::Local, None).unwrap();
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `system_data` - Optional snapshot to pre-load
    pub fn create(
        repo_type: RepositoryType,
        system_data: Option<SystemData>,
    ) -> RepositoryResult<Arc<LocalRepository>> {
        match repo_type {
            RepositoryType::Local => Ok(Arc::new(LocalRepository::with_system_data(
                system_data.unwrap_or_default(),
            ))),
        }
    }

    /// Create an empty in-memory repository.
    pub fn create_local() -> Arc<LocalRepository> {
        Arc::new(LocalRepository::new())
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```no_run
/// use widget_core::db::{RepositoryBuilder, RepositoryType};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repo = RepositoryBuilder::new()
///         .repository_type(RepositoryType::Local)
///         .seed_default_widgets(true)
///         .build()
///         .await?;
///
///     Ok(())
/// }
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    system_data: Option<SystemData>,
    seed_widgets: bool,
}

impl RepositoryBuilder {
    /// Create a new repository builder with default settings.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::Local,
            system_data: None,
            seed_widgets: false,
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Pre-load a data snapshot.
    pub fn system_data(mut self, system_data: SystemData) -> Self {
        self.system_data = Some(system_data);
        self
    }

    /// Populate the widget store from the template catalogue when empty.
    pub fn seed_default_widgets(mut self, seed: bool) -> Self {
        self.seed_widgets = seed;
        self
    }

    /// Parse the repository type from a configuration string.
    pub fn repository_type_str(mut self, repo_type: &str) -> Result<Self, RepositoryError> {
        self.repo_type = repo_type.parse::<RepositoryType>().map_err(|e| {
            RepositoryError::ConfigurationError(format!("Invalid repository type: {}", e))
        })?;
        Ok(self)
    }

    /// Build the repository instance.
    pub async fn build(self) -> RepositoryResult<Arc<LocalRepository>> {
        let repo = RepositoryFactory::create(self.repo_type, self.system_data)?;
        if self.seed_widgets {
            let seeded = seed_default_widgets(repo.as_ref()).await?;
            info!("Repository ready with {} seeded widgets", seeded);
        }
        Ok(repo)
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DataSource;
    use crate::db::repository::{SystemDataRepository, WidgetRepository};
    use serde_json::json;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!("local".parse::<RepositoryType>().unwrap(), RepositoryType::Local);
        assert_eq!("Memory".parse::<RepositoryType>().unwrap(), RepositoryType::Local);
        assert!("azure".parse::<RepositoryType>().is_err());
    }

    #[tokio::test]
    async fn test_create_local_repository() {
        let repo = RepositoryFactory::create_local();
        assert!(repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_create_with_snapshot() {
        let mut data = SystemData::new();
        data.set_collection(&DataSource::Users, vec![json!({ "name": "ana" })]);

        let repo = RepositoryFactory::create(RepositoryType::Local, Some(data)).unwrap();
        let users = repo.fetch_collection(&DataSource::Users).await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_builder_seeds_widgets() {
        let repo = RepositoryBuilder::new()
            .repository_type(RepositoryType::Local)
            .seed_default_widgets(true)
            .build()
            .await
            .unwrap();

        assert!(!repo.list_widgets(None).await.unwrap().is_empty());
    }

    #[test]
    fn test_builder_rejects_unknown_type() {
        let result = RepositoryBuilder::new().repository_type_str("postgres");
        assert!(matches!(result, Err(RepositoryError::ConfigurationError(_))));
    }
}
