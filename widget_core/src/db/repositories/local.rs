//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing, local development and the CLI host. All data is
//! stored in memory, providing fast, deterministic, and isolated execution.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::api::{
    DataSource, NewStoredWidget, StoredWidget, StoredWidgetId, TargetPlatform, WidgetUpdate,
};
use crate::db::repository::*;
use crate::models::SystemData;

/// In-memory local repository.
///
/// Cloning is cheap and every clone shares the same underlying store.
///
/// # Example
/// ```
/// use widget_core::db::repositories::LocalRepository;
/// use widget_core::db::repository::SystemDataRepository;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let repo = LocalRepository::new();
/// let data = repo.fetch_system_data().await.unwrap();
/// assert!(data.summary().is_empty());
/// # }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    system_data: SystemData,
    widgets: BTreeMap<StoredWidgetId, StoredWidget>,

    // ID counter
    next_widget_id: StoredWidgetId,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            system_data: SystemData::default(),
            widgets: BTreeMap::new(),
            next_widget_id: StoredWidgetId(1),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::with_system_data(SystemData::default())
    }

    /// Create a repository pre-loaded with a data snapshot.
    pub fn with_system_data(system_data: SystemData) -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                system_data,
                ..Default::default()
            })),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        if let Ok(mut data) = self.data.write() {
            data.is_healthy = healthy;
        }
    }

    /// Clear all data from the repository.
    pub fn clear(&self) -> RepositoryResult<()> {
        let mut data = self.data.write().map_err(RepositoryError::poisoned)?;
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
        Ok(())
    }

    /// Get the number of widgets stored.
    pub fn widget_count(&self) -> RepositoryResult<usize> {
        Ok(self
            .data
            .read()
            .map_err(RepositoryError::poisoned)?
            .widgets
            .len())
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        let data = self.data.read().map_err(RepositoryError::poisoned)?;
        if !data.is_healthy {
            return Err(RepositoryError::ConnectionError(
                "Repository is not healthy".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn unsupported_source(source: &DataSource) -> RepositoryError {
    RepositoryError::ValidationError(format!("'{}' is not a record collection", source))
}

fn widget_not_found(id: StoredWidgetId) -> RepositoryError {
    RepositoryError::NotFound(format!("Widget {} not found", id))
}

#[async_trait]
impl SystemDataRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read().map_err(RepositoryError::poisoned)?;
        Ok(data.is_healthy)
    }

    async fn fetch_system_data(&self) -> RepositoryResult<SystemData> {
        self.check_health()?;
        let data = self.data.read().map_err(RepositoryError::poisoned)?;
        Ok(data.system_data.clone())
    }

    async fn fetch_collection(&self, source: &DataSource) -> RepositoryResult<Vec<Value>> {
        self.check_health()?;
        if matches!(source, DataSource::Metrics | DataSource::Other(_)) {
            return Err(unsupported_source(source));
        }
        let data = self.data.read().map_err(RepositoryError::poisoned)?;
        Ok(data
            .system_data
            .collection(source)
            .map(<[Value]>::to_vec)
            .unwrap_or_default())
    }

    async fn replace_collection(
        &self,
        source: &DataSource,
        records: Vec<Value>,
    ) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write().map_err(RepositoryError::poisoned)?;
        if !data.system_data.set_collection(source, records) {
            return Err(unsupported_source(source));
        }
        Ok(())
    }

    async fn replace_metrics(&self, metrics: Map<String, Value>) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write().map_err(RepositoryError::poisoned)?;
        data.system_data.set_metrics(metrics);
        Ok(())
    }
}

#[async_trait]
impl WidgetRepository for LocalRepository {
    async fn create_widget(&self, widget: NewStoredWidget) -> RepositoryResult<StoredWidget> {
        self.check_health()?;
        if widget.config.id.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "Widget config id must not be empty".to_string(),
            ));
        }

        let mut data = self.data.write().map_err(RepositoryError::poisoned)?;
        let id = data.next_widget_id;
        data.next_widget_id = StoredWidgetId(id.0 + 1);

        let now = Utc::now();
        let stored = StoredWidget {
            id,
            target_platform: widget.target_platform,
            config: widget.config,
            created_at: now,
            updated_at: now,
        };
        data.widgets.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_widget(&self, id: StoredWidgetId) -> RepositoryResult<StoredWidget> {
        self.check_health()?;
        let data = self.data.read().map_err(RepositoryError::poisoned)?;
        data.widgets
            .get(&id)
            .cloned()
            .ok_or_else(|| widget_not_found(id))
    }

    async fn list_widgets(
        &self,
        platform: Option<TargetPlatform>,
    ) -> RepositoryResult<Vec<StoredWidget>> {
        self.check_health()?;
        let data = self.data.read().map_err(RepositoryError::poisoned)?;
        let requested = platform.unwrap_or_default();
        Ok(data
            .widgets
            .values()
            .filter(|w| w.target_platform.serves(requested))
            .cloned()
            .collect())
    }

    async fn update_widget(
        &self,
        id: StoredWidgetId,
        update: WidgetUpdate,
    ) -> RepositoryResult<StoredWidget> {
        self.check_health()?;
        let mut data = self.data.write().map_err(RepositoryError::poisoned)?;
        let widget = data.widgets.get_mut(&id).ok_or_else(|| widget_not_found(id))?;

        if let Some(platform) = update.target_platform {
            widget.target_platform = platform;
        }
        if let Some(config) = update.config {
            widget.config = config;
        }
        widget.updated_at = Utc::now();
        Ok(widget.clone())
    }

    async fn delete_widget(&self, id: StoredWidgetId) -> RepositoryResult<bool> {
        self.check_health()?;
        let mut data = self.data.write().map_err(RepositoryError::poisoned)?;
        Ok(data.widgets.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{WidgetConfig, WidgetType};
    use serde_json::json;

    fn new_widget(id: &str, platform: TargetPlatform) -> NewStoredWidget {
        NewStoredWidget {
            target_platform: platform,
            config: WidgetConfig::new(id, WidgetType::Kpi, DataSource::ProductionOrders, id),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());

        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
        assert!(matches!(
            repo.fetch_system_data().await,
            Err(RepositoryError::ConnectionError(_))
        ));
    }

    #[tokio::test]
    async fn test_replace_and_fetch_collection() {
        let repo = LocalRepository::new();
        repo.replace_collection(&DataSource::Plants, vec![json!({ "id": "P1" })])
            .await
            .unwrap();

        let plants = repo.fetch_collection(&DataSource::Plants).await.unwrap();
        assert_eq!(plants, vec![json!({ "id": "P1" })]);
        assert!(repo
            .fetch_collection(&DataSource::Vendors)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_metrics_is_not_a_collection() {
        let repo = LocalRepository::new();
        assert!(matches!(
            repo.replace_collection(&DataSource::Metrics, vec![]).await,
            Err(RepositoryError::ValidationError(_))
        ));
        assert!(matches!(
            repo.fetch_collection(&DataSource::Metrics).await,
            Err(RepositoryError::ValidationError(_))
        ));

        repo.replace_metrics(json!({ "oee": 80 }).as_object().cloned().unwrap())
            .await
            .unwrap();
        let data = repo.fetch_system_data().await.unwrap();
        assert_eq!(data.metrics.unwrap()["oee"], 80);
    }

    #[tokio::test]
    async fn test_create_and_get_widget() {
        let repo = LocalRepository::new();
        let first = repo
            .create_widget(new_widget("a", TargetPlatform::Both))
            .await
            .unwrap();
        let second = repo
            .create_widget(new_widget("b", TargetPlatform::Mobile))
            .await
            .unwrap();

        assert_eq!(first.id, StoredWidgetId(1));
        assert_eq!(second.id, StoredWidgetId(2));
        assert_eq!(first.created_at, first.updated_at);

        let fetched = repo.get_widget(second.id).await.unwrap();
        assert_eq!(fetched.config.id, "b");
        assert!(matches!(
            repo.get_widget(StoredWidgetId(99)).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_id() {
        let repo = LocalRepository::new();
        assert!(matches!(
            repo.create_widget(new_widget("  ", TargetPlatform::Both)).await,
            Err(RepositoryError::ValidationError(_))
        ));
        assert_eq!(repo.widget_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_widgets_by_platform() {
        let repo = LocalRepository::new();
        for (id, platform) in [
            ("both", TargetPlatform::Both),
            ("mobile", TargetPlatform::Mobile),
            ("desktop", TargetPlatform::Desktop),
        ] {
            repo.create_widget(new_widget(id, platform)).await.unwrap();
        }

        let ids = |widgets: Vec<StoredWidget>| -> Vec<String> {
            widgets.into_iter().map(|w| w.config.id).collect()
        };
        assert_eq!(
            ids(repo.list_widgets(Some(TargetPlatform::Mobile)).await.unwrap()),
            vec!["both", "mobile"]
        );
        assert_eq!(
            ids(repo.list_widgets(Some(TargetPlatform::Desktop)).await.unwrap()),
            vec!["both", "desktop"]
        );
        assert_eq!(repo.list_widgets(None).await.unwrap().len(), 3);
        assert_eq!(
            repo.list_widgets(Some(TargetPlatform::Both))
                .await
                .unwrap()
                .len(),
            3
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_widget() {
        let repo = LocalRepository::new();
        let created = repo
            .create_widget(new_widget("a", TargetPlatform::Both))
            .await
            .unwrap();

        let mut config = created.config.clone();
        config.title = "Renamed".to_string();
        let updated = repo
            .update_widget(
                created.id,
                WidgetUpdate {
                    target_platform: Some(TargetPlatform::Desktop),
                    config: Some(config),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.config.title, "Renamed");
        assert_eq!(updated.target_platform, TargetPlatform::Desktop);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        assert!(repo.delete_widget(created.id).await.unwrap());
        assert!(!repo.delete_widget(created.id).await.unwrap());
        assert!(matches!(
            repo.update_widget(created.id, WidgetUpdate::default()).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_clear_keeps_health() {
        let repo = LocalRepository::new();
        repo.create_widget(new_widget("a", TargetPlatform::Both))
            .await
            .unwrap();
        repo.set_healthy(false);
        repo.clear().unwrap();
        assert_eq!(repo.widget_count().unwrap(), 0);
        assert!(!repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_seed_default_widgets_only_once() {
        let repo = LocalRepository::new();
        let created = seed_default_widgets(&repo).await.unwrap();
        assert!(created > 0);
        assert_eq!(repo.widget_count().unwrap(), created);

        assert_eq!(seed_default_widgets(&repo).await.unwrap(), 0);
        assert_eq!(repo.widget_count().unwrap(), created);
    }
}
