//! Repository trait for stored widget definitions.

use async_trait::async_trait;
use log::info;

use super::error::RepositoryResult;
use crate::api::{
    NewStoredWidget, StoredWidget, StoredWidgetId, TargetPlatform, WidgetConfig, WidgetUpdate,
};
use crate::services::templates::widget_templates;

/// CRUD operations over persisted widget definitions.
#[async_trait]
pub trait WidgetRepository: Send + Sync {
    /// Store a new widget, assigning its id and timestamps.
    async fn create_widget(&self, widget: NewStoredWidget) -> RepositoryResult<StoredWidget>;

    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no widget has this id
    async fn get_widget(&self, id: StoredWidgetId) -> RepositoryResult<StoredWidget>;

    /// List widgets in id order, optionally restricted to those visible on
    /// `platform`. `None` and [`TargetPlatform::Both`] list everything.
    async fn list_widgets(
        &self,
        platform: Option<TargetPlatform>,
    ) -> RepositoryResult<Vec<StoredWidget>>;

    /// Apply a partial update and bump `updated_at`.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no widget has this id
    async fn update_widget(
        &self,
        id: StoredWidgetId,
        update: WidgetUpdate,
    ) -> RepositoryResult<StoredWidget>;

    /// Delete a widget. Returns whether it existed.
    async fn delete_widget(&self, id: StoredWidgetId) -> RepositoryResult<bool>;
}

/// Populate an empty widget store with one widget per built-in template.
///
/// Does nothing when the store already holds widgets. Returns the number of
/// widgets created.
pub async fn seed_default_widgets<R>(repo: &R) -> RepositoryResult<usize>
where
    R: WidgetRepository + ?Sized,
{
    if !repo.list_widgets(None).await?.is_empty() {
        return Ok(0);
    }

    let templates = widget_templates();
    for template in templates {
        let config = WidgetConfig::from_template(template, template.id.clone());
        repo.create_widget(NewStoredWidget {
            target_platform: TargetPlatform::Both,
            config,
        })
        .await?;
    }

    info!("Seeded {} default widgets", templates.len());
    Ok(templates.len())
}
