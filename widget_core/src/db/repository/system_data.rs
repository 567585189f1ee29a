//! Repository trait for the domain collections a dashboard reads.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::error::RepositoryResult;
use crate::api::DataSource;
use crate::models::SystemData;

/// Source of the domain collections fed to the widget processor.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait SystemDataRepository: Send + Sync {
    /// Check if the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Snapshot every collection currently held.
    async fn fetch_system_data(&self) -> RepositoryResult<SystemData>;

    /// Records of one array-valued source.
    ///
    /// # Returns
    /// * `Ok(Vec<Value>)` - The records, empty when the source was never loaded
    /// * `Err(RepositoryError::ValidationError)` - For `metrics` or unknown sources
    async fn fetch_collection(&self, source: &DataSource) -> RepositoryResult<Vec<Value>>;

    /// Replace the records of one array-valued source.
    ///
    /// # Returns
    /// * `Err(RepositoryError::ValidationError)` - For `metrics` or unknown sources
    async fn replace_collection(
        &self,
        source: &DataSource,
        records: Vec<Value>,
    ) -> RepositoryResult<()>;

    /// Replace the flat metrics map.
    async fn replace_metrics(&self, metrics: Map<String, Value>) -> RepositoryResult<()>;
}
