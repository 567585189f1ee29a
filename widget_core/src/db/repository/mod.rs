//! Repository trait definitions for widget data access.
//!
//! The widget engine reads domain collections and stores widget definitions
//! through two focused traits:
//!
//! - [`error`]: Error types for repository operations
//! - [`system_data`]: Domain collections consumed by the processor
//! - [`widgets`]: CRUD for stored widget definitions
//!
//! # Convenience Trait Bound
//!
//! Services that need both capabilities take a [`FullRepository`]:
//!
//! ```ignore
//! async fn render<R: FullRepository>(repo: &R) -> RepositoryResult<()> {
//!     let data = repo.fetch_system_data().await?;
//!     let widgets = repo.list_widgets(None).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod system_data;
pub mod widgets;

pub use error::{RepositoryError, RepositoryResult};

pub use system_data::SystemDataRepository;
pub use widgets::{seed_default_widgets, WidgetRepository};

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: SystemDataRepository + WidgetRepository {}

// Blanket implementation: any type implementing both traits is a FullRepository
impl<T> FullRepository for T where T: SystemDataRepository + WidgetRepository {}
