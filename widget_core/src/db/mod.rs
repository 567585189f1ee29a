//! Data-access module for widget data and widget definitions.
//!
//! This module provides abstractions for storage via the Repository pattern,
//! allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (CLI host, dashboard service)        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! │  - SystemDataRepository                                 │
//! │  - WidgetRepository                                     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!            ┌────────▼────────────────┐
//!            │  Local Repository       │
//!            │  (in-memory)            │
//!            └─────────────────────────┘
//! ```
//!
//! The module includes:
//! - `repository`: Trait definitions for data access
//! - `repositories::local`: In-memory implementation
//! - `factory`: Factory and builder for creating repository instances
//! - `repo_config`: TOML configuration for the engine

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repo_config::EngineConfig;
pub use repositories::LocalRepository;
pub use repository::{
    seed_default_widgets, FullRepository, RepositoryError, RepositoryResult,
    SystemDataRepository, WidgetRepository,
};
