//! Repository implementations module.
//!
//! - `local`: In-memory implementation for unit testing, local development
//!   and the CLI host

pub mod local;

pub use local::LocalRepository;
