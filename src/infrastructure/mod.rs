//! Infrastructure layer: reading and writing hierarchy files
//!
//! This layer owns all file I/O around the engine.

pub mod error;
pub mod loader;

pub use error::{InfraError, InfraResult};
pub use loader::{load_hierarchy, parse_hierarchy, sample_organization, to_toml};
