//! Domain layer: the hierarchy engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod entities;
pub mod error;
pub mod hierarchy;
pub mod history;
pub mod registry;

pub use arena::{NodeData, TreeArena, TreeNode};
pub use entities::{Employee, EmployeeId, Transition};
pub use error::{DomainError, DomainResult, InvalidMoveReason};
pub use hierarchy::{EmployeeRef, Hierarchy};
pub use history::History;
pub use registry::Registry;
