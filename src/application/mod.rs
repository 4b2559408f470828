//! Application layer: command sessions and rendering
//!
//! This layer drives the domain engine and presents its state.

pub mod error;
pub mod render;
pub mod session;

pub use error::{ApplicationError, ApplicationResult};
pub use render::{history_lines, history_summary, ToTermTree};
pub use session::{parse_commands, Command, Outcome, Session};
