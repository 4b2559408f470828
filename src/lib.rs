//! Organizational hierarchy engine.
//!
//! A rooted tree of employees that supports reassigning any employee to a
//! new supervisor, with a linear undo/redo log of those reassignments.
//!
//! ```
//! use orgtree::domain::{Employee, EmployeeId, Hierarchy};
//!
//! let root = Employee::new(1, "R").with_subordinates(vec![
//!     Employee::new(2, "A").with_subordinates(vec![Employee::new(5, "C")]),
//!     Employee::new(8, "B").with_subordinates(vec![Employee::new(14, "D")]),
//! ]);
//! let mut hierarchy = Hierarchy::new(root)?;
//!
//! hierarchy.move_employee(EmployeeId(5), EmployeeId(14))?;
//! assert_eq!(hierarchy.supervisor_of(EmployeeId(5))?, Some(EmployeeId(14)));
//!
//! hierarchy.undo()?;
//! assert_eq!(hierarchy.supervisor_of(EmployeeId(5))?, Some(EmployeeId(2)));
//! # Ok::<(), orgtree::domain::DomainError>(())
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
