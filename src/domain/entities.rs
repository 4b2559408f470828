//! Domain entities: core data structures

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique, immutable employee identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EmployeeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for EmployeeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Owned employee tree, used to construct a hierarchy and to export it again.
///
/// Subordinate order is significant: it is the order the hierarchy keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default, alias = "children", skip_serializing_if = "Vec::is_empty")]
    pub subordinates: Vec<Employee>,
}

impl Employee {
    pub fn new(id: impl Into<EmployeeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subordinates: Vec::new(),
        }
    }

    /// Builder-style helper to attach direct subordinates.
    pub fn with_subordinates(mut self, subordinates: Vec<Employee>) -> Self {
        self.subordinates = subordinates;
        self
    }

    /// Number of employees in this subtree, including self.
    pub fn count(&self) -> usize {
        1 + self.subordinates.iter().map(Employee::count).sum::<usize>()
    }
}

/// One completed reassignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Employee that was moved
    pub employee: EmployeeId,
    /// Supervisor before the move
    pub from: EmployeeId,
    /// Supervisor after the move
    pub to: EmployeeId,
    /// Slot the employee occupied among `from`'s subordinates
    pub position: usize,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.employee, self.from, self.to)
    }
}
