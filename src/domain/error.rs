//! Domain-level errors (no external dependencies)

use std::fmt;

use thiserror::Error;

use crate::domain::EmployeeId;

/// Why a reassignment was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMoveReason {
    /// Employee named as its own supervisor
    SelfSupervision,
    /// The root has no supervisor and cannot be moved
    RootMove,
    /// Target supervisor is a descendant of the employee
    Cycle,
}

impl fmt::Display for InvalidMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfSupervision => write!(f, "an employee cannot supervise itself"),
            Self::RootMove => write!(f, "the root cannot be moved"),
            Self::Cycle => write!(f, "supervisor is a subordinate of the employee"),
        }
    }
}

/// Domain errors represent violations of the hierarchy rules.
/// Every one of them leaves the hierarchy unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown employee: {0}")]
    UnknownEmployee(EmployeeId),

    #[error("invalid move of {employee} under {supervisor}: {reason}")]
    InvalidMove {
        employee: EmployeeId,
        supervisor: EmployeeId,
        reason: InvalidMoveReason,
    },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("duplicate employee identifier: {0}")]
    DuplicateIdentifier(EmployeeId),
}

impl DomainError {
    pub(crate) fn invalid_move(
        employee: EmployeeId,
        supervisor: EmployeeId,
        reason: InvalidMoveReason,
    ) -> Self {
        Self::InvalidMove {
            employee,
            supervisor,
            reason,
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
