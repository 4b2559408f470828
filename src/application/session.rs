//! Scripted editing of a hierarchy.
//!
//! Commands are plain text so they can come from the command line or a file:
//!
//! ```text
//! move 5 14
//! move 5:14
//! undo
//! redo
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{EmployeeId, Hierarchy, Transition};

/// One edit request against a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move {
        employee: EmployeeId,
        supervisor: EmployeeId,
    },
    Undo,
    Redo,
}

impl FromStr for Command {
    type Err = ApplicationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = input
            .split(|c: char| c.is_whitespace() || c == ':')
            .filter(|t| !t.is_empty())
            .collect();

        match tokens.as_slice() {
            [verb] if verb.eq_ignore_ascii_case("undo") => Ok(Self::Undo),
            [verb] if verb.eq_ignore_ascii_case("redo") => Ok(Self::Redo),
            [verb, employee, supervisor] if verb.eq_ignore_ascii_case("move") => {
                let parse = |raw: &str| {
                    raw.parse::<EmployeeId>().map_err(|e| {
                        ApplicationError::invalid_command(input, format!("bad id '{}': {}", raw, e))
                    })
                };
                Ok(Self::Move {
                    employee: parse(*employee)?,
                    supervisor: parse(*supervisor)?,
                })
            }
            [verb, ..] if verb.eq_ignore_ascii_case("move") => Err(
                ApplicationError::invalid_command(input, "expected: move <employee> <supervisor>"),
            ),
            [] => Err(ApplicationError::invalid_command(input, "empty command")),
            _ => Err(ApplicationError::invalid_command(
                input,
                "expected one of: move, undo, redo",
            )),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move {
                employee,
                supervisor,
            } => write!(f, "move {} {}", employee, supervisor),
            Self::Undo => write!(f, "undo"),
            Self::Redo => write!(f, "redo"),
        }
    }
}

/// What a successfully applied command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved(Transition),
    /// Employee already reported to the requested supervisor
    Unchanged {
        employee: EmployeeId,
        supervisor: EmployeeId,
    },
    Undone(Transition),
    Redone(Transition),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moved(t) => write!(f, "moved {}", t),
            Self::Unchanged {
                employee,
                supervisor,
            } => write!(f, "{} already reports to {}", employee, supervisor),
            Self::Undone(t) => write!(f, "undone {}", t),
            Self::Redone(t) => write!(f, "redone {}", t),
        }
    }
}

/// Applies commands to an owned hierarchy.
#[derive(Debug)]
pub struct Session {
    hierarchy: Hierarchy,
}

impl Session {
    pub fn new(hierarchy: Hierarchy) -> Self {
        Self { hierarchy }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn apply(&mut self, command: Command) -> ApplicationResult<Outcome> {
        let outcome = match command {
            Command::Move {
                employee,
                supervisor,
            } => match self.hierarchy.move_employee(employee, supervisor)? {
                Some(transition) => Outcome::Moved(transition),
                None => Outcome::Unchanged {
                    employee,
                    supervisor,
                },
            },
            Command::Undo => Outcome::Undone(self.hierarchy.undo()?),
            Command::Redo => Outcome::Redone(self.hierarchy.redo()?),
        };
        debug!("{} -> {}", command, outcome);
        Ok(outcome)
    }

    /// Applies commands in order, stopping at the first failure.
    ///
    /// Commands applied before the failure stay applied.
    pub fn apply_all<'a, I>(&mut self, commands: I) -> ApplicationResult<Vec<Outcome>>
    where
        I: IntoIterator<Item = &'a Command>,
    {
        commands
            .into_iter()
            .map(|&command| self.apply(command))
            .collect()
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn into_hierarchy(self) -> Hierarchy {
        self.hierarchy
    }
}

/// Parses one command per entry.
pub fn parse_commands<S: AsRef<str>>(inputs: &[S]) -> ApplicationResult<Vec<Command>> {
    inputs.iter().map(|s| s.as_ref().parse()).collect()
}
