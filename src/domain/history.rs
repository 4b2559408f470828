//! Transition log with an undo/redo cursor.
//!
//! One sequence, one cursor: everything before the cursor is applied
//! (undoable), everything from the cursor on has been reverted (redoable).
//! Recording a new transition drops the redoable tail.

use tracing::{debug, instrument};

use crate::domain::{DomainError, DomainResult, Transition};

#[derive(Debug, Clone, Default)]
pub struct History {
    transitions: Vec<Transition>,
    cursor: usize,
    /// Maximum retained transitions, None for unbounded
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// A limit of zero means unbounded.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.filter(|&l| l > 0),
            ..Self::default()
        }
    }

    /// Appends a transition at the cursor, discarding any redoable tail.
    #[instrument(level = "debug", skip(self))]
    pub fn record(&mut self, transition: Transition) {
        if self.cursor < self.transitions.len() {
            debug!(
                "Discarding {} redoable transitions",
                self.transitions.len() - self.cursor
            );
            self.transitions.truncate(self.cursor);
        }
        self.transitions.push(transition);

        if let Some(limit) = self.limit {
            if self.transitions.len() > limit {
                let excess = self.transitions.len() - limit;
                self.transitions.drain(..excess);
                debug!("History limit {} reached, dropped {} oldest", limit, excess);
            }
        }
        self.cursor = self.transitions.len();
    }

    /// Transition that `undo` would revert.
    pub fn peek_undo(&self) -> DomainResult<Transition> {
        self.cursor
            .checked_sub(1)
            .map(|i| self.transitions[i])
            .ok_or(DomainError::NothingToUndo)
    }

    /// Transition that `redo` would reapply.
    pub fn peek_redo(&self) -> DomainResult<Transition> {
        self.transitions
            .get(self.cursor)
            .copied()
            .ok_or(DomainError::NothingToRedo)
    }

    /// Moves the cursor back over the transition returned by `peek_undo`.
    pub(crate) fn step_back(&mut self) -> DomainResult<Transition> {
        let transition = self.peek_undo()?;
        self.cursor -= 1;
        Ok(transition)
    }

    /// Moves the cursor forward over the transition returned by `peek_redo`.
    pub(crate) fn step_forward(&mut self) -> DomainResult<Transition> {
        let transition = self.peek_redo()?;
        self.cursor += 1;
        Ok(transition)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.transitions.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Applied transitions, oldest first.
    pub fn undoable(&self) -> &[Transition] {
        &self.transitions[..self.cursor]
    }

    /// Reverted transitions, next redo first.
    pub fn redoable(&self) -> &[Transition] {
        &self.transitions[self.cursor..]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmployeeId;

    fn t(employee: u64, from: u64, to: u64) -> Transition {
        Transition {
            employee: EmployeeId(employee),
            from: EmployeeId(from),
            to: EmployeeId(to),
            position: 0,
        }
    }

    #[test]
    fn given_empty_history_when_stepping_then_boundary_errors() {
        let mut history = History::new();
        assert_eq!(history.step_back(), Err(DomainError::NothingToUndo));
        assert_eq!(history.step_forward(), Err(DomainError::NothingToRedo));
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn given_recorded_transitions_when_stepping_then_cursor_tracks() {
        let mut history = History::new();
        history.record(t(5, 2, 14));
        history.record(t(8, 1, 2));

        assert_eq!(history.step_back().unwrap(), t(8, 1, 2));
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.undoable(), &[t(5, 2, 14)]);
        assert_eq!(history.redoable(), &[t(8, 1, 2)]);

        assert_eq!(history.step_forward().unwrap(), t(8, 1, 2));
        assert_eq!(history.cursor(), 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn given_cursor_before_end_when_recording_then_tail_discarded() {
        let mut history = History::new();
        history.record(t(1, 0, 0));
        history.record(t(2, 0, 0));
        history.record(t(3, 0, 0));
        history.step_back().unwrap();
        history.step_back().unwrap();

        history.record(t(4, 0, 0));

        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.step_forward(), Err(DomainError::NothingToRedo));
    }

    #[test]
    fn given_limit_when_recording_past_it_then_oldest_dropped() {
        let mut history = History::with_limit(Some(2));
        history.record(t(1, 0, 0));
        history.record(t(2, 0, 0));
        history.record(t(3, 0, 0));

        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.undoable(), &[t(2, 0, 0), t(3, 0, 0)]);
    }

    #[test]
    fn given_zero_limit_when_constructing_then_unbounded() {
        let history = History::with_limit(Some(0));
        assert_eq!(history.limit(), None);
    }
}
