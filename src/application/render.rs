//! Text rendering of the live tree and the transition log.

use itertools::Itertools;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{EmployeeRef, Hierarchy, History};

/// Conversion into a `termtree` for terminal display.
pub trait ToTermTree {
    fn to_term_tree(&self) -> Tree<String>;
}

impl ToTermTree for EmployeeRef<'_> {
    fn to_term_tree(&self) -> Tree<String> {
        // Recursively construct the subordinates
        let leaves: Vec<_> = self.subordinates().map(|s| s.to_term_tree()).collect();
        Tree::new(self.to_string()).with_leaves(leaves)
    }
}

impl ToTermTree for Hierarchy {
    #[instrument(level = "debug", skip(self))]
    fn to_term_tree(&self) -> Tree<String> {
        self.root().to_term_tree()
    }
}

/// One line per transition, oldest first; `>` marks the next one to undo.
///
/// Reverted (redoable) transitions are shown in parentheses.
pub fn history_lines(history: &History) -> Vec<String> {
    let marker = history.cursor().checked_sub(1);
    history
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let prefix = if Some(i) == marker { ">" } else { " " };
            if i < history.cursor() {
                format!("{} {:>3}  {}", prefix, i + 1, t)
            } else {
                format!("{} {:>3}  ({})", prefix, i + 1, t)
            }
        })
        .collect()
}

/// Compact single-line summary, e.g. `2 applied [5: 2 -> 14, 8: 1 -> 2], 1 redoable`.
pub fn history_summary(history: &History) -> String {
    format!(
        "{} applied [{}], {} redoable",
        history.undoable().len(),
        history.undoable().iter().join(", "),
        history.redoable().len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Employee;

    fn hierarchy() -> Hierarchy {
        Hierarchy::new(Employee::new(1, "Root").with_subordinates(vec![
            Employee::new(2, "A").with_subordinates(vec![Employee::new(5, "C")]),
            Employee::new(8, "B"),
        ]))
        .unwrap()
    }

    #[test]
    fn given_hierarchy_when_rendering_then_labels_every_employee() {
        let rendered = hierarchy().to_term_tree().to_string();

        assert!(rendered.starts_with("Root (1)"));
        assert!(rendered.contains("A (2)"));
        assert!(rendered.contains("C (5)"));
        assert!(rendered.contains("B (8)"));
    }

    #[test]
    fn given_undone_move_when_listing_history_then_marks_cursor() {
        let mut h = hierarchy();
        h.move_employee(5.into(), 8.into()).unwrap();
        h.move_employee(8.into(), 2.into()).unwrap();
        h.undo().unwrap();

        let lines = history_lines(h.history());

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('>'));
        assert!(lines[0].contains("5: 2 -> 8"));
        assert!(lines[1].contains("(8: 1 -> 2)"));
        assert_eq!(
            history_summary(h.history()),
            "1 applied [5: 2 -> 8], 1 redoable"
        );
    }
}
