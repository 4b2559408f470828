use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::{Employee, EmployeeId};

/// Data payload for tree nodes representing employees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub id: EmployeeId,
    pub name: String,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Employee data for this node
    pub data: NodeData,
    /// Index of the supervisor node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of direct subordinates, in order
    pub children: Vec<Index>,
}

/// Arena-based tree structure for the organizational hierarchy.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Nodes are never removed, only re-parented, so indices stay valid for the
/// lifetime of the arena.
#[derive(Debug)]
pub struct TreeArena {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Builds an arena from an owned employee tree, preserving subordinate order.
    #[instrument(level = "debug", skip(root), fields(root_id = %root.id))]
    pub fn from_employee(root: Employee) -> Self {
        let mut tree = Self::new();
        let mut stack = vec![(root, None)];

        while let Some((employee, parent_idx)) = stack.pop() {
            let Employee {
                id,
                name,
                subordinates,
            } = employee;
            let current_idx = tree.insert_node(NodeData { id, name }, parent_idx);

            // Reversed so that children are inserted left to right
            for child in subordinates.into_iter().rev() {
                stack.push((child, Some(current_idx)));
            }
        }

        tree
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns true if `ancestor` lies on the parent path of `node` (or is `node`).
    #[instrument(level = "trace", skip(self))]
    pub fn is_ancestor(&self, ancestor: Index, node: Index) -> bool {
        let mut current = Some(node);
        while let Some(idx) = current {
            if idx == ancestor {
                return true;
            }
            current = self.get_node(idx).and_then(|n| n.parent);
        }
        false
    }

    /// Removes `node` from its parent's children and clears its parent link.
    ///
    /// Returns the former parent and the slot the node occupied there.
    #[instrument(level = "trace", skip(self))]
    pub fn detach(&mut self, node: Index) -> Option<(Index, usize)> {
        let parent_idx = self.arena.get(node)?.parent?;
        let parent = self.arena.get_mut(parent_idx)?;
        let position = parent.children.iter().position(|&c| c == node)?;
        parent.children.remove(position);
        if let Some(n) = self.arena.get_mut(node) {
            n.parent = None;
        }
        Some((parent_idx, position))
    }

    /// Inserts a detached `node` into `parent`'s children at `position`
    /// (clamped to the end) and sets its parent link.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, node: Index, parent: Index, position: Option<usize>) {
        if let Some(p) = self.arena.get_mut(parent) {
            let slot = position.map_or(p.children.len(), |pos| pos.min(p.children.len()));
            p.children.insert(slot, node);
        }
        if let Some(n) = self.arena.get_mut(node) {
            n.parent = Some(parent);
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    #[instrument(level = "trace", skip(self))]
    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Rebuilds an owned employee tree rooted at `node_idx`.
    #[instrument(level = "trace", skip(self))]
    pub fn to_employee(&self, node_idx: Index) -> Option<Employee> {
        let node = self.get_node(node_idx)?;
        let subordinates = node
            .children
            .iter()
            .filter_map(|&child| self.to_employee(child))
            .collect();
        Some(Employee {
            id: node.data.id,
            name: node.data.name.clone(),
            subordinates,
        })
    }
}

/// Pre-order (supervisor before subordinates) traversal.
pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    #[instrument(level = "trace")]
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    #[instrument(level = "trace", skip(self))]
    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeArena {
        TreeArena::from_employee(Employee::new(1, "root").with_subordinates(vec![
            Employee::new(2, "a").with_subordinates(vec![Employee::new(5, "c")]),
            Employee::new(8, "b").with_subordinates(vec![Employee::new(14, "d")]),
        ]))
    }

    fn ids(tree: &TreeArena) -> Vec<u64> {
        tree.iter().map(|(_, n)| n.data.id.0).collect()
    }

    #[test]
    fn given_employee_tree_when_building_then_preserves_preorder() {
        let tree = sample();
        assert_eq!(ids(&tree), vec![1, 2, 5, 8, 14]);
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn given_node_when_detaching_then_reports_parent_and_slot() {
        let mut tree = sample();
        let root = tree.root().unwrap();
        let b = tree.get_node(root).unwrap().children[1];

        let (parent, position) = tree.detach(b).unwrap();

        assert_eq!(parent, root);
        assert_eq!(position, 1);
        assert!(tree.get_node(b).unwrap().parent.is_none());
        assert_eq!(tree.get_node(root).unwrap().children.len(), 1);
    }

    #[test]
    fn given_detached_node_when_attaching_at_slot_then_restores_order() {
        let mut tree = sample();
        let root = tree.root().unwrap();
        let a = tree.get_node(root).unwrap().children[0];

        let (parent, position) = tree.detach(a).unwrap();
        tree.attach(a, parent, Some(position));

        assert_eq!(ids(&tree), vec![1, 2, 5, 8, 14]);
        assert_eq!(tree.get_node(a).unwrap().parent, Some(root));
    }

    #[test]
    fn given_root_when_detaching_then_returns_none() {
        let mut tree = sample();
        let root = tree.root().unwrap();
        assert!(tree.detach(root).is_none());
    }

    #[test]
    fn given_descendant_when_checking_ancestry_then_walks_parent_path() {
        let tree = sample();
        let root = tree.root().unwrap();
        let a = tree.get_node(root).unwrap().children[0];
        let c = tree.get_node(a).unwrap().children[0];
        let b = tree.get_node(root).unwrap().children[1];

        assert!(tree.is_ancestor(root, c));
        assert!(tree.is_ancestor(a, c));
        assert!(tree.is_ancestor(c, c));
        assert!(!tree.is_ancestor(b, c));
        assert!(!tree.is_ancestor(c, a));
    }

    #[test]
    fn given_arena_when_exporting_then_round_trips_shape() {
        let tree = sample();
        let exported = tree.to_employee(tree.root().unwrap()).unwrap();
        assert_eq!(exported.count(), 5);
        assert_eq!(exported.subordinates[1].subordinates[0].id, EmployeeId(14));
    }
}
