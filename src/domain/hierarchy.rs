//! The hierarchy: arena tree, identifier registry and transition history as one unit.

use std::fmt;

use generational_arena::Index;
use tracing::{debug, info, instrument};

use crate::domain::{
    DomainError, DomainResult, Employee, EmployeeId, History, InvalidMoveReason, Registry,
    Transition, TreeArena, TreeNode,
};

/// Organizational tree with reassignment and undo/redo.
///
/// Every operation validates before it mutates, so a returned error always
/// leaves the tree and the history exactly as they were.
#[derive(Debug)]
pub struct Hierarchy {
    tree: TreeArena,
    registry: Registry,
    history: History,
    root: Index,
}

impl Hierarchy {
    /// Builds a hierarchy with an unbounded history.
    pub fn new(root: Employee) -> DomainResult<Self> {
        Self::with_history_limit(root, None)
    }

    /// Builds a hierarchy that keeps at most `limit` transitions.
    #[instrument(level = "debug", skip(root), fields(root_id = %root.id))]
    pub fn with_history_limit(root: Employee, limit: Option<usize>) -> DomainResult<Self> {
        let root_id = root.id;
        let tree = TreeArena::from_employee(root);
        let registry = Registry::build(&tree)?;
        let root = registry.lookup(root_id)?;
        info!("Hierarchy with {} employees, root {}", registry.len(), root_id);

        Ok(Self {
            tree,
            registry,
            history: History::with_limit(limit),
            root,
        })
    }

    /// Live view of the root.
    pub fn root(&self) -> EmployeeRef<'_> {
        self.view(self.root)
            .expect("root index is registered for the lifetime of the hierarchy")
    }

    pub fn lookup(&self, id: EmployeeId) -> DomainResult<EmployeeRef<'_>> {
        let idx = self.registry.lookup(id)?;
        self.view(idx).ok_or(DomainError::UnknownEmployee(id))
    }

    /// Current supervisor of `id`, None for the root.
    pub fn supervisor_of(&self, id: EmployeeId) -> DomainResult<Option<EmployeeId>> {
        Ok(self.lookup(id)?.supervisor().map(|s| s.id()))
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        self.registry.contains(id)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    /// All registered identifiers in ascending order.
    pub fn ids(&self) -> Vec<EmployeeId> {
        self.registry.ids()
    }

    /// Pre-order traversal of the live tree.
    pub fn iter(&self) -> impl Iterator<Item = EmployeeRef<'_>> {
        self.tree.iter().map(move |(idx, node)| EmployeeRef {
            tree: &self.tree,
            idx,
            node,
        })
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Owned copy of the current tree.
    pub fn to_employee(&self) -> Employee {
        self.root().to_employee()
    }

    /// Reassigns `employee` to `supervisor`, appending it as the last subordinate.
    ///
    /// Returns the recorded transition, or None when `supervisor` already is the
    /// current supervisor (nothing changes, nothing is recorded).
    #[instrument(level = "debug", skip(self))]
    pub fn move_employee(
        &mut self,
        employee: EmployeeId,
        supervisor: EmployeeId,
    ) -> DomainResult<Option<Transition>> {
        let employee_idx = self.registry.lookup(employee)?;
        let current_idx = self.node(employee_idx, employee)?.parent;
        let supervisor_idx = self.registry.lookup(supervisor)?;

        if employee == supervisor {
            return Err(DomainError::invalid_move(
                employee,
                supervisor,
                InvalidMoveReason::SelfSupervision,
            ));
        }
        let Some(current_idx) = current_idx else {
            return Err(DomainError::invalid_move(
                employee,
                supervisor,
                InvalidMoveReason::RootMove,
            ));
        };
        if current_idx == supervisor_idx {
            debug!("{} already reports to {}, nothing to do", employee, supervisor);
            return Ok(None);
        }
        self.check_acyclic(employee_idx, supervisor_idx, employee, supervisor)?;

        let (from_idx, position) = self.reassign(employee_idx, supervisor_idx, None, employee)?;
        let from = self.node(from_idx, employee)?.data.id;
        let transition = Transition {
            employee,
            from,
            to: supervisor,
            position,
        };
        self.history.record(transition);
        info!("Moved {}", transition);

        Ok(Some(transition))
    }

    /// Reverts the most recent applied transition.
    #[instrument(level = "debug", skip(self))]
    pub fn undo(&mut self) -> DomainResult<Transition> {
        let transition = self.history.peek_undo()?;
        let employee_idx = self.registry.lookup(transition.employee)?;
        let from_idx = self.registry.lookup(transition.from)?;
        self.check_acyclic(employee_idx, from_idx, transition.employee, transition.from)?;

        self.reassign(
            employee_idx,
            from_idx,
            Some(transition.position),
            transition.employee,
        )?;
        self.history.step_back()?;
        info!("Undone {}", transition);

        Ok(transition)
    }

    /// Reapplies the next reverted transition.
    #[instrument(level = "debug", skip(self))]
    pub fn redo(&mut self) -> DomainResult<Transition> {
        let transition = self.history.peek_redo()?;
        let employee_idx = self.registry.lookup(transition.employee)?;
        let to_idx = self.registry.lookup(transition.to)?;
        self.check_acyclic(employee_idx, to_idx, transition.employee, transition.to)?;

        self.reassign(employee_idx, to_idx, None, transition.employee)?;
        self.history.step_forward()?;
        info!("Redone {}", transition);

        Ok(transition)
    }

    fn view(&self, idx: Index) -> Option<EmployeeRef<'_>> {
        EmployeeRef::new(&self.tree, idx)
    }

    fn node(&self, idx: Index, id: EmployeeId) -> DomainResult<&TreeNode> {
        self.tree
            .get_node(idx)
            .ok_or(DomainError::UnknownEmployee(id))
    }

    fn check_acyclic(
        &self,
        employee_idx: Index,
        supervisor_idx: Index,
        employee: EmployeeId,
        supervisor: EmployeeId,
    ) -> DomainResult<()> {
        if self.tree.is_ancestor(employee_idx, supervisor_idx) {
            return Err(DomainError::invalid_move(
                employee,
                supervisor,
                InvalidMoveReason::Cycle,
            ));
        }
        Ok(())
    }

    /// Detaches `employee_idx` and attaches it under `supervisor_idx`.
    ///
    /// Returns the former supervisor and slot.
    fn reassign(
        &mut self,
        employee_idx: Index,
        supervisor_idx: Index,
        position: Option<usize>,
        employee: EmployeeId,
    ) -> DomainResult<(Index, usize)> {
        let (from_idx, from_position) = self.tree.detach(employee_idx).ok_or_else(|| {
            DomainError::invalid_move(employee, employee, InvalidMoveReason::RootMove)
        })?;
        self.tree.attach(employee_idx, supervisor_idx, position);
        Ok((from_idx, from_position))
    }
}

/// Read-only view of one employee in the live tree.
#[derive(Clone, Copy)]
pub struct EmployeeRef<'a> {
    tree: &'a TreeArena,
    idx: Index,
    node: &'a TreeNode,
}

impl<'a> EmployeeRef<'a> {
    fn new(tree: &'a TreeArena, idx: Index) -> Option<Self> {
        tree.get_node(idx).map(|node| Self { tree, idx, node })
    }

    pub fn id(&self) -> EmployeeId {
        self.node.data.id
    }

    pub fn name(&self) -> &'a str {
        &self.node.data.name
    }

    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    pub fn supervisor(&self) -> Option<EmployeeRef<'a>> {
        self.node
            .parent
            .and_then(|parent| EmployeeRef::new(self.tree, parent))
    }

    /// Direct subordinates in order.
    pub fn subordinates(&self) -> impl Iterator<Item = EmployeeRef<'a>> + 'a {
        let tree = self.tree;
        let node = self.node;
        node.children
            .iter()
            .filter_map(move |&child| EmployeeRef::new(tree, child))
    }

    pub fn subordinate_ids(&self) -> Vec<EmployeeId> {
        self.subordinates().map(|s| s.id()).collect()
    }

    /// Owned copy of the subtree rooted here.
    pub fn to_employee(&self) -> Employee {
        self.tree
            .to_employee(self.idx)
            .unwrap_or_else(|| Employee::new(self.id(), self.name()))
    }
}

impl fmt::Debug for EmployeeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmployeeRef")
            .field("id", &self.id())
            .field("name", &self.name())
            .finish()
    }
}

impl fmt::Display for EmployeeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node.data)
    }
}
