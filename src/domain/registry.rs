//! Flat identifier index over the arena.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::{DomainError, DomainResult, EmployeeId, TreeArena};

/// Non-owning lookup from employee identifier to arena node.
///
/// Moves change edges, never the node set, so the key set is fixed once built.
#[derive(Debug, Default)]
pub struct Registry {
    index: HashMap<EmployeeId, Index>,
}

impl Registry {
    /// Indexes every node reachable from the arena root.
    ///
    /// Fails on the first identifier seen twice.
    #[instrument(level = "debug", skip(tree))]
    pub fn build(tree: &TreeArena) -> DomainResult<Self> {
        let mut index = HashMap::with_capacity(tree.len());
        for (idx, node) in tree.iter() {
            if index.insert(node.data.id, idx).is_some() {
                return Err(DomainError::DuplicateIdentifier(node.data.id));
            }
        }
        debug!("Indexed {} employees", index.len());
        Ok(Self { index })
    }

    pub fn lookup(&self, id: EmployeeId) -> DomainResult<Index> {
        self.index
            .get(&id)
            .copied()
            .ok_or(DomainError::UnknownEmployee(id))
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// All registered identifiers in ascending order.
    pub fn ids(&self) -> Vec<EmployeeId> {
        let mut ids: Vec<_> = self.index.keys().copied().collect();
        ids.sort();
        ids
    }
}
