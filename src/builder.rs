use std::collections::HashSet;

use tracing::instrument;

use crate::errors::{TreeError, TreeResult};
use crate::store::{NodeId, NodeStore};
use crate::view::TreeView;

/// Builds immutable [`TreeView`] snapshots from flat store records.
///
/// Building is read-only and side-effect free. Cycles are caught by
/// tracking the ids on the current path; a child id with no record in the
/// store surfaces as a dangling reference.
pub struct TreeBuilder<'a> {
    store: &'a NodeStore,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(store: &'a NodeStore) -> Self {
        Self { store }
    }

    /// Resolves `root_id` and its transitive children into a nested view.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&self, root_id: NodeId) -> TreeResult<TreeView> {
        // Surface NotFound for an absent root before walking anything.
        self.store.get(root_id)?;

        let mut path = Vec::new();
        let mut on_path = HashSet::new();
        self.resolve(root_id, &mut path, &mut on_path)
    }

    /// Builds every root in the store, ordered by id. A node that was never
    /// attached anywhere is its own root.
    #[instrument(level = "debug", skip(self))]
    pub fn build_forest(&self) -> TreeResult<Vec<TreeView>> {
        self.roots()
            .into_iter()
            .map(|root_id| self.build(root_id))
            .collect()
    }

    /// Ids of all nodes not listed as a child of any other node, ordered.
    pub fn roots(&self) -> Vec<NodeId> {
        self.store
            .all_ids()
            .into_iter()
            .filter(|&id| {
                self.store
                    .get(id)
                    .map(|record| record.parent.is_none())
                    .unwrap_or(false)
            })
            .collect()
    }

    fn resolve(
        &self,
        id: NodeId,
        path: &mut Vec<NodeId>,
        on_path: &mut HashSet<NodeId>,
    ) -> TreeResult<TreeView> {
        if !on_path.insert(id) {
            let mut cycle = path.clone();
            cycle.push(id);
            return Err(TreeError::CycleDetected(cycle));
        }
        path.push(id);

        let record = self.store.get(id)?;
        let mut children = Vec::with_capacity(record.children.len());
        for &child_id in &record.children {
            if !self.store.exists(child_id) {
                return Err(TreeError::DanglingReference {
                    parent: id,
                    child: child_id,
                });
            }
            children.push(self.resolve(child_id, path, on_path)?);
        }

        path.pop();
        on_path.remove(&id);

        Ok(TreeView {
            id,
            name: record.name.clone(),
            children,
        })
    }
}
