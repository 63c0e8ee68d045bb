use std::collections::HashSet;

use tracing::instrument;

use crate::errors::{TreeError, TreeResult};
use crate::store::{NodeId, NodeStore};

/// Applies structural edits against a [`NodeStore`].
///
/// The mutator is the only writer of `parent`/`children`; going through it
/// keeps the store a valid forest. Every operation validates all of its
/// failure conditions before the first write, so a failed call leaves the
/// store exactly as it was.
pub struct TreeMutator<'a> {
    store: &'a mut NodeStore,
}

impl<'a> TreeMutator<'a> {
    pub fn new(store: &'a mut NodeStore) -> Self {
        Self { store }
    }

    /// Attaches `child_id` under `parent_id` at `index` (clamped to the
    /// child list), shifting later siblings right.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_child(
        &mut self,
        parent_id: NodeId,
        child_id: NodeId,
        index: usize,
    ) -> TreeResult<()> {
        self.store.get(parent_id)?;
        let child = self.store.get(child_id)?;
        if let Some(existing) = child.parent {
            return Err(TreeError::AlreadyChild {
                child: child_id,
                parent: existing,
            });
        }
        self.ensure_no_cycle(parent_id, child_id)?;

        let parent = self.store.record_mut(parent_id)?;
        let index = index.min(parent.children.len());
        parent.children.insert(index, child_id);
        self.store.record_mut(child_id)?.parent = Some(parent_id);
        Ok(())
    }

    /// Detaches `child_id` from `parent_id`. The child becomes a root; it
    /// is not deleted.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_child(&mut self, parent_id: NodeId, child_id: NodeId) -> TreeResult<()> {
        self.store.get(parent_id)?;
        self.store.get(child_id)?;

        let parent = self.store.record_mut(parent_id)?;
        let position = parent
            .children
            .iter()
            .position(|&id| id == child_id)
            .ok_or(TreeError::NotAChild {
                child: child_id,
                parent: parent_id,
            })?;

        parent.children.remove(position);
        self.store.record_mut(child_id)?.parent = None;
        Ok(())
    }

    /// Detaches `child_id` from its current parent (if any) and attaches it
    /// under `new_parent_id` at `index`, as one atomic step.
    #[instrument(level = "debug", skip(self))]
    pub fn move_subtree(
        &mut self,
        child_id: NodeId,
        new_parent_id: NodeId,
        index: usize,
    ) -> TreeResult<()> {
        self.store.get(child_id)?;
        self.store.get(new_parent_id)?;
        // The detach below never changes the ancestry of new_parent_id
        // relative to child_id, so checking before it is equivalent to
        // checking the post-detach state.
        self.ensure_no_cycle(new_parent_id, child_id)?;

        if let Some(old_parent_id) = self.store.get(child_id)?.parent {
            let old_parent = self.store.record_mut(old_parent_id)?;
            old_parent.children.retain(|&id| id != child_id);
        }

        let new_parent = self.store.record_mut(new_parent_id)?;
        let index = index.min(new_parent.children.len());
        new_parent.children.insert(index, child_id);
        self.store.record_mut(child_id)?.parent = Some(new_parent_id);
        Ok(())
    }

    /// Removes `root_id` and every descendant in one step, detaching the
    /// subtree from its former parent first.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_subtree(&mut self, root_id: NodeId) -> TreeResult<()> {
        let parent_id = self.store.get(root_id)?.parent;

        // Cycle-safe stack walk; a visited set keeps a corrupted child list
        // from looping us.
        let mut doomed: Vec<NodeId> = Vec::new();
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut stack = vec![root_id];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            doomed.push(id);
            if let Ok(record) = self.store.get(id) {
                stack.extend(record.children.iter().copied());
            }
        }

        if let Some(parent_id) = parent_id {
            let parent = self.store.record_mut(parent_id)?;
            parent.children.retain(|&id| id != root_id);
        }
        for id in doomed {
            self.store.remove(id);
        }
        Ok(())
    }

    /// Renames a node. Structure is untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn rename(&mut self, id: NodeId, name: &str) -> TreeResult<()> {
        self.store.set_name(id, name)
    }

    /// Walks up from `parent_id` over parent pointers; attaching `child_id`
    /// there must not make the child its own descendant.
    fn ensure_no_cycle(&self, parent_id: NodeId, child_id: NodeId) -> TreeResult<()> {
        let mut current = Some(parent_id);
        while let Some(id) = current {
            if id == child_id {
                return Err(TreeError::WouldCreateCycle {
                    child: child_id,
                    parent: parent_id,
                });
            }
            current = self.store.get(id)?.parent;
        }
        Ok(())
    }
}
