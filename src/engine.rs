use std::collections::BTreeSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::instrument;

use crate::builder::TreeBuilder;
use crate::errors::TreeResult;
use crate::mutator::TreeMutator;
use crate::store::{NodeId, NodeRecord, NodeStore};
use crate::view::TreeView;

/// Shared-resource front for a [`NodeStore`].
///
/// Every mutation takes the write lock for the duration of the operation,
/// so mutations are linearizable. Builds and reads take the read lock and
/// therefore observe one atomic snapshot; any number of them may run
/// concurrently. Traversal of a built view takes no lock at all.
///
/// Cloning is cheap; clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct TreeEngine {
    store: Arc<RwLock<NodeStore>>,
}

impl TreeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an engine from snapshot records, rejecting any snapshot that
    /// violates the forest invariants.
    pub fn from_records(records: Vec<NodeRecord>) -> TreeResult<Self> {
        let store = NodeStore::from_records(records)?;
        Ok(Self {
            store: Arc::new(RwLock::new(store)),
        })
    }

    #[instrument(level = "debug", skip(self))]
    pub fn create(&self, name: &str) -> NodeId {
        self.write().create(name)
    }

    /// Owned copy of the record; later mutations do not show through.
    pub fn get(&self, id: NodeId) -> TreeResult<NodeRecord> {
        self.read().get(id).cloned()
    }

    pub fn exists(&self, id: NodeId) -> bool {
        self.read().exists(id)
    }

    pub fn all_ids(&self) -> BTreeSet<NodeId> {
        self.read().all_ids()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn rename(&self, id: NodeId, name: &str) -> TreeResult<()> {
        let mut store = self.write();
        TreeMutator::new(&mut store).rename(id, name)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn insert_child(&self, parent: NodeId, child: NodeId, index: usize) -> TreeResult<()> {
        let mut store = self.write();
        TreeMutator::new(&mut store).insert_child(parent, child, index)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn remove_child(&self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        let mut store = self.write();
        TreeMutator::new(&mut store).remove_child(parent, child)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn move_subtree(&self, child: NodeId, new_parent: NodeId, index: usize) -> TreeResult<()> {
        let mut store = self.write();
        TreeMutator::new(&mut store).move_subtree(child, new_parent, index)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete_subtree(&self, root: NodeId) -> TreeResult<()> {
        let mut store = self.write();
        TreeMutator::new(&mut store).delete_subtree(root)
    }

    /// Builds a view under the read lock: one atomic snapshot, never
    /// interleaved with a mutation mid-walk.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&self, root: NodeId) -> TreeResult<TreeView> {
        let store = self.read();
        TreeBuilder::new(&store).build(root)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn build_forest(&self) -> TreeResult<Vec<TreeView>> {
        let store = self.read();
        TreeBuilder::new(&store).build_forest()
    }

    /// All records, ordered by id, for the persistence collaborator.
    pub fn snapshot(&self) -> Vec<NodeRecord> {
        self.read().snapshot()
    }

    /// Replaces the whole store with a validated snapshot. On rejection the
    /// previous contents stay in place.
    #[instrument(level = "debug", skip(self, records))]
    pub fn load(&self, records: Vec<NodeRecord>) -> TreeResult<()> {
        let incoming = NodeStore::from_records(records)?;
        *self.write() = incoming;
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, NodeStore> {
        self.store.read().expect("node store lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, NodeStore> {
        self.store.write().expect("node store lock poisoned")
    }
}
