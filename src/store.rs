use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use generational_arena::{Arena, Index};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::errors::{TreeError, TreeResult};

/// Store-assigned node identifier.
///
/// Monotonically increasing within a store instance, never reused,
/// with no guarantee of contiguity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flat record for one tree node.
///
/// `parent` and `children` are maintained exclusively by the mutator;
/// together over all records they must form a forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    /// User-supplied name, may be empty
    pub name: String,
    /// Parent id, None for root nodes
    pub parent: Option<NodeId>,
    /// Child ids, insertion order significant, no duplicates
    pub children: Vec<NodeId>,
}

/// Arena-based flat store for tree node records.
///
/// Records live in a generational arena; a side index maps the public
/// `NodeId` to the arena slot for O(1) lookups. Structure edits go
/// through [`crate::mutator::TreeMutator`] only.
#[derive(Debug)]
pub struct NodeStore {
    /// Arena storage for all node records
    arena: Arena<NodeRecord>,
    /// Public id to arena slot
    index: HashMap<NodeId, Index>,
    /// Next id to hand out
    next_id: u64,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Allocates a fresh id and stores a parentless node with no children.
    #[instrument(level = "trace", skip(self))]
    pub fn create(&mut self, name: &str) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        let record = NodeRecord {
            id,
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
        };
        let slot = self.arena.insert(record);
        self.index.insert(id, slot);

        id
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, id: NodeId) -> TreeResult<&NodeRecord> {
        self.index
            .get(&id)
            .and_then(|&slot| self.arena.get(slot))
            .ok_or(TreeError::NotFound(id))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn set_name(&mut self, id: NodeId, name: &str) -> TreeResult<()> {
        self.record_mut(id)?.name = name.to_string();
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn exists(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// All ids currently in the store, ordered. For integrity scans and
    /// before/after comparisons.
    #[instrument(level = "debug", skip(self))]
    pub fn all_ids(&self) -> BTreeSet<NodeId> {
        self.index.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub(crate) fn record_mut(&mut self, id: NodeId) -> TreeResult<&mut NodeRecord> {
        self.index
            .get(&id)
            .and_then(|&slot| self.arena.get_mut(slot))
            .ok_or(TreeError::NotFound(id))
    }

    /// Removes a record outright. Callers are responsible for keeping the
    /// forest invariants; only the mutator's subtree delete uses this.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<NodeRecord> {
        let slot = self.index.remove(&id)?;
        self.arena.remove(slot)
    }

    /// All records, ordered by id. Serde-ready input for whatever durable
    /// storage the caller owns.
    #[instrument(level = "debug", skip(self))]
    pub fn snapshot(&self) -> Vec<NodeRecord> {
        self.arena
            .iter()
            .map(|(_, record)| record.clone())
            .sorted_by_key(|record| record.id)
            .collect()
    }

    /// Rebuilds a store from snapshot records, verifying every forest
    /// invariant before accepting them. The id allocator resumes above the
    /// highest id seen.
    #[instrument(level = "debug", skip(records))]
    pub fn from_records(records: Vec<NodeRecord>) -> TreeResult<Self> {
        let mut store = Self::new();
        for record in records {
            store.insert_raw(record)?;
        }
        store.validate()?;
        Ok(store)
    }

    /// Inserts a record as-is, only rejecting duplicate ids. Invariants are
    /// the caller's problem until [`Self::validate`] runs.
    pub(crate) fn insert_raw(&mut self, record: NodeRecord) -> TreeResult<()> {
        if self.exists(record.id) {
            return Err(TreeError::CorruptSnapshot {
                reason: format!("duplicate id {}", record.id),
            });
        }
        self.next_id = self.next_id.max(record.id.0 + 1);
        let id = record.id;
        let slot = self.arena.insert(record);
        self.index.insert(id, slot);
        Ok(())
    }

    /// Full integrity scan: dangling references, duplicate or shared
    /// children, parent/child disagreement, cycles.
    fn validate(&self) -> TreeResult<()> {
        for (_, record) in self.arena.iter() {
            let mut seen = HashSet::new();
            for &child_id in &record.children {
                if !seen.insert(child_id) {
                    return Err(TreeError::CorruptSnapshot {
                        reason: format!("node {} lists child {} twice", record.id, child_id),
                    });
                }
                let child = match self.get(child_id) {
                    Ok(child) => child,
                    Err(_) => {
                        return Err(TreeError::DanglingReference {
                            parent: record.id,
                            child: child_id,
                        })
                    }
                };
                match child.parent {
                    Some(parent_id) if parent_id == record.id => {}
                    Some(parent_id) => {
                        return Err(TreeError::AlreadyChild {
                            child: child_id,
                            parent: parent_id,
                        })
                    }
                    None => {
                        return Err(TreeError::CorruptSnapshot {
                            reason: format!(
                                "node {} is listed as a child of {} but carries no parent",
                                child_id, record.id
                            ),
                        })
                    }
                }
            }
            if let Some(parent_id) = record.parent {
                let parent = self.get(parent_id).map_err(|_| TreeError::CorruptSnapshot {
                    reason: format!("node {} points at missing parent {}", record.id, parent_id),
                })?;
                if !parent.children.contains(&record.id) {
                    return Err(TreeError::CorruptSnapshot {
                        reason: format!(
                            "node {} claims parent {} which does not list it",
                            record.id, parent_id
                        ),
                    });
                }
            }
        }

        // Parent chains are consistent at this point; a cycle shows up as a
        // chain that revisits itself before reaching a root.
        let mut cleared: HashSet<NodeId> = HashSet::new();
        for (_, record) in self.arena.iter() {
            let mut path = Vec::new();
            let mut on_path: HashSet<NodeId> = HashSet::new();
            let mut current = Some(record.id);
            while let Some(id) = current {
                if cleared.contains(&id) {
                    break;
                }
                if !on_path.insert(id) {
                    path.push(id);
                    return Err(TreeError::CycleDetected(path));
                }
                path.push(id);
                current = self.get(id)?.parent;
            }
            cleared.extend(path);
        }

        Ok(())
    }
}
