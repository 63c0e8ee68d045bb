use serde::{Deserialize, Serialize};

use crate::store::NodeId;

/// Immutable, fully-resolved snapshot of a subtree.
///
/// Built once by [`crate::builder::TreeBuilder`]; later store mutations do
/// not show through. Children keep the store's insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeView {
    pub id: NodeId,
    pub name: String,
    pub children: Vec<TreeView>,
}

impl TreeView {
    /// Number of nodes in the view, root included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.node_count())
            .sum::<usize>()
    }

    /// Longest root-to-leaf node count.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.depth())
            .max()
            .unwrap_or(0)
    }

    /// Names of all leaf nodes, left to right.
    pub fn leaf_names(&self) -> Vec<&str> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a str>) {
        if self.children.is_empty() {
            leaves.push(self.name.as_str());
        } else {
            for child in &self.children {
                child.collect_leaves(leaves);
            }
        }
    }
}
