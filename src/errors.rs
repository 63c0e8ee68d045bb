use thiserror::Error;

use crate::store::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    #[error("Cycle detected on path: {}", format_path(.0))]
    CycleDetected(Vec<NodeId>),

    #[error("Dangling reference: node {parent} lists missing child {child}")]
    DanglingReference { parent: NodeId, child: NodeId },

    #[error("Attaching {child} under {parent} would make it its own descendant")]
    WouldCreateCycle { child: NodeId, parent: NodeId },

    #[error("Node {child} already has parent {parent}")]
    AlreadyChild { child: NodeId, parent: NodeId },

    #[error("Node {child} is not a child of {parent}")]
    NotAChild { child: NodeId, parent: NodeId },

    #[error("Corrupt snapshot: {reason}")]
    CorruptSnapshot { reason: String },
}

pub type TreeResult<T> = Result<T, TreeError>;

fn format_path(path: &[NodeId]) -> String {
    path.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
