//! Tree storage and traversal engine.
//!
//! Named trees are kept as flat id-indexed records ([`store::NodeStore`])
//! instead of a nested owning structure; structure edits go through
//! [`mutator::TreeMutator`], which keeps the records a valid forest.
//! [`builder::TreeBuilder`] resolves records into immutable
//! [`view::TreeView`] snapshots for read-only consumers, and
//! [`traverse`] walks those snapshots lazily. [`engine::TreeEngine`]
//! wraps a store in the shared read/exclusive write locking policy for
//! concurrent callers.
//!
//! Persistence and presentation stay outside: records and views are
//! serde-ready, and whatever owns durable storage feeds
//! [`store::NodeStore::from_records`] / [`store::NodeStore::snapshot`].

pub mod builder;
pub mod engine;
pub mod errors;
pub mod mutator;
pub mod store;
pub mod traverse;
pub mod tree_traits;
pub mod util;
pub mod view;

pub use builder::TreeBuilder;
pub use engine::TreeEngine;
pub use errors::{TreeError, TreeResult};
pub use mutator::TreeMutator;
pub use store::{NodeId, NodeRecord, NodeStore};
pub use traverse::{breadth_first, depth_first, BreadthFirst, DepthFirst};
pub use view::TreeView;
