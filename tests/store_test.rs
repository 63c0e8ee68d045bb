//! Tests for NodeStore

use treestore::{NodeId, NodeStore, TreeError};

#[ctor::ctor]
fn init() {
    treestore::util::testing::init_test_setup();
}

#[test]
fn given_empty_store_when_creating_then_returns_unique_ids() {
    // Arrange
    let mut store = NodeStore::new();

    // Act
    let a = store.create("a");
    let b = store.create("b");
    let c = store.create("");

    // Assert
    assert_eq!(store.len(), 3);
    assert!(a < b && b < c, "ids increase monotonically");
    let record = store.get(a).unwrap();
    assert_eq!(record.name, "a");
    assert_eq!(record.parent, None);
    assert!(record.children.is_empty());
    assert_eq!(store.get(c).unwrap().name, "", "empty name is allowed");
}

#[test]
fn given_missing_id_when_getting_then_not_found() {
    let store = NodeStore::new();
    assert_eq!(
        store.get(NodeId(99)).unwrap_err(),
        TreeError::NotFound(NodeId(99))
    );
}

#[test]
fn given_node_when_renaming_then_name_changes_and_structure_does_not() {
    // Arrange
    let mut store = NodeStore::new();
    let a = store.create("old");

    // Act
    store.set_name(a, "new").unwrap();

    // Assert
    let record = store.get(a).unwrap();
    assert_eq!(record.name, "new");
    assert!(record.children.is_empty());
}

#[test]
fn given_missing_id_when_renaming_then_not_found() {
    let mut store = NodeStore::new();
    assert_eq!(
        store.set_name(NodeId(1), "x").unwrap_err(),
        TreeError::NotFound(NodeId(1))
    );
}

#[test]
fn given_created_nodes_when_listing_all_ids_then_every_id_is_present_and_ordered() {
    // Arrange
    let mut store = NodeStore::new();
    let mut created = Vec::new();
    for i in 0..5 {
        created.push(store.create(&format!("n{}", i)));
    }

    // Act
    let ids: Vec<NodeId> = store.all_ids().into_iter().collect();

    // Assert
    assert_eq!(ids, created, "all_ids is ordered and complete");
    assert!(created.iter().all(|&id| store.exists(id)));
    assert!(!store.exists(NodeId(0)));
}
