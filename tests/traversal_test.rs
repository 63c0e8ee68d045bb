//! Tests for depth-first / breadth-first traversal over built views

use treestore::{breadth_first, depth_first, NodeId, NodeStore, TreeBuilder, TreeMutator};

#[ctor::ctor]
fn init() {
    treestore::util::testing::init_test_setup();
}

fn build_sample() -> (treestore::TreeView, Vec<NodeId>) {
    // 0
    // ├── 1
    // │   ├── 3
    // │   └── 4
    // └── 2
    //     └── 5
    let mut store = NodeStore::new();
    let ids: Vec<NodeId> = (0..6).map(|i| store.create(&format!("n{}", i))).collect();
    {
        let mut mutator = TreeMutator::new(&mut store);
        mutator.insert_child(ids[0], ids[1], 0).unwrap();
        mutator.insert_child(ids[0], ids[2], 1).unwrap();
        mutator.insert_child(ids[1], ids[3], 0).unwrap();
        mutator.insert_child(ids[1], ids[4], 1).unwrap();
        mutator.insert_child(ids[2], ids[5], 0).unwrap();
    }
    let view = TreeBuilder::new(&store).build(ids[0]).unwrap();
    (view, ids)
}

#[test]
fn given_view_when_walking_depth_first_then_preorder_with_children_in_list_order() {
    let (view, ids) = build_sample();
    let order: Vec<NodeId> = depth_first(&view).map(|n| n.id).collect();
    assert_eq!(order, vec![ids[0], ids[1], ids[3], ids[4], ids[2], ids[5]]);
}

#[test]
fn given_view_when_walking_breadth_first_then_level_order() {
    let (view, ids) = build_sample();
    let order: Vec<NodeId> = breadth_first(&view).map(|n| n.id).collect();
    assert_eq!(order, vec![ids[0], ids[1], ids[2], ids[3], ids[4], ids[5]]);
}

#[test]
fn given_view_when_walking_twice_then_same_sequence() {
    let (view, _ids) = build_sample();
    let first: Vec<NodeId> = depth_first(&view).map(|n| n.id).collect();
    let second: Vec<NodeId> = depth_first(&view).map(|n| n.id).collect();
    assert_eq!(first, second, "traversal restarts fresh, view untouched");
}

#[test]
fn given_traversal_when_taking_lazily_then_prefix_matches() {
    let (view, ids) = build_sample();
    let prefix: Vec<NodeId> = depth_first(&view).take(3).map(|n| n.id).collect();
    assert_eq!(prefix, vec![ids[0], ids[1], ids[3]]);
}

#[test]
fn given_both_orders_when_walking_then_same_node_set() {
    let (view, _ids) = build_sample();
    let mut dfs: Vec<NodeId> = depth_first(&view).map(|n| n.id).collect();
    let mut bfs: Vec<NodeId> = breadth_first(&view).map(|n| n.id).collect();
    dfs.sort();
    bfs.sort();
    assert_eq!(dfs, bfs);
}
