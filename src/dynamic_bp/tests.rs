use super::*;
use pretty_assertions::assert_eq;

fn bit_string<P: Profiler>(tree: &DynamicBpTree<P>) -> String {
    format!("{}", tree)
}

#[test]
fn new_tree_is_root_only() {
    let tree = DynamicBpTree::new();
    assert_eq!(bit_string(&tree), "10");
    assert_eq!(tree.degree(0).unwrap(), 0);
    assert_eq!(tree.subtree_size(0).unwrap(), 1);
    assert!(tree.parent(0).is_err());
}

#[test]
fn delete_root_is_rejected() {
    let mut tree = DynamicBpTree::new();
    assert_eq!(tree.delete_node(0), Err(Error::DeleteRoot));
}

#[test]
fn insert_first_child_of_root() {
    let mut tree = DynamicBpTree::new();
    tree.insert_child(0, 1, 0).unwrap();
    assert_eq!(bit_string(&tree), "1100");
    assert_eq!(tree.degree(0).unwrap(), 1);
    assert_eq!(tree.child(0, 1).unwrap(), 1);
    assert_eq!(tree.parent(1).unwrap(), 0);
}

#[test]
fn scenario_a_tiny_bp() {
    let mut tree = DynamicBpTree::new();
    tree.insert_child(0, 1, 0).unwrap();
    tree.insert_child(0, 2, 0).unwrap();
    tree.insert_child(0, 3, 0).unwrap();
    tree.insert_child(0, 2, 1).unwrap();
    tree.insert_child(0, 1, 0).unwrap();
    tree.insert_child(0, 1, 2).unwrap();
    tree.insert_child(1, 2, 1).unwrap();

    assert_eq!(bit_string(&tree), "1110110001100100");

    let degrees = tree.degrees_preorder();
    assert_eq!(degrees, vec![3, 2, 0, 1, 0, 1, 0, 0]);

    assert_eq!(tree.subtree_size(0).unwrap(), 8);
}

#[test]
fn scenario_b_bp_delete() {
    let mut tree = DynamicBpTree::new();
    tree.insert_child(0, 1, 0).unwrap();
    tree.insert_child(0, 2, 0).unwrap();
    tree.insert_child(0, 3, 0).unwrap();
    tree.insert_child(0, 2, 1).unwrap();
    tree.insert_child(0, 1, 0).unwrap();
    tree.insert_child(0, 1, 2).unwrap();
    tree.insert_child(1, 2, 1).unwrap();

    // Scenario B names the nodes to delete by bit position, not preorder number; translate.
    let preorder_13 = tree.preorder_of(13);
    let preorder_2 = tree.preorder_of(2);
    tree.delete_node(preorder_13).unwrap();
    tree.delete_node(preorder_2).unwrap();

    assert_eq!(bit_string(&tree), "111100011000");
}

#[test]
fn child_and_parent_are_inverse() {
    let mut tree = DynamicBpTree::new();
    for i in 1..=5 {
        tree.insert_child(0, i, 0).unwrap();
    }
    for t in 1..=5 {
        let child = tree.child(0, t).unwrap();
        assert_eq!(tree.parent(child).unwrap(), 0);
    }
    assert_eq!(tree.degree(0).unwrap(), 5);
}

#[test]
fn subtree_size_matches_children_sum() {
    let mut tree = DynamicBpTree::new();
    tree.insert_child(0, 1, 0).unwrap();
    tree.insert_child(0, 2, 0).unwrap();
    tree.insert_child(1, 1, 0).unwrap();

    let degree = tree.degree(0).unwrap();
    let children_total: usize = (1..=degree)
        .map(|t| {
            let child = tree.child(0, t).unwrap();
            tree.subtree_size(child).unwrap()
        })
        .sum();
    assert_eq!(children_total, tree.subtree_size(0).unwrap() - 1);
}

#[test]
fn child_out_of_range_errs() {
    let tree = DynamicBpTree::new();
    assert!(tree.child(0, 1).is_err());
}

#[test]
fn node_out_of_range_errs_on_every_accessor() {
    let mut tree = DynamicBpTree::new();
    tree.insert_child(0, 1, 0).unwrap();
    assert_eq!(tree.len_nodes(), 2);

    assert!(matches!(tree.child(5, 1), Err(Error::NodeOutOfRange { v: 5, count: 2 })));
    assert!(matches!(tree.parent(5), Err(Error::NodeOutOfRange { v: 5, count: 2 })));
    assert!(matches!(
        tree.subtree_size(5),
        Err(Error::NodeOutOfRange { v: 5, count: 2 })
    ));
    assert!(matches!(tree.degree(5), Err(Error::NodeOutOfRange { v: 5, count: 2 })));
    assert!(matches!(
        tree.delete_node(5),
        Err(Error::NodeOutOfRange { v: 5, count: 2 })
    ));
    assert!(matches!(
        tree.insert_child(5, 1, 0),
        Err(Error::NodeOutOfRange { v: 5, count: 2 })
    ));
}

#[test]
fn insert_child_out_of_range_errs() {
    let mut tree = DynamicBpTree::new();
    assert!(tree.insert_child(0, 2, 0).is_err());
}

#[test]
fn flat_children_stress() {
    let mut tree = DynamicBpTree::new();
    let n = 2000;
    for _ in 0..n {
        tree.insert_child(0, 1, 0).unwrap();
    }
    assert_eq!(tree.degree(0).unwrap(), n);
    assert_eq!(tree.subtree_size(0).unwrap(), n + 1);
    for t in 1..=n {
        let child = tree.child(0, t).unwrap();
        assert_eq!(tree.degree(child).unwrap(), 0);
    }
}

#[test]
fn deleting_all_flat_children_returns_to_root() {
    let mut tree = DynamicBpTree::new();
    let n = 50;
    for _ in 0..n {
        tree.insert_child(0, 1, 0).unwrap();
    }
    while tree.degree(0).unwrap() > 0 {
        let child = tree.child(0, 1).unwrap();
        tree.delete_node(child).unwrap();
    }
    assert_eq!(bit_string(&tree), "10");
}

#[test]
fn linear_nesting() {
    let mut tree = DynamicBpTree::new();
    let mut current = 0;
    let n = 50;
    for _ in 0..n {
        tree.insert_child(current, 1, 0).unwrap();
        current = tree.child(current, 1).unwrap();
    }
    assert_eq!(tree.subtree_size(0).unwrap(), n + 1);
    assert_eq!(tree.degree(0).unwrap(), 1);
}
