//! Structural integrity validation.
//!
//! A bounded recursive traversal that validates every invariant the insert
//! path is supposed to preserve: in-node key order, the separator range
//! each subtree must stay inside, uniform leaf depth, and a leaf sibling
//! chain that visits every pair exactly once in order. The first
//! discrepancy is reported and the walk stops.

use std::fmt::Debug;
use std::ptr::NonNull;

use krait_common::{KraitError, NodeKind, Result, ViolationKind};

use super::leaf::LeafNode;
use super::node::Node;
use super::tree::BPlusTree;

/// Leaf and key totals gathered by the recursive walk, cross-checked
/// against what the sibling chain reaches.
struct Tally {
    leaves: usize,
    keys: usize,
}

fn violation(kind: ViolationKind, node: NodeKind, depth: usize, slot: usize) -> KraitError {
    KraitError::IntegrityViolation {
        kind,
        node,
        depth,
        slot,
    }
}

impl<K: Ord + Clone + Debug, V: Clone + Debug> BPlusTree<K, V> {
    /// Validates the whole tree, failing with
    /// [`KraitError::IntegrityViolation`] on the first broken invariant.
    pub fn check_integrity(&self) -> Result<()> {
        let Some(root) = self.root.as_ref() else {
            return Ok(());
        };
        let mut leaf_depth = None;
        let mut tally = Tally { leaves: 0, keys: 0 };
        check_node(root, None, None, 0, true, &mut leaf_depth, &mut tally)?;
        check_leaf_chain(root, &tally, leaf_depth.unwrap_or(0))
    }
}

/// Validates one node and recurses into its children, narrowing the
/// permitted key range at every separator.
fn check_node<K: Ord, V>(
    node: &Node<K, V>,
    lower: Option<&K>,
    upper: Option<&K>,
    depth: usize,
    is_root: bool,
    leaf_depth: &mut Option<usize>,
    tally: &mut Tally,
) -> Result<()> {
    let kind = node.kind();

    let keys: &[K] = match node {
        Node::Leaf(leaf) => &leaf.keys,
        Node::Inner(inner) => &inner.keys,
    };

    if keys.is_empty() && !is_root {
        return Err(violation(ViolationKind::EmptyNode, kind, depth, 0));
    }
    for i in 1..keys.len() {
        if keys[i - 1] > keys[i] {
            return Err(violation(ViolationKind::KeyOrder, kind, depth, i));
        }
    }
    if let (Some(lower), Some(first)) = (lower, keys.first()) {
        if first < lower {
            return Err(violation(ViolationKind::BelowLowerBound, kind, depth, 0));
        }
    }
    if let (Some(upper), Some(last)) = (upper, keys.last()) {
        if last > upper {
            return Err(violation(
                ViolationKind::AboveUpperBound,
                kind,
                depth,
                keys.len() - 1,
            ));
        }
    }

    match node {
        Node::Leaf(leaf) => {
            match *leaf_depth {
                None => *leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(violation(ViolationKind::UnevenDepth, kind, depth, 0));
                }
                Some(_) => {}
            }
            tally.leaves += 1;
            tally.keys += leaf.slot_used();
        }
        Node::Inner(inner) => {
            let separators = inner.slot_used();
            if inner.children.len() != separators + 1 {
                return Err(violation(
                    ViolationKind::ChildCount,
                    kind,
                    depth,
                    inner.children.len(),
                ));
            }
            for (i, child) in inner.children.iter().enumerate() {
                let child_lower = if i == 0 { lower } else { Some(&inner.keys[i - 1]) };
                let child_upper = if i == separators { upper } else { Some(&inner.keys[i]) };
                check_node(
                    child,
                    child_lower,
                    child_upper,
                    depth + 1,
                    false,
                    leaf_depth,
                    tally,
                )?;
            }
        }
    }

    Ok(())
}

/// Walks the sibling chain from the leftmost leaf: back-links must mirror
/// forward links, keys must stay non-decreasing across leaf boundaries,
/// and the chain must reach exactly the leaves the tree owns.
fn check_leaf_chain<K: Ord + Clone + Debug, V: Clone + Debug>(
    root: &Node<K, V>,
    tally: &Tally,
    leaf_depth: usize,
) -> Result<()> {
    let mut visited_leaves = 0;
    let mut visited_keys = 0;
    let mut prev_ptr: Option<NonNull<LeafNode<K, V>>> = None;
    let mut prev_last: Option<K> = None;
    let mut current = Some(NonNull::from(root.leftmost_leaf()));

    while let Some(ptr) = current {
        // SAFETY: chain pointers reference leaves owned by the tree behind
        // `root`, which the shared borrow keeps alive.
        let leaf = unsafe { ptr.as_ref() };

        if leaf.left_sibling.map(NonNull::as_ptr) != prev_ptr.map(NonNull::as_ptr) {
            return Err(violation(
                ViolationKind::BrokenSiblingChain,
                NodeKind::Leaf,
                leaf_depth,
                0,
            ));
        }
        if let (Some(prev), Some(first)) = (&prev_last, leaf.keys.first()) {
            if prev > first {
                return Err(violation(
                    ViolationKind::SiblingOrder,
                    NodeKind::Leaf,
                    leaf_depth,
                    0,
                ));
            }
        }

        visited_leaves += 1;
        visited_keys += leaf.slot_used();
        if visited_leaves > tally.leaves {
            return Err(violation(
                ViolationKind::BrokenSiblingChain,
                NodeKind::Leaf,
                leaf_depth,
                0,
            ));
        }

        if let Some(last) = leaf.keys.last() {
            prev_last = Some(last.clone());
        }
        prev_ptr = Some(ptr);
        current = leaf.right_sibling;
    }

    if visited_leaves != tally.leaves || visited_keys != tally.keys {
        return Err(violation(
            ViolationKind::BrokenSiblingChain,
            NodeKind::Leaf,
            leaf_depth,
            0,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bptree::constants::LEAF_SLOTMAX;
    use crate::bptree::inner::InnerNode;

    fn violation_kind(err: KraitError) -> ViolationKind {
        match err {
            KraitError::IntegrityViolation { kind, .. } => kind,
            other => panic!("expected integrity violation, got {other}"),
        }
    }

    #[test]
    fn test_empty_tree_passes() {
        let tree: BPlusTree<i64, i64> = BPlusTree::new();
        tree.check_integrity().unwrap();
    }

    #[test]
    fn test_populated_tree_passes() {
        let mut tree = BPlusTree::new();
        for i in 0..10_000 {
            tree.insert(i, i).unwrap();
        }
        tree.check_integrity().unwrap();
    }

    #[test]
    fn test_detects_key_order_violation() {
        let mut tree = BPlusTree::new();
        for i in 0..3 {
            tree.insert(i, i).unwrap();
        }
        match tree.root.as_mut().unwrap() {
            Node::Leaf(leaf) => leaf.keys.swap(0, 2),
            Node::Inner(_) => unreachable!(),
        }
        let err = tree.check_integrity().unwrap_err();
        assert_eq!(violation_kind(err), ViolationKind::KeyOrder);
    }

    fn leaf(keys: &[i64]) -> Box<LeafNode<i64, i64>> {
        let mut leaf = LeafNode::new();
        for &k in keys {
            leaf.keys.push(k);
            leaf.values.push(k);
        }
        leaf
    }

    #[test]
    fn test_detects_separator_bound_violation() {
        // The right child holds a key below its lower separator.
        let mut inner = InnerNode::new();
        inner.keys.push(10);
        inner.children.push(Node::Leaf(leaf(&[1, 2])));
        inner.children.push(Node::Leaf(leaf(&[5, 12])));

        let mut tree = BPlusTree::new();
        tree.root = Some(Node::Inner(inner));

        let err = tree.check_integrity().unwrap_err();
        assert_eq!(violation_kind(err), ViolationKind::BelowLowerBound);
    }

    #[test]
    fn test_detects_uneven_leaf_depth() {
        let mut deep = InnerNode::new();
        deep.keys.push(30);
        deep.children.push(Node::Leaf(leaf(&[20])));
        deep.children.push(Node::Leaf(leaf(&[40])));

        let mut inner = InnerNode::new();
        inner.keys.push(10);
        inner.children.push(Node::Leaf(leaf(&[1])));
        inner.children.push(Node::Inner(deep));

        let mut tree = BPlusTree::new();
        tree.root = Some(Node::Inner(inner));

        let err = tree.check_integrity().unwrap_err();
        assert_eq!(violation_kind(err), ViolationKind::UnevenDepth);
    }

    #[test]
    fn test_detects_broken_sibling_chain() {
        let mut tree = BPlusTree::new();
        for i in 0..=LEAF_SLOTMAX as i64 {
            tree.insert(i, i).unwrap();
        }
        match tree.root.as_mut().unwrap() {
            Node::Inner(inner) => match &mut inner.children[0] {
                Node::Leaf(left) => left.right_sibling = None,
                Node::Inner(_) => unreachable!(),
            },
            Node::Leaf(_) => unreachable!(),
        }
        let err = tree.check_integrity().unwrap_err();
        assert_eq!(violation_kind(err), ViolationKind::BrokenSiblingChain);
    }

    #[test]
    fn test_detects_empty_non_root_node() {
        let mut inner = InnerNode::new();
        inner.keys.push(10);
        inner.children.push(Node::Leaf(leaf(&[])));
        inner.children.push(Node::Leaf(leaf(&[10])));

        let mut tree = BPlusTree::new();
        tree.root = Some(Node::Inner(inner));

        let err = tree.check_integrity().unwrap_err();
        assert_eq!(violation_kind(err), ViolationKind::EmptyNode);
    }
}
