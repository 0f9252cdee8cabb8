//! Node variants and dispatch.

use std::fmt::Debug;

use krait_common::{NodeKind, Result};

use super::inner::InnerNode;
use super::leaf::LeafNode;

/// A B+ tree node, either a data-bearing leaf or a router.
///
/// The set of variants is closed and permanent; operations dispatch with a
/// direct match. Callers enter through [`super::tree::BPlusTree`].
pub enum Node<K, V> {
    Leaf(Box<LeafNode<K, V>>),
    Inner(Box<InnerNode<K, V>>),
}

/// Outcome of an insert that overflowed a node: the newly allocated right
/// sibling plus the separator key the parent must install to its left.
pub(crate) struct Split<K, V> {
    pub(crate) key: K,
    pub(crate) right: Node<K, V>,
}

impl<K, V> Node<K, V> {
    #[inline]
    pub(crate) fn kind(&self) -> NodeKind {
        match self {
            Node::Leaf(_) => NodeKind::Leaf,
            Node::Inner(_) => NodeKind::Inner,
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Number of occupied key slots.
    #[inline]
    pub(crate) fn slot_used(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.slot_used(),
            Node::Inner(inner) => inner.slot_used(),
        }
    }
}

impl<K: Ord + Clone + Debug, V: Clone + Debug> Node<K, V> {
    /// Inserts into this subtree, surfacing a [`Split`] when this node had
    /// to divide and the parent must absorb the new sibling.
    pub(crate) fn insert(&mut self, key: K, value: V, unique: bool) -> Result<Option<Split<K, V>>> {
        match self {
            Node::Leaf(leaf) => Ok(leaf.insert(key, value, unique)?.map(|(right, split_key)| {
                Split {
                    key: split_key,
                    right: Node::Leaf(right),
                }
            })),
            Node::Inner(inner) => inner.insert(key, value, unique),
        }
    }

    /// Leftmost leaf of this subtree.
    pub(crate) fn leftmost_leaf(&self) -> &LeafNode<K, V> {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Inner(inner) => inner.children[0].leftmost_leaf(),
        }
    }

    /// Leaf where a scan for keys >= `key` starts.
    ///
    /// Descent takes the child left of the first separator >= `key`; when
    /// every qualifying pair lives further right, the scan reaches it
    /// through the sibling chain rather than a second descent.
    pub(crate) fn seek_leaf(&self, key: &K) -> &LeafNode<K, V> {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Inner(inner) => inner.children[inner.seek_child(key)].seek_leaf(key),
        }
    }
}
