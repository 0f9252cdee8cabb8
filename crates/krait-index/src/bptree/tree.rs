//! The tree object: owns the root and fronts every public operation.

use std::fmt::Debug;
use std::ptr::NonNull;

use krait_common::{IndexConfig, KraitError, Result};

use super::inner::InnerNode;
use super::iter::ForwardIter;
use super::leaf::LeafNode;
use super::node::{Node, Split};

/// In-memory B+ tree index mapping ordered keys to values.
///
/// Keys are non-unique: inserting the same key repeatedly stores every
/// pair, and scans yield equal keys in insertion order. See
/// [`BPlusTree::insert_unique`] for the rejecting variant.
pub struct BPlusTree<K, V> {
    pub(crate) root: Option<Node<K, V>>,
    pub(crate) config: IndexConfig,
}

// The sibling chain holds raw pointers, but every pointee is a leaf owned
// by this tree, so sending or sharing the tree is sound whenever the keys
// and values themselves allow it.
unsafe impl<K: Send, V: Send> Send for BPlusTree<K, V> {}
unsafe impl<K: Sync, V: Sync> Sync for BPlusTree<K, V> {}

impl<K, V> Default for BPlusTree<K, V> {
    fn default() -> Self {
        Self {
            root: None,
            config: IndexConfig::default(),
        }
    }
}

impl<K, V> BPlusTree<K, V> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree with the given configuration.
    pub fn with_config(config: IndexConfig) -> Self {
        Self { root: None, config }
    }

    /// True if no pair has ever been inserted.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl<K: Ord + Clone + Debug, V: Clone + Debug> BPlusTree<K, V> {
    /// Inserts `(key, value)`. Duplicate keys are kept.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        self.insert_impl(key, value, false)
    }

    /// Inserts `(key, value)`, failing with [`KraitError::DuplicateKey`]
    /// and leaving the tree unchanged when `key` is already present.
    ///
    /// Only meaningful on trees populated exclusively through this method;
    /// mixing with [`BPlusTree::insert`] lets duplicates in undetected.
    pub fn insert_unique(&mut self, key: K, value: V) -> Result<()> {
        self.insert_impl(key, value, true)
    }

    fn insert_impl(&mut self, key: K, value: V, unique: bool) -> Result<()> {
        tracing::trace!(key = ?key, "insert");
        let mut root = match self.root.take() {
            Some(node) => node,
            None => Node::Leaf(LeafNode::new()),
        };

        match root.insert(key, value, unique) {
            Ok(None) => {
                self.root = Some(root);
            }
            Ok(Some(split)) => {
                self.root = Some(Self::grown_root(root, split));
                tracing::debug!(height = self.height(), "root split; tree grew one level");
            }
            Err(err) => {
                self.root = Some(root);
                if !matches!(err, KraitError::DuplicateKey) {
                    tracing::error!(error = %err, "insert failed\n{}", self.render(self.config.verbosity));
                }
                return Err(err);
            }
        }

        if self.config.validate_after_insert {
            self.check_integrity()?;
        }
        Ok(())
    }

    /// New inner root over the split halves of the old root. This is the
    /// only place the tree gains height.
    fn grown_root(old_root: Node<K, V>, split: Split<K, V>) -> Node<K, V> {
        let mut new_root = InnerNode::new();
        new_root.keys.push(split.key);
        new_root.children.push(old_root);
        new_root.children.push(split.right);
        Node::Inner(new_root)
    }

    /// Forward iterator positioned at the smallest key, or at-end on an
    /// empty tree.
    pub fn begin(&self) -> ForwardIter<'_, K, V> {
        match &self.root {
            None => ForwardIter::at_end(),
            Some(root) => ForwardIter::positioned(NonNull::from(root.leftmost_leaf()), 0),
        }
    }

    /// Forward iterator positioned at the first pair with key >=
    /// `start_key`, or at-end when no such pair exists.
    pub fn begin_at(&self, start_key: &K) -> ForwardIter<'_, K, V> {
        match &self.root {
            None => ForwardIter::at_end(),
            Some(root) => {
                let leaf = root.seek_leaf(start_key);
                let slot = leaf.seek_slot(start_key);
                ForwardIter::positioned(NonNull::from(leaf), slot)
            }
        }
    }

    /// Number of stored pairs, counted along the leaf chain.
    pub fn len(&self) -> usize {
        let Some(root) = &self.root else { return 0 };
        let mut count = 0;
        let mut current = Some(NonNull::from(root.leftmost_leaf()));
        while let Some(leaf) = current {
            // SAFETY: chain pointers reference leaves owned by this tree,
            // which `&self` keeps alive and unmodified.
            let leaf = unsafe { leaf.as_ref() };
            count += leaf.slot_used();
            current = leaf.right_sibling;
        }
        count
    }

    /// Distance from the root to the leaf level; 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut node = self.root.as_ref();
        while let Some(current) = node {
            height += 1;
            node = match current {
                Node::Leaf(_) => None,
                Node::Inner(inner) => Some(&inner.children[0]),
            };
        }
        height
    }
}
