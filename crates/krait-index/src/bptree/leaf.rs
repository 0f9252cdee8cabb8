//! Leaf nodes: sorted key/value slots and the sibling chain.

use std::fmt::Debug;
use std::ptr::NonNull;

use krait_common::{KraitError, Result};

use super::constants::LEAF_SLOTMAX;

/// Data-bearing terminal node.
///
/// `keys` and `values` are parallel buffers preallocated to [`LEAF_SLOTMAX`];
/// the live prefix is sorted non-decreasing. Sibling links are non-owning
/// pointers into leaves owned by the same tree (ownership runs root to leaf
/// through inner-node children only). They stay valid because every leaf is
/// boxed and the box is never reallocated while the tree is alive, and they
/// must never be followed once the owning tree is gone.
#[derive(Debug)]
pub struct LeafNode<K, V> {
    pub(crate) keys: Vec<K>,
    pub(crate) values: Vec<V>,
    pub(crate) left_sibling: Option<NonNull<LeafNode<K, V>>>,
    pub(crate) right_sibling: Option<NonNull<LeafNode<K, V>>>,
}

impl<K, V> LeafNode<K, V> {
    /// Creates an empty, unlinked leaf.
    pub(crate) fn new() -> Box<Self> {
        Box::new(Self {
            keys: Vec::with_capacity(LEAF_SLOTMAX),
            values: Vec::with_capacity(LEAF_SLOTMAX),
            left_sibling: None,
            right_sibling: None,
        })
    }

    /// Number of occupied slots.
    #[inline]
    pub(crate) fn slot_used(&self) -> usize {
        self.keys.len()
    }

    /// True if every slot is occupied.
    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.keys.len() == LEAF_SLOTMAX
    }
}

impl<K: Ord + Clone + Debug, V: Clone + Debug> LeafNode<K, V> {
    /// Insertion position for `key`: the smallest slot whose key is strictly
    /// greater, so equal keys land after existing equal keys.
    pub(crate) fn insert_slot(&self, key: &K) -> usize {
        self.keys
            .iter()
            .position(|k| key < k)
            .unwrap_or(self.keys.len())
    }

    /// Scan position for `key`: the smallest slot whose key is greater than
    /// or equal, so a scan starting here sees every pair with key >= `key`.
    pub(crate) fn seek_slot(&self, key: &K) -> usize {
        self.keys
            .iter()
            .position(|k| k >= key)
            .unwrap_or(self.keys.len())
    }

    /// Writes `(key, value)` at `position`, shifting later slots right.
    pub(crate) fn insert_at(&mut self, position: usize, key: K, value: V) -> Result<()> {
        if position > self.slot_used() {
            return Err(KraitError::InvalidPosition {
                position,
                slot_used: self.slot_used(),
            });
        }
        if self.is_full() {
            return Err(KraitError::NodeFull);
        }
        self.keys.insert(position, key);
        self.values.insert(position, value);
        Ok(())
    }

    /// Inserts `(key, value)`, splitting this leaf when full.
    ///
    /// On split the upper half of the slots moves into a new right sibling
    /// and the sibling's first key is copied up as the split key. The
    /// incoming pair then goes left or right of that key, and the new leaf
    /// is spliced into the sibling chain. Returns the new sibling and split
    /// key for the parent to install.
    pub(crate) fn insert(
        &mut self,
        key: K,
        value: V,
        unique: bool,
    ) -> Result<Option<(Box<LeafNode<K, V>>, K)>> {
        let position = self.insert_slot(&key);
        if unique && position > 0 && self.keys[position - 1] == key {
            return Err(KraitError::DuplicateKey);
        }

        if !self.is_full() {
            self.insert_at(position, key, value)?;
            return Ok(None);
        }

        let mid = self.slot_used() / 2;
        let mut right = LeafNode::new();
        right.keys.extend(self.keys.drain(mid..));
        right.values.extend(self.values.drain(mid..));
        let split_key = right.keys[0].clone();
        tracing::debug!(split_key = ?split_key, moved = right.slot_used(), "leaf split");

        if key < split_key {
            let position = self.insert_slot(&key);
            self.insert_at(position, key, value)?;
        } else {
            let position = right.insert_slot(&key);
            right.insert_at(position, key, value)?;
        }

        // Splice the new leaf in directly after this one.
        let self_ptr = NonNull::from(&mut *self);
        let right_ptr = NonNull::from(&mut *right);
        right.left_sibling = Some(self_ptr);
        right.right_sibling = self.right_sibling;
        if let Some(mut old_right) = self.right_sibling {
            // SAFETY: the old right sibling is owned by the same tree this
            // leaf belongs to, and the caller holds the tree exclusively.
            unsafe { old_right.as_mut().left_sibling = Some(right_ptr) };
        }
        self.right_sibling = Some(right_ptr);

        Ok(Some((right, split_key)))
    }
}
