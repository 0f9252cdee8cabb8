//! Forward iteration along the leaf sibling chain.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::ptr::NonNull;

use krait_common::{KraitError, Result};

use super::leaf::LeafNode;
use super::tree::BPlusTree;

/// Forward iterator over a tree's pairs in non-decreasing key order.
///
/// A position is a leaf plus a slot index within it. The sequence is
/// finite, forward-only, and non-restartable; the borrow of the tree keeps
/// the leaf chain immutable for the iterator's lifetime.
pub struct ForwardIter<'a, K, V> {
    leaf: Option<NonNull<LeafNode<K, V>>>,
    slot: usize,
    _tree: PhantomData<&'a BPlusTree<K, V>>,
}

impl<'a, K, V> ForwardIter<'a, K, V> {
    /// An iterator that is already exhausted.
    pub(crate) fn at_end() -> Self {
        Self {
            leaf: None,
            slot: 0,
            _tree: PhantomData,
        }
    }

    /// Iterator at `(leaf, slot)`. A slot past the leaf's last key rolls
    /// forward through the sibling chain, landing at-end when nothing
    /// follows.
    pub(crate) fn positioned(leaf: NonNull<LeafNode<K, V>>, slot: usize) -> Self {
        let mut leaf = Some(leaf);
        let mut slot = slot;
        while let Some(current) = leaf {
            // SAFETY: chain pointers reference leaves owned by the tree
            // borrowed for 'a.
            let current = unsafe { current.as_ref() };
            if slot < current.slot_used() {
                break;
            }
            leaf = current.right_sibling;
            slot = 0;
        }
        Self {
            leaf,
            slot,
            _tree: PhantomData,
        }
    }

    /// True when no pair remains.
    pub fn is_end(&self) -> bool {
        match self.leaf {
            None => true,
            Some(leaf) => {
                // SAFETY: see `positioned`.
                let leaf = unsafe { leaf.as_ref() };
                self.slot >= leaf.slot_used() && leaf.right_sibling.is_none()
            }
        }
    }

    /// Moves one pair forward, crossing into the right sibling when the
    /// current leaf is spent.
    pub fn advance(&mut self) -> Result<()> {
        let Some(leaf) = self.leaf else {
            return Err(KraitError::EndOfScan);
        };
        // SAFETY: see `positioned`.
        let leaf = unsafe { leaf.as_ref() };
        if self.slot >= leaf.slot_used() && leaf.right_sibling.is_none() {
            return Err(KraitError::EndOfScan);
        }
        if self.slot + 1 < leaf.slot_used() {
            self.slot += 1;
        } else {
            self.leaf = leaf.right_sibling;
            self.slot = 0;
        }
        Ok(())
    }
}

impl<'a, K: Clone, V: Clone> ForwardIter<'a, K, V> {
    /// The pair at the current position, by copy.
    pub fn current(&self) -> Result<(K, V)> {
        let leaf = self.leaf.ok_or(KraitError::EndOfScan)?;
        // SAFETY: see `positioned`.
        let leaf = unsafe { leaf.as_ref() };
        if self.slot >= leaf.slot_used() {
            return Err(KraitError::EndOfScan);
        }
        Ok((leaf.keys[self.slot].clone(), leaf.values[self.slot].clone()))
    }
}

impl<'a, K: Ord + Clone + Debug, V: Clone + Debug> Iterator for ForwardIter<'a, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let pair = self.current().ok()?;
        let _ = self.advance();
        Some(pair)
    }
}
