//! Inner nodes: separator keys routing to owned child subtrees.

use std::fmt::Debug;

use krait_common::{KraitError, Result};

use super::constants::INNER_SLOTMAX;
use super::node::{Node, Split};

/// Router node.
///
/// Holds `slotused` separator keys and `slotused + 1` owned children.
/// Child `i` covers keys below `keys[i]`; the last child covers keys at or
/// above the final separator. The leftmost child has no lower separator
/// here, the rightmost no upper one.
pub struct InnerNode<K, V> {
    pub(crate) keys: Vec<K>,
    pub(crate) children: Vec<Node<K, V>>,
}

impl<K, V> InnerNode<K, V> {
    /// Creates an empty inner node.
    pub(crate) fn new() -> Box<Self> {
        Box::new(Self {
            keys: Vec::with_capacity(INNER_SLOTMAX),
            children: Vec::with_capacity(INNER_SLOTMAX + 1),
        })
    }

    /// Number of occupied separator slots.
    #[inline]
    pub(crate) fn slot_used(&self) -> usize {
        self.keys.len()
    }

    /// True if every separator slot is occupied.
    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.keys.len() == INNER_SLOTMAX
    }
}

impl<K: Ord + Clone + Debug, V: Clone + Debug> InnerNode<K, V> {
    /// Child index to descend into for an insert of `key`: the smallest
    /// slot whose separator is strictly greater. Equal keys descend right,
    /// matching the leaf-level tie-break.
    pub(crate) fn descend_slot(&self, key: &K) -> usize {
        self.keys
            .iter()
            .position(|k| key < k)
            .unwrap_or(self.keys.len())
    }

    /// Child index where a scan for keys >= `key` starts: the child left of
    /// the first separator greater than or equal to `key`.
    pub(crate) fn seek_child(&self, key: &K) -> usize {
        self.keys
            .iter()
            .position(|k| k >= key)
            .unwrap_or(self.keys.len())
    }

    /// Installs `new_key` at `position` with `right_child` directly to its
    /// right. The child already at `position` keeps all keys below
    /// `new_key` and stays where it is.
    pub(crate) fn insert_at(
        &mut self,
        position: usize,
        new_key: K,
        right_child: Node<K, V>,
    ) -> Result<()> {
        if position > self.slot_used() {
            return Err(KraitError::InvalidPosition {
                position,
                slot_used: self.slot_used(),
            });
        }
        if self.is_full() {
            return Err(KraitError::NodeFull);
        }
        self.keys.insert(position, new_key);
        self.children.insert(position + 1, right_child);
        Ok(())
    }

    /// Recurses into the covering child and absorbs any split it reports,
    /// splitting this node in turn when it cannot take another separator.
    ///
    /// An inner split promotes the middle key: separators above it and
    /// their children move to the new right sibling, and the promoted key
    /// itself is removed from both halves before being handed to the
    /// parent. The pending separator then lands in whichever half its
    /// descent position falls into.
    pub(crate) fn insert(&mut self, key: K, value: V, unique: bool) -> Result<Option<Split<K, V>>> {
        let position = self.descend_slot(&key);
        let Some(split) = self.children[position].insert(key, value, unique)? else {
            return Ok(None);
        };

        if !self.is_full() {
            self.insert_at(position, split.key, split.right)?;
            return Ok(None);
        }

        let mid = self.slot_used() / 2;
        let promoted = self.keys[mid].clone();
        let mut right = InnerNode::new();
        right.keys.extend(self.keys.drain(mid + 1..));
        right.children.extend(self.children.drain(mid + 1..));
        self.keys.truncate(mid);
        tracing::debug!(promoted = ?promoted, moved = right.slot_used(), "inner split");

        if position <= mid {
            self.insert_at(position, split.key, split.right)?;
        } else {
            right.insert_at(position - (mid + 1), split.key, split.right)?;
        }

        Ok(Some(Split {
            key: promoted,
            right: Node::Inner(right),
        }))
    }
}
