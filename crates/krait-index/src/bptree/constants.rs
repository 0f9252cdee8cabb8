//! Compile-time capacity knobs for the B+ tree.

/// Number of key/value slots in each leaf node.
///
/// Slots are contiguous, so position lookups are cache-friendly scans and
/// the fill check is a single length comparison. 256 slots keep the tree
/// at height 4 for a million fixed-width keys.
pub const LEAF_SLOTMAX: usize = 256;

/// Number of separator key slots in each inner node. An inner node holds
/// one more child reference than separators.
pub const INNER_SLOTMAX: usize = 256;
