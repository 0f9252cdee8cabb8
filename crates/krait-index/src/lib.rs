//! KraitDB in-memory B+ tree index.
//!
//! This crate provides the ordered secondary-index structure used by the
//! KraitDB storage engine: an in-memory B+ tree mapping ordered keys to
//! values, with point insertion, forward range scans over a linked leaf
//! level, and structural integrity validation.

pub mod bptree;

pub use bptree::{BPlusTree, ForwardIter};
pub use bptree::constants::{INNER_SLOTMAX, LEAF_SLOTMAX};
pub use krait_common::{IndexConfig, KraitError, Result, VerbosityLevel};
