//! In-memory B+ tree index.
//!
//! All key/value pairs live in leaf nodes; inner nodes hold separator keys
//! that route descent. Leaves are doubly linked in key order so range scans
//! run along the leaf level without touching inner nodes:
//!
//! ```text
//!                     [ inner: s0 | s1 ]
//!                    /        |        \
//!            [leaf A]    [leaf B]    [leaf C]
//!               <-----------><----------->        (sibling chain)
//! ```
//!
//! Inserts descend to the target leaf and split on overflow. A leaf split
//! copies its new right sibling's first key up as the separator; an inner
//! split promotes its middle key (the promoted key is removed from both
//! halves). When the root itself splits, a new inner root is installed with
//! the old root and the new sibling as its two children, which is the only
//! place the tree grows in height.
//!
//! The tree is single-threaded: every operation runs to completion under
//! `&self`/`&mut self`, and callers that share a tree across threads wrap
//! the whole tree in a `SharedLatch` (exclusive for insert, shared for
//! scans). There is no node-level latching.

pub mod check;
pub mod constants;
pub mod inner;
pub mod iter;
pub mod leaf;
pub mod node;
pub mod print;
pub mod tree;

pub use iter::ForwardIter;
pub use tree::BPlusTree;
