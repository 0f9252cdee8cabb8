//! Error types for KraitDB.

use thiserror::Error;

/// Result type alias using KraitError.
pub type Result<T> = std::result::Result<T, KraitError>;

/// Node variant named in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Data-bearing terminal node.
    Leaf,
    /// Router node holding separator keys.
    Inner,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Leaf => write!(f, "leaf"),
            NodeKind::Inner => write!(f, "inner"),
        }
    }
}

/// Structural invariant violated during an integrity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Adjacent keys within a node are out of order.
    KeyOrder,
    /// A key is smaller than the lower bound inherited from the parent.
    BelowLowerBound,
    /// A key is larger than the upper bound inherited from the parent.
    AboveUpperBound,
    /// A non-root node holds no keys.
    EmptyNode,
    /// An inner node's child count does not equal its key count plus one.
    ChildCount,
    /// Leaves are not all at the same depth.
    UnevenDepth,
    /// The leaf sibling chain skips, revisits, or fails to terminate.
    BrokenSiblingChain,
    /// Keys are out of order across the leaf sibling chain.
    SiblingOrder,
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ViolationKind::KeyOrder => "key order",
            ViolationKind::BelowLowerBound => "key below lower bound",
            ViolationKind::AboveUpperBound => "key above upper bound",
            ViolationKind::EmptyNode => "empty non-root node",
            ViolationKind::ChildCount => "child count mismatch",
            ViolationKind::UnevenDepth => "uneven leaf depth",
            ViolationKind::BrokenSiblingChain => "broken sibling chain",
            ViolationKind::SiblingOrder => "sibling chain key order",
        };
        write!(f, "{}", name)
    }
}

/// Errors that can occur in KraitDB operations.
#[derive(Debug, Error)]
pub enum KraitError {
    // B+ tree errors
    #[error("node is full, write requires a split")]
    NodeFull,

    #[error("slot position {position} exceeds occupied slots {slot_used}")]
    InvalidPosition { position: usize, slot_used: usize },

    #[error("duplicate key")]
    DuplicateKey,

    #[error("integrity violation: {kind} in {node} node at depth {depth}, slot {slot}")]
    IntegrityViolation {
        kind: ViolationKind,
        node: NodeKind,
        depth: usize,
        slot: usize,
    },

    // Iteration errors
    #[error("scan exhausted")]
    EndOfScan,

    // Surface errors
    #[error("operation not implemented: {0}")]
    Unimplemented(&'static str),

    #[error("configuration error: {0}")]
    ConfigError(String),

    // Internal errors
    #[error("internal error: {0}")]
    Internal(String),
}
