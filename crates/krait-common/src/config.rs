//! Configuration structures for KraitDB.

use serde::{Deserialize, Serialize};

/// Detail level for index structure printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Per-level node and key counts only.
    #[default]
    Summary,
    /// Summary plus one line per node with its key range.
    ExpandLeaves,
    /// ExpandLeaves plus every key/value pair held by each leaf.
    ShowTuples,
}

/// Index subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Default detail level for structure printing.
    pub verbosity: VerbosityLevel,
    /// Run a full integrity check after every insert. Expensive; intended
    /// for debug builds and tests.
    pub validate_after_insert: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            verbosity: VerbosityLevel::Summary,
            validate_after_insert: false,
        }
    }
}
