//! Text rendering of the tree structure.
//!
//! Diagnostics only; no correctness feature depends on the output shape.

use std::fmt::{Debug, Write};

use krait_common::VerbosityLevel;

use super::node::Node;
use super::tree::BPlusTree;

impl<K: Ord + Clone + Debug, V: Clone + Debug> BPlusTree<K, V> {
    /// Renders the structure at the given detail level.
    pub fn render(&self, verbosity: VerbosityLevel) -> String {
        let Some(root) = self.root.as_ref() else {
            return "b+tree (empty)".to_string();
        };

        let mut out = String::new();
        let _ = writeln!(out, "b+tree height={} keys={}", self.height(), self.len());
        match verbosity {
            VerbosityLevel::Summary => render_summary(root, &mut out),
            VerbosityLevel::ExpandLeaves | VerbosityLevel::ShowTuples => {
                render_node(root, 0, verbosity, &mut out)
            }
        }
        out
    }

    /// Prints the structure to standard output at the configured detail
    /// level.
    pub fn print_structure(&self) {
        println!("{}", self.render(self.config.verbosity));
    }
}

/// One line per level with node and key totals.
fn render_summary<K: Ord + Clone + Debug, V: Clone + Debug>(root: &Node<K, V>, out: &mut String) {
    let mut levels: Vec<(usize, usize)> = Vec::new();
    summarize(root, 0, &mut levels);

    let leaf_level = levels.len() - 1;
    for (depth, (nodes, keys)) in levels.iter().enumerate() {
        let _ = if depth == leaf_level {
            writeln!(out, "level {depth}: {nodes} leaves, {keys} keys")
        } else {
            writeln!(out, "level {depth}: {nodes} inner nodes, {keys} separators")
        };
    }
}

fn summarize<K, V>(node: &Node<K, V>, depth: usize, levels: &mut Vec<(usize, usize)>) {
    if levels.len() <= depth {
        levels.push((0, 0));
    }
    levels[depth].0 += 1;
    levels[depth].1 += node.slot_used();
    if let Node::Inner(inner) = node {
        for child in &inner.children {
            summarize(child, depth + 1, levels);
        }
    }
}

/// One indented line per node; leaves expand their pairs at `ShowTuples`.
fn render_node<K: Ord + Clone + Debug, V: Clone + Debug>(
    node: &Node<K, V>,
    depth: usize,
    verbosity: VerbosityLevel,
    out: &mut String,
) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Inner(inner) => {
            let _ = match (inner.keys.first(), inner.keys.last()) {
                (Some(first), Some(last)) => writeln!(
                    out,
                    "{indent}inner slots={} separators {first:?}..{last:?}",
                    inner.slot_used()
                ),
                _ => writeln!(out, "{indent}inner slots=0"),
            };
            for child in &inner.children {
                render_node(child, depth + 1, verbosity, out);
            }
        }
        Node::Leaf(leaf) => {
            let _ = match (leaf.keys.first(), leaf.keys.last()) {
                (Some(first), Some(last)) => writeln!(
                    out,
                    "{indent}leaf slots={} keys {first:?}..{last:?}",
                    leaf.slot_used()
                ),
                _ => writeln!(out, "{indent}leaf slots=0"),
            };
            if verbosity == VerbosityLevel::ShowTuples {
                for (key, value) in leaf.keys.iter().zip(leaf.values.iter()) {
                    let _ = writeln!(out, "{indent}  ({key:?}, {value:?})");
                }
            }
        }
    }
}
