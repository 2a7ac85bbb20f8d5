// src/encode/huffman/tree.rs

//! Huffman tree construction.
//!
//! The builder is the classic greedy minimum-weight merge. Pending nodes sit
//! in a binary heap keyed by `(weight, sequence)`: leaves take sequence numbers
//! in ascending symbol order and every merged node takes the next one, so equal
//! weights pop earliest-inserted first and the tree shape is reproducible.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::debug;

use super::frequency::FrequencyTable;

/// Node in a Huffman tree.
///
/// Internal children are optional only so the single-symbol tree can hang its
/// leaf off the left edge with no right sibling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Option<Box<HuffmanNode>>,
        right: Option<Box<HuffmanNode>>,
    },
}

impl HuffmanNode {
    /// Total frequency of the subtree.
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Left child, if this is an internal node that has one.
    pub fn left(&self) -> Option<&HuffmanNode> {
        match self {
            HuffmanNode::Internal { left, .. } => left.as_deref(),
            HuffmanNode::Leaf { .. } => None,
        }
    }

    /// Right child, if this is an internal node that has one.
    pub fn right(&self) -> Option<&HuffmanNode> {
        match self {
            HuffmanNode::Internal { right, .. } => right.as_deref(),
            HuffmanNode::Leaf { .. } => None,
        }
    }

    fn merge(left: HuffmanNode, right: HuffmanNode) -> Self {
        HuffmanNode::Internal {
            weight: left.weight() + right.weight(),
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 1,
            HuffmanNode::Internal { left, right, .. } => {
                left.as_ref().map_or(0, |n| n.leaf_count())
                    + right.as_ref().map_or(0, |n| n.leaf_count())
            }
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 0,
            HuffmanNode::Internal { left, right, .. } => {
                let l = left.as_ref().map_or(0, |n| n.depth());
                let r = right.as_ref().map_or(0, |n| n.depth());
                1 + l.max(r)
            }
        }
    }
}

/// Heap entry; ordering ignores the node itself.
#[derive(Debug)]
struct Pending {
    weight: u64,
    sequence: u32,
    node: HuffmanNode,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.sequence == other.sequence
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// A Huffman tree, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Option<HuffmanNode>,
}

impl HuffmanTree {
    /// Creates an empty tree.
    pub fn empty() -> Self {
        Self { root: None }
    }

    /// Builds a tree from symbol frequencies.
    ///
    /// * no symbols: empty tree
    /// * one symbol: internal root with the leaf as its only (left) child
    /// * otherwise: repeated merge of the two lightest nodes, first popped on
    ///   the left
    pub fn build(frequencies: &FrequencyTable) -> Self {
        let mut heap = BinaryHeap::with_capacity(frequencies.len());
        let mut sequence = 0u32;

        for (symbol, weight) in frequencies.iter() {
            heap.push(Reverse(Pending {
                weight,
                sequence,
                node: HuffmanNode::Leaf { symbol, weight },
            }));
            sequence += 1;
        }

        let root = if heap.len() == 1 {
            heap.pop().map(|Reverse(only)| HuffmanNode::Internal {
                weight: only.weight,
                left: Some(Box::new(only.node)),
                right: None,
            })
        } else {
            while heap.len() > 1 {
                let (Some(Reverse(left)), Some(Reverse(right))) = (heap.pop(), heap.pop()) else {
                    break;
                };
                let node = HuffmanNode::merge(left.node, right.node);
                heap.push(Reverse(Pending {
                    weight: node.weight(),
                    sequence,
                    node,
                }));
                sequence += 1;
            }
            heap.pop().map(|Reverse(last)| last.node)
        };

        let tree = Self { root };
        debug!(
            symbols = frequencies.len(),
            weight = tree.weight(),
            depth = tree.depth(),
            "Built Huffman tree"
        );
        tree
    }

    pub fn root(&self) -> Option<&HuffmanNode> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Root weight, i.e. the number of symbols the tree was built from.
    pub fn weight(&self) -> u64 {
        self.root.as_ref().map_or(0, HuffmanNode::weight)
    }

    /// Number of leaves (distinct symbols).
    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, HuffmanNode::leaf_count)
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, HuffmanNode::depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_builds_empty_tree() {
        let tree = HuffmanTree::build(&FrequencyTable::new());
        assert!(tree.is_empty());
        assert_eq!(tree.weight(), 0);
        assert_eq!(tree.leaf_count(), 0);
    }

    #[test]
    fn test_single_symbol_is_left_child_of_root() {
        let tree = HuffmanTree::build(&FrequencyTable::count(b"zzzz"));
        let root = tree.root().expect("root");
        assert!(!root.is_leaf());
        assert_eq!(root.weight(), 4);
        assert_eq!(
            root.left(),
            Some(&HuffmanNode::Leaf {
                symbol: b'z',
                weight: 4
            })
        );
        assert!(root.right().is_none());
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_two_symbols_lighter_goes_left() {
        let tree = HuffmanTree::build(&FrequencyTable::count(b"abb"));
        let root = tree.root().expect("root");
        assert_eq!(root.weight(), 3);
        assert_eq!(
            root.left(),
            Some(&HuffmanNode::Leaf {
                symbol: b'a',
                weight: 1
            })
        );
        assert_eq!(
            root.right(),
            Some(&HuffmanNode::Leaf {
                symbol: b'b',
                weight: 2
            })
        );
    }

    #[test]
    fn test_equal_weights_break_ties_by_symbol() {
        // All weights tie, so the lower symbol is popped first and lands left.
        let tree = HuffmanTree::build(&FrequencyTable::count(b"dcba"));
        let root = tree.root().expect("root");
        let left = root.left().expect("left");
        let right = root.right().expect("right");
        assert_eq!(left.left().and_then(leaf_symbol), Some(b'a'));
        assert_eq!(left.right().and_then(leaf_symbol), Some(b'b'));
        assert_eq!(right.left().and_then(leaf_symbol), Some(b'c'));
        assert_eq!(right.right().and_then(leaf_symbol), Some(b'd'));
    }

    #[test]
    fn test_build_is_deterministic() {
        let freqs = FrequencyTable::count(b"the quick brown fox jumps over the lazy dog");
        assert_eq!(HuffmanTree::build(&freqs), HuffmanTree::build(&freqs));
    }

    #[test]
    fn test_weights_sum_and_leaves() {
        let freqs = FrequencyTable::count(b"abracadabra");
        let tree = HuffmanTree::build(&freqs);
        assert_eq!(tree.weight(), 11);
        assert_eq!(tree.leaf_count(), 5);
    }

    fn leaf_symbol(node: &HuffmanNode) -> Option<u8> {
        match node {
            HuffmanNode::Leaf { symbol, .. } => Some(*symbol),
            HuffmanNode::Internal { .. } => None,
        }
    }
}
