// src/encode/huffman/code_table.rs

//! Code table derivation.

use std::collections::BTreeMap;

use super::frequency::FrequencyTable;
use super::tree::{HuffmanNode, HuffmanTree};

/// Symbol to bit-string mapping derived from one tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, String>,
}

impl CodeTable {
    /// Walks `tree` depth-first, left edges appending `'0'` and right edges `'1'`.
    pub fn derive(tree: &HuffmanTree) -> Self {
        let mut table = Self::default();
        if let Some(root) = tree.root() {
            let mut path = String::new();
            table.collect(root, &mut path);
        }
        table
    }

    fn collect(&mut self, node: &HuffmanNode, path: &mut String) {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                // A bare leaf root never comes out of the builder, but it still
                // needs a non-empty code.
                let code = if path.is_empty() { "0".to_owned() } else { path.clone() };
                self.codes.insert(*symbol, code);
            }
            HuffmanNode::Internal { left, right, .. } => {
                if let Some(left) = left {
                    path.push('0');
                    self.collect(left, path);
                    path.pop();
                }
                if let Some(right) = right {
                    path.push('1');
                    self.collect(right, path);
                    path.pop();
                }
            }
        }
    }

    /// Code for `symbol`, if it appeared in the tree.
    pub fn get(&self, symbol: u8) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.codes.iter().map(|(symbol, code)| (*symbol, code.as_str()))
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&str> = self.codes.values().map(String::as_str).collect();
        codes.sort_unstable();
        // After sorting, a prefix always sorts directly before some code it prefixes.
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    /// Encoded length in bits of a text with the given frequencies.
    pub fn weighted_length(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| count * code.len() as u64))
            .sum()
    }
}
