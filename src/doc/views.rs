// src/doc/views.rs

//! Read-only document views of the coder state.
//!
//! The views borrow the model and serialize it directly; symbol keys are
//! rendered through [`escape_symbol`] and always come out in ascending symbol
//! order.

use serde::Serialize;
use serde::ser::{SerializeMap, SerializeStruct, Serializer};

use super::escape::escape_symbol;
use crate::encode::huffman::{
    CodeTable, CompressionStats, Decoded, Encoded, FrequencyTable, HuffmanCoder, HuffmanNode,
    HuffmanTree,
};

/// `{"<label>": count, ...}`
#[derive(Debug, Clone, Copy)]
pub struct FrequencyView<'a>(pub &'a FrequencyTable);

impl Serialize for FrequencyView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (symbol, count) in self.0.iter() {
            map.serialize_entry(&*escape_symbol(symbol), &count)?;
        }
        map.end()
    }
}

/// `{"<label>": "0101", ...}`
#[derive(Debug, Clone, Copy)]
pub struct CodeView<'a>(pub &'a CodeTable);

impl Serialize for CodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (symbol, code) in self.0.iter() {
            map.serialize_entry(&*escape_symbol(symbol), code)?;
        }
        map.end()
    }
}

/// Nested tree document; `null` for an empty tree.
///
/// Leaves are `{"freq", "char"}`, internal nodes `{"freq", "left", "right"}`
/// where a missing child is `null`.
#[derive(Debug, Clone, Copy)]
pub struct TreeView<'a>(pub &'a HuffmanTree);

impl Serialize for TreeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.root() {
            Some(root) => NodeView(root).serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

struct NodeView<'a>(&'a HuffmanNode);

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            HuffmanNode::Leaf { symbol, weight } => {
                let mut node = serializer.serialize_struct("Leaf", 2)?;
                node.serialize_field("freq", weight)?;
                node.serialize_field("char", &*escape_symbol(*symbol))?;
                node.end()
            }
            HuffmanNode::Internal {
                weight,
                left,
                right,
            } => {
                let mut node = serializer.serialize_struct("Internal", 3)?;
                node.serialize_field("freq", weight)?;
                node.serialize_field("left", &left.as_deref().map(NodeView))?;
                node.serialize_field("right", &right.as_deref().map(NodeView))?;
                node.end()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    pub original_bits: u64,
    pub encoded_bits: u64,
    #[serde(serialize_with = "two_decimals")]
    pub compression_ratio: f64,
    pub unique_chars: usize,
}

impl From<&CompressionStats> for StatsView {
    fn from(stats: &CompressionStats) -> Self {
        Self {
            original_bits: stats.original_bits,
            encoded_bits: stats.encoded_bits,
            compression_ratio: stats.compression_ratio,
            unique_chars: stats.unique_symbols,
        }
    }
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 100.0).round() / 100.0)
}

/// Response document for an encode.
#[derive(Debug, Clone, Serialize)]
pub struct EncodeReport<'a> {
    pub encoded: &'a str,
    pub frequencies: FrequencyView<'a>,
    pub codes: CodeView<'a>,
    pub tree: TreeView<'a>,
    pub stats: StatsView,
}

impl<'a> EncodeReport<'a> {
    /// Pairs an encode result with the model `coder` built for it.
    pub fn new(encoded: &'a Encoded, coder: &'a HuffmanCoder) -> Self {
        Self {
            encoded: &encoded.bits,
            frequencies: FrequencyView(coder.frequencies()),
            codes: CodeView(coder.codes()),
            tree: TreeView(coder.tree()),
            stats: StatsView::from(&encoded.stats),
        }
    }
}

/// Response document for a decode.
///
/// Valid UTF-8 output travels as `decoded` alone. Anything else also carries
/// the exact bytes in `decodedBytes`, with `decoded` as a lossy rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeReport {
    pub decoded: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded_bytes: Option<Vec<u8>>,
    pub matches_original: bool,
}

impl From<&Decoded> for DecodeReport {
    fn from(decoded: &Decoded) -> Self {
        let (decoded_text, decoded_bytes) = match std::str::from_utf8(&decoded.text) {
            Ok(text) => (text.to_owned(), None),
            Err(_) => (
                String::from_utf8_lossy(&decoded.text).into_owned(),
                Some(decoded.text.clone()),
            ),
        };
        Self {
            decoded: decoded_text,
            decoded_bytes,
            matches_original: decoded.matches_original,
        }
    }
}
