// src/encode/huffman/codec.rs

//! Encoding, decoding, and the per-session coder state.

use thiserror::Error;
use tracing::{debug, warn};

use super::code_table::CodeTable;
use super::frequency::FrequencyTable;
use super::tree::{HuffmanNode, HuffmanTree};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Bit {position} follows an edge that does not exist in the tree")]
    InvalidPath { position: usize },

    #[error("Unexpected character {found:?} at position {position}; expected '0' or '1'")]
    InvalidBit { position: usize, found: char },

    #[error("{count} trailing bit(s) do not complete a code")]
    TrailingBits { count: usize },
}

/// Concatenates the code of every byte of `text`.
///
/// Bytes without a code are skipped.
pub fn encode(text: &[u8], codes: &CodeTable) -> String {
    if text.is_empty() || codes.is_empty() {
        return String::new();
    }

    let mut lengths = [0usize; 256];
    for (symbol, code) in codes.iter() {
        lengths[symbol as usize] = code.len();
    }
    let capacity = text.iter().map(|&b| lengths[b as usize]).sum();

    let mut encoded = String::with_capacity(capacity);
    for &byte in text {
        if let Some(code) = codes.get(byte) {
            encoded.push_str(code);
        }
    }
    encoded
}

/// Walks `tree` for every bit of `bits`, emitting a symbol at each leaf.
///
/// Lenient: a bit along a missing edge resets the walk to the root and is
/// dropped, characters other than `'0'` and `'1'` are ignored, and an
/// unfinished path at the end is discarded.
pub fn decode(bits: &str, tree: &HuffmanTree) -> Vec<u8> {
    let Some(root) = tree.root() else {
        return Vec::new();
    };

    let mut decoded = Vec::new();
    let mut current = root;

    for bit in bits.chars() {
        let next = match bit {
            '0' => current.left(),
            '1' => current.right(),
            _ => continue,
        };

        match next {
            Some(HuffmanNode::Leaf { symbol, .. }) => {
                decoded.push(*symbol);
                current = root;
            }
            Some(internal) => current = internal,
            None => current = root,
        }
    }

    decoded
}

/// Like [`decode`], but rejects anything the lenient walk would have absorbed.
pub fn decode_strict(bits: &str, tree: &HuffmanTree) -> Result<Vec<u8>, CodecError> {
    let Some(root) = tree.root() else {
        return Ok(Vec::new());
    };

    let mut decoded = Vec::new();
    let mut current = root;
    let mut pending = 0usize;

    for (position, bit) in bits.chars().enumerate() {
        let next = match bit {
            '0' => current.left(),
            '1' => current.right(),
            found => return Err(CodecError::InvalidBit { position, found }),
        };
        match next {
            Some(HuffmanNode::Leaf { symbol, .. }) => {
                decoded.push(*symbol);
                current = root;
                pending = 0;
            }
            Some(internal) => {
                current = internal;
                pending += 1;
            }
            None => return Err(CodecError::InvalidPath { position }),
        }
    }

    if pending > 0 {
        return Err(CodecError::TrailingBits { count: pending });
    }
    Ok(decoded)
}

/// Size figures for one encode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionStats {
    pub original_bits: u64,
    pub encoded_bits: u64,
    /// Percentage of bits saved; zero for empty input.
    pub compression_ratio: f64,
    pub unique_symbols: usize,
}

impl CompressionStats {
    pub fn new(text_len: usize, encoded_len: usize, unique_symbols: usize) -> Self {
        let original_bits = text_len as u64 * 8;
        let encoded_bits = encoded_len as u64;
        let compression_ratio = if original_bits == 0 {
            0.0
        } else {
            (original_bits as f64 - encoded_bits as f64) / original_bits as f64 * 100.0
        };
        Self {
            original_bits,
            encoded_bits,
            compression_ratio,
            unique_symbols,
        }
    }
}

/// Result of [`HuffmanCoder::encode`].
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    pub bits: String,
    pub stats: CompressionStats,
}

/// Result of [`HuffmanCoder::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: Vec<u8>,
    /// Whether `text` equals the input of the most recent encode.
    pub matches_original: bool,
}

/// Per-session coder state.
///
/// Holds the frequency table, tree and code table of the latest encode along
/// with its input. Every encode replaces all of them; decode reads the tree
/// only. Not meant to be shared: one owner drives it sequentially.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCoder {
    frequencies: FrequencyTable,
    tree: HuffmanTree,
    codes: CodeTable,
    last_input: Vec<u8>,
}

impl HuffmanCoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards the current tree, tables and retained input.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Rebuilds the model from `text` and encodes it.
    ///
    /// Replaces frequencies, tree, codes and retained input, so no
    /// [`reset`](Self::reset) is needed between encodes.
    pub fn encode(&mut self, text: &[u8]) -> Encoded {
        let frequencies = FrequencyTable::count(text);
        let tree = HuffmanTree::build(&frequencies);
        let codes = CodeTable::derive(&tree);
        let bits = encode(text, &codes);

        let stats = CompressionStats::new(text.len(), bits.len(), frequencies.len());
        debug!(
            input_len = text.len(),
            encoded_bits = stats.encoded_bits,
            unique = stats.unique_symbols,
            "Encoded text"
        );

        self.frequencies = frequencies;
        self.tree = tree;
        self.codes = codes;
        self.last_input = text.to_vec();

        Encoded { bits, stats }
    }

    /// Decodes `bits` against the tree of the most recent encode.
    pub fn decode(&self, bits: &str) -> Decoded {
        let text = decode(bits, &self.tree);
        let matches_original = text == self.last_input;
        if !matches_original {
            warn!(
                decoded_len = text.len(),
                original_len = self.last_input.len(),
                "Decoded text differs from the last encoded input"
            );
        }
        Decoded {
            text,
            matches_original,
        }
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Input of the most recent encode.
    pub fn last_input(&self) -> &[u8] {
        &self.last_input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(text: &[u8]) -> (HuffmanTree, CodeTable) {
        let tree = HuffmanTree::build(&FrequencyTable::count(text));
        let codes = CodeTable::derive(&tree);
        (tree, codes)
    }

    #[test]
    fn test_encode_skips_unknown_symbols() {
        let (_, codes) = model(b"ab");
        assert_eq!(encode(b"axb", &codes), encode(b"ab", &codes));
    }

    #[test]
    fn test_encode_empty() {
        let (_, codes) = model(b"ab");
        assert_eq!(encode(b"", &codes), "");
        assert_eq!(encode(b"ab", &CodeTable::default()), "");
    }

    #[test]
    fn test_decode_empty_tree() {
        assert!(decode("0101", &HuffmanTree::empty()).is_empty());
    }

    #[test]
    fn test_decode_drops_trailing_fragment() {
        let (tree, codes) = model(b"abracadabra");
        let mut bits = encode(b"abracadabra", &codes);
        // 'c' sits three levels down, so two of its bits leave an unfinished path.
        let c = codes.get(b'c').expect("code for c");
        bits.push_str(&c[..2]);
        assert_eq!(decode(&bits, &tree), b"abracadabra");
    }

    #[test]
    fn test_decode_single_symbol_missing_right_edge() {
        let (tree, _) = model(b"zzzz");
        // '1' has nowhere to go from the degenerate root and is dropped.
        assert_eq!(decode("0100", &tree), b"zzz");
    }

    #[test]
    fn test_decode_ignores_foreign_characters() {
        let (tree, codes) = model(b"abb");
        let bits = encode(b"abb", &codes);
        let noisy: String = bits.chars().flat_map(|c| [c, ' ']).collect();
        assert_eq!(decode(&noisy, &tree), b"abb");
    }

    #[test]
    fn test_decode_strict_errors() {
        let (tree, _) = model(b"zzzz");
        assert_eq!(decode_strict("00", &tree), Ok(b"zz".to_vec()));
        assert_eq!(
            decode_strict("01", &tree),
            Err(CodecError::InvalidPath { position: 1 })
        );
        assert_eq!(
            decode_strict("0x", &tree),
            Err(CodecError::InvalidBit {
                position: 1,
                found: 'x'
            })
        );

        let (tree, codes) = model(b"abracadabra");
        let c = codes.get(b'c').expect("code for c");
        assert_eq!(
            decode_strict(&c[..2], &tree),
            Err(CodecError::TrailingBits { count: 2 })
        );
    }

    #[test]
    fn test_coder_roundtrip_and_verification() {
        let mut coder = HuffmanCoder::new();
        let encoded = coder.encode(b"abracadabra");
        assert_eq!(encoded.stats.original_bits, 88);
        assert_eq!(encoded.stats.encoded_bits, 23);
        assert_eq!(encoded.stats.unique_symbols, 5);

        let decoded = coder.decode(&encoded.bits);
        assert_eq!(decoded.text, b"abracadabra");
        assert!(decoded.matches_original);

        let partial = coder.decode(&encoded.bits[..encoded.bits.len() - 1]);
        assert!(!partial.matches_original);
    }

    #[test]
    fn test_coder_reset() {
        let mut coder = HuffmanCoder::new();
        coder.encode(b"hello");
        coder.reset();
        assert!(coder.tree().is_empty());
        assert!(coder.codes().is_empty());
        assert!(coder.frequencies().is_empty());
        assert!(coder.last_input().is_empty());
        assert!(coder.decode("0101").text.is_empty());
    }

    #[test]
    fn test_stats_empty_input() {
        let stats = CompressionStats::new(0, 0, 0);
        assert_eq!(stats.compression_ratio, 0.0);
    }
}
