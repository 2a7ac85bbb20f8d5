//! Byte-level Huffman coding.
//!
//! The pipeline is frequency count, tree build, code derivation, then
//! encode/decode over a string of `'0'`/`'1'` characters. [`HuffmanCoder`]
//! ties the stages together for one session.

pub mod code_table;
pub mod codec;
pub mod frequency;
pub mod tree;

pub use code_table::CodeTable;
pub use codec::{
    CodecError, CompressionStats, Decoded, Encoded, HuffmanCoder, decode, decode_strict, encode,
};
pub use frequency::FrequencyTable;
pub use tree::{HuffmanNode, HuffmanTree};
