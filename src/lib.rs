//! A byte-level Huffman coder with a small HTTP front end.
//!
//! The coder builds a frequency-weighted prefix-code tree for one input,
//! encodes the input into a string of `'0'`/`'1'` characters, and decodes such
//! strings back through the same tree.
//!
//! # Quick Start
//!
//! ```
//! use huffman_server::HuffmanCoder;
//!
//! let mut coder = HuffmanCoder::new();
//! let encoded = coder.encode(b"abracadabra");
//! assert_eq!(encoded.stats.encoded_bits, 23);
//!
//! let decoded = coder.decode(&encoded.bits);
//! assert_eq!(decoded.text, b"abracadabra");
//! assert!(decoded.matches_original);
//! ```
//!
//! # Modules
//!
//! - **encode**: frequency counting, tree construction, code derivation,
//!   encode and decode
//! - **doc**: JSON document views of the model and symbol labels
//! - **server**: configuration, HTTP framing and request routing
//! - **utils**: errors and logging

pub mod doc;
pub mod encode;
pub mod server;
pub mod utils;

// Codec API
pub use encode::huffman::{
    CodeTable, CodecError, CompressionStats, Decoded, Encoded, FrequencyTable, HuffmanCoder,
    HuffmanNode, HuffmanTree,
};

// Documents
pub use doc::{DecodeReport, EncodeReport, escape_symbol, unescape_symbol};

// Service
pub use server::{HuffmanService, Server, ServerConfig};

// Error types
pub use utils::error::{HuffmanError, Result};
