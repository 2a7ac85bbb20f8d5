//! Property-based tests for the Huffman coder.
//!
//! These check, across random inputs:
//! - encode followed by decode reproduces the input
//! - derived codes are prefix-free and never empty
//! - the encoded length never exceeds eight bits per input byte
//! - symbol labels survive a JSON round trip

use proptest::prelude::*;

use huffman_server::doc::views::CodeView;
use huffman_server::encode::huffman::{decode, encode};
use huffman_server::{
    CodeTable, FrequencyTable, HuffmanCoder, HuffmanTree, escape_symbol, unescape_symbol,
};

/// Inputs over a small alphabet, so repeats and ties are common.
fn skewed_text_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop_oneof![4 => Just(b'a'), 2 => Just(b'b'), 1 => 0u8..=255u8], 0..400)
}

fn weights_strategy() -> impl Strategy<Value = Vec<(u8, u64)>> {
    prop::collection::vec((any::<u8>(), 1u64..1000), 1..64)
}

/// Cost of an optimal prefix code, computed independently by summing merge weights.
fn reference_optimal_cost(freqs: &FrequencyTable) -> u64 {
    let mut weights: Vec<u64> = freqs.iter().map(|(_, w)| w).collect();
    if weights.len() == 1 {
        return weights[0];
    }
    let mut cost = 0;
    while weights.len() > 1 {
        weights.sort_unstable_by(|a, b| b.cmp(a));
        let a = weights.pop().unwrap_or_default();
        let b = weights.pop().unwrap_or_default();
        cost += a + b;
        weights.push(a + b);
    }
    cost
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        max_shrink_iters: 200,
        ..ProptestConfig::default()
    })]

    /// Property: decode(encode(T)) == T for any byte string.
    #[test]
    fn prop_roundtrip(text in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut coder = HuffmanCoder::new();
        let encoded = coder.encode(&text);
        let decoded = coder.decode(&encoded.bits);
        prop_assert_eq!(&decoded.text, &text);
        prop_assert!(decoded.matches_original);
    }

    /// Property: skewed inputs round-trip and never expand past eight bits per byte.
    #[test]
    fn prop_skewed_roundtrip_and_ratio(text in skewed_text_strategy()) {
        let mut coder = HuffmanCoder::new();
        let encoded = coder.encode(&text);
        prop_assert!(encoded.stats.encoded_bits <= encoded.stats.original_bits);
        prop_assert!(encoded.stats.compression_ratio >= 0.0);
        prop_assert_eq!(coder.decode(&encoded.bits).text, text);
    }

    /// Property: codes are non-empty and no code prefixes another.
    #[test]
    fn prop_prefix_free(pairs in weights_strategy()) {
        let freqs = FrequencyTable::from_counts(pairs);
        let codes = CodeTable::derive(&HuffmanTree::build(&freqs));
        prop_assert_eq!(codes.len(), freqs.len());
        prop_assert!(codes.iter().all(|(_, code)| !code.is_empty()));
        prop_assert!(codes.is_prefix_free());
    }

    /// Property: weighted code length equals the optimal merge cost.
    #[test]
    fn prop_optimal_weighted_length(pairs in weights_strategy()) {
        let freqs = FrequencyTable::from_counts(pairs);
        let codes = CodeTable::derive(&HuffmanTree::build(&freqs));
        prop_assert_eq!(codes.weighted_length(&freqs), reference_optimal_cost(&freqs));
    }

    /// Property: a corrupted tail never panics and never disturbs completed symbols.
    #[test]
    fn prop_lenient_tail(text in skewed_text_strategy(), tail in "[01]{0,12}") {
        let freqs = FrequencyTable::count(&text);
        let tree = HuffmanTree::build(&freqs);
        let codes = CodeTable::derive(&tree);
        let bits = encode(&text, &codes) + &tail;
        let decoded = decode(&bits, &tree);
        prop_assert!(decoded.starts_with(&text));
    }

    /// Property: code-table documents keep every symbol's identity through JSON.
    #[test]
    fn prop_code_view_json_roundtrip(text in prop::collection::vec(any::<u8>(), 1..300)) {
        let codes = CodeTable::derive(&HuffmanTree::build(&FrequencyTable::count(&text)));
        let json = serde_json::to_string(&CodeView(&codes)).unwrap();
        let parsed: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed.len(), codes.len());
        for (label, code) in parsed {
            let symbol = unescape_symbol(&label).unwrap();
            prop_assert_eq!(Some(code.as_str().unwrap()), codes.get(symbol));
        }
    }

    /// Property: every label parses back to its byte.
    #[test]
    fn prop_escape_roundtrip(byte in any::<u8>()) {
        prop_assert_eq!(unescape_symbol(&escape_symbol(byte)), Ok(byte));
    }
}
