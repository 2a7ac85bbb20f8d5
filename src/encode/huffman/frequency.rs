// src/encode/huffman/frequency.rs

//! Symbol frequency analysis.
//!
//! A [`FrequencyTable`] is a dense 256-slot count table. Iteration is always
//! in ascending symbol order, which is what the tree builder relies on for its
//! tie-break.

/// Occurrence counts for every byte value seen in one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
    distinct: usize,
}

impl FrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            counts: [0; 256],
            distinct: 0,
        }
    }

    /// Counts every byte of `text`.
    pub fn count(text: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in text {
            table.add(byte, 1);
        }
        table
    }

    /// Builds a table from explicit `(symbol, weight)` pairs.
    ///
    /// Zero weights are ignored and repeated symbols accumulate.
    pub fn from_counts<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut table = Self::new();
        for (symbol, weight) in pairs {
            table.add(symbol, weight);
        }
        table
    }

    fn add(&mut self, symbol: u8, weight: u64) {
        if weight == 0 {
            return;
        }
        let slot = &mut self.counts[symbol as usize];
        if *slot == 0 {
            self.distinct += 1;
        }
        *slot += weight;
    }

    /// Returns the count for `symbol` (zero when absent).
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols present.
    pub fn len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Sum of all counts; equals the input length for [`FrequencyTable::count`].
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Present symbols with their counts, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, count)| (symbol as u8, *count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
