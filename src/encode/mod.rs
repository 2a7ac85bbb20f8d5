pub mod huffman;

// Re-export commonly used encoding functionality
pub use huffman::*;

// Re-export error types for convenience
pub use crate::utils::error::{HuffmanError, Result};
