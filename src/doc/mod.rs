//! Document views of the coder state and the symbol labelling they use.

pub mod escape;
pub mod views;

pub use escape::{EscapeError, escape_symbol, unescape_symbol};
pub use views::{CodeView, DecodeReport, EncodeReport, FrequencyView, StatsView, TreeView};
