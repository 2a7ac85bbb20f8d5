// src/utils/log.rs

//! Logging setup.
//!
//! Library code logs through the `tracing` macros. Binaries install a
//! subscriber once at start-up:
//!
//! ```
//! use huffman_server::utils::log::{init_subscriber, parse_level};
//!
//! init_subscriber(parse_level("debug"));
//! ```

pub use tracing::{Level, debug, error, info, trace, warn};
use tracing_subscriber::FmtSubscriber;

/// Initializes a global logging subscriber writing to standard output.
///
/// Calling it a second time is a no-op apart from a warning.
pub fn init_subscriber(max_level: Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_thread_ids(true)
        .with_target(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        warn!("Tracing subscriber already installed");
    }
}

/// Maps a level name (case-insensitive) to a [`Level`], defaulting to `INFO`.
pub fn parse_level(name: &str) -> Level {
    match name.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
