// src/utils/error.rs

use thiserror::Error;

/// The primary error type for the library.
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// An I/O operation failed (socket, static file, config file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration value is missing or unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A JSON document could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A request body was well-formed JSON but lacked what the route needs.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, HuffmanError>;
