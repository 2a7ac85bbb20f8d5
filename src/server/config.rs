//! Server configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::utils::error::{HuffmanError, Result};

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory static files are served from
    #[serde(default = "default_web_root")]
    pub web_root: PathBuf,

    /// Upper bound on the bytes read for one request
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,

    /// Socket read timeout in milliseconds (0 disables it)
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_root: default_web_root(),
            max_request_bytes: default_max_request_bytes(),
            read_timeout_ms: default_read_timeout_ms(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Parses a JSON configuration document; absent keys take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(HuffmanError::Config("host must not be empty".into()));
        }
        if self.max_request_bytes == 0 {
            return Err(HuffmanError::Config(
                "max_request_bytes must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_web_root() -> PathBuf {
    PathBuf::from("./web")
}

fn default_max_request_bytes() -> usize {
    1024 * 1024 // 1MB
}

fn default_read_timeout_ms() -> u64 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}
