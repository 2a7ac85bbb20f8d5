//! Huffman coder HTTP server
//!
//! ## Usage
//!
//! ```bash
//! # Start with default settings (port 8080, static files from ./web)
//! huffman-server
//!
//! # Custom port and web root
//! huffman-server --port 9000 --web-root ./public
//!
//! # Settings from a JSON file, flags still win
//! huffman-server --config server.json --log-level debug
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use huffman_server::server::{Server, ServerConfig};
use huffman_server::utils::log::{init_subscriber, parse_level};

#[derive(Parser, Debug)]
#[command(name = "huffman-server")]
#[command(version)]
#[command(about = "Huffman coder HTTP server", long_about = None)]
struct Args {
    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory static files are served from
    #[arg(long)]
    web_root: Option<PathBuf>,

    /// Maximum request size in bytes
    #[arg(long)]
    max_request_bytes: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Configuration file path (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> huffman_server::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(web_root) = self.web_root {
            config.web_root = web_root;
        }
        if let Some(max_request_bytes) = self.max_request_bytes {
            config.max_request_bytes = max_request_bytes;
        }
        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Args::parse().into_config()?;
    init_subscriber(parse_level(&config.log_level));

    let mut server = Server::bind(config)?;
    let addr = server.local_addr()?;

    info!("╔══════════════════════════════════════════════════════════════╗");
    info!("║                 HUFFMAN CODER SERVER                         ║");
    info!("╚══════════════════════════════════════════════════════════════╝");
    info!("  Address:          http://{}", addr);
    info!("  Web root:         {}", server.config().web_root.display());
    info!("  Max request size: {} bytes", server.config().max_request_bytes);
    info!("");
    info!("API endpoints:");
    info!("  POST /api/encode  - Encode text using Huffman coding");
    info!("  POST /api/decode  - Decode binary back to text");
    info!("  GET  /api/status  - Check server status");
    info!("");

    server.run()?;
    Ok(())
}
