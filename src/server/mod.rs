//! HTTP front end for the coder.
//!
//! A blocking listener handles one connection at a time, to completion,
//! before accepting the next; the single [`HuffmanService`] it owns is never
//! touched concurrently.

pub mod config;
pub mod http;
pub mod service;

use std::net::{SocketAddr, TcpListener, TcpStream};

use tracing::{debug, info, warn};

pub use config::ServerConfig;
pub use http::{Request, Response};
pub use service::HuffmanService;

use crate::utils::error::Result;

pub struct Server {
    listener: TcpListener,
    service: HuffmanService,
    config: ServerConfig,
}

impl Server {
    /// Validates `config` and binds the listening socket.
    pub fn bind(config: ServerConfig) -> Result<Self> {
        config.validate()?;
        let listener = TcpListener::bind(config.bind_addr())?;
        let service = HuffmanService::new(config.web_root.clone());
        Ok(Self {
            listener,
            service,
            config,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Accepts connections forever. Per-connection failures are logged and
    /// do not stop the loop.
    pub fn run(&mut self) -> Result<()> {
        info!("Server listening on http://{}", self.local_addr()?);
        info!("Serving static files from {}", self.config.web_root.display());
        loop {
            if let Err(e) = self.serve_one() {
                warn!("Connection failed: {}", e);
            }
        }
    }

    /// Accepts and answers exactly one connection.
    pub fn serve_one(&mut self) -> Result<()> {
        let (mut stream, peer) = self.listener.accept()?;
        debug!("Accepted connection from {}", peer);
        self.prepare(&stream)?;
        self.service.serve(&mut stream, self.config.max_request_bytes)
    }

    fn prepare(&self, stream: &TcpStream) -> Result<()> {
        stream.set_read_timeout(self.config.read_timeout())?;
        Ok(())
    }
}
