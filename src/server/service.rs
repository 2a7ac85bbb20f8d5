//! Request routing over a single [`HuffmanCoder`].

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::http::{Request, Response, read_request};
use crate::doc::views::{DecodeReport, EncodeReport};
use crate::encode::huffman::HuffmanCoder;
use crate::utils::error::{HuffmanError, Result};

const NOT_FOUND_PAGE: &str =
    "<h1>404 Not Found</h1><p>The requested file was not found.</p>";

/// Routes requests to the coder and the static file tree.
///
/// Owns the only coder; callers must drive it one request at a time.
#[derive(Debug)]
pub struct HuffmanService {
    coder: HuffmanCoder,
    web_root: PathBuf,
}

impl HuffmanService {
    pub fn new(web_root: impl Into<PathBuf>) -> Self {
        Self {
            coder: HuffmanCoder::new(),
            web_root: web_root.into(),
        }
    }

    pub fn coder(&self) -> &HuffmanCoder {
        &self.coder
    }

    /// Reads one request from `stream`, answers it, and flushes.
    ///
    /// A connection that never sends a complete header block gets no reply.
    pub fn serve<S: Read + Write>(&mut self, stream: &mut S, max_request_bytes: usize) -> Result<()> {
        let Some(request) = read_request(stream, max_request_bytes)? else {
            debug!("Connection closed before a complete request arrived");
            return Ok(());
        };

        match request.content_length() {
            Some(length) => info!(
                "{} {} (Content-Length: {}, received: {})",
                request.method,
                request.path,
                length,
                request.body.len()
            ),
            None => info!("{} {}", request.method, request.path),
        }

        let response = self.handle(&request);
        stream.write_all(&response.to_bytes())?;
        stream.flush()?;
        Ok(())
    }

    /// Produces the response for one request.
    pub fn handle(&mut self, request: &Request) -> Response {
        match (request.method.as_str(), request.path.as_str()) {
            ("OPTIONS", _) => Response::new(204, "text/plain", Vec::<u8>::new()),
            ("GET", "/api/status") => Response::json(
                200,
                &json!({
                    "status": "running",
                    "backend": "Rust",
                    "version": env!("CARGO_PKG_VERSION"),
                }),
            ),
            ("POST", "/api/encode") => self.encode(&request.body),
            ("POST", "/api/decode") => self.decode(&request.body),
            (_, "/api/status" | "/api/encode" | "/api/decode") => {
                Response::error(405, "Method not allowed")
            }
            ("GET", path) => self.static_file(path),
            _ => Response::error(405, "Method not allowed"),
        }
    }

    fn encode(&mut self, text: &[u8]) -> Response {
        info!("[ENCODE] Input length: {} chars", text.len());
        if text.is_empty() {
            return Response::error(400, "No text provided");
        }

        let encoded = self.coder.encode(text);
        info!("[ENCODE] Output length: {} bits", encoded.bits.len());

        Response::json(200, &EncodeReport::new(&encoded, &self.coder))
    }

    fn decode(&self, body: &[u8]) -> Response {
        let bits = match encoded_field(body) {
            Ok(bits) => bits,
            Err(e) => {
                warn!("[DECODE] {}", e);
                let message = match e {
                    HuffmanError::Json(_) => "Invalid request format - malformed JSON",
                    _ => "Invalid request format - 'encoded' field not found",
                };
                return Response::error(400, message);
            }
        };

        info!("[DECODE] Input length: {} bits", bits.len());
        let decoded = self.coder.decode(&bits);
        info!("[DECODE] Output length: {} chars", decoded.text.len());
        info!(
            "[DECODE] Match with original: {}",
            if decoded.matches_original { "YES" } else { "NO" }
        );

        Response::json(200, &DecodeReport::from(&decoded))
    }

    fn static_file(&self, path: &str) -> Response {
        let path = if path == "/" { "/index.html" } else { path };
        let Some(file) = resolve_static_path(&self.web_root, path) else {
            warn!("Refusing static path {}", path);
            return Response::new(404, "text/html", NOT_FOUND_PAGE);
        };

        match std::fs::read(&file) {
            Ok(content) => Response::new(200, content_type(path), content),
            Err(e) => {
                debug!("Static file {} unavailable: {}", file.display(), e);
                Response::new(404, "text/html", NOT_FOUND_PAGE)
            }
        }
    }
}

/// Pulls the `encoded` string out of a decode request body.
fn encoded_field(body: &[u8]) -> Result<String> {
    let document: Value = serde_json::from_slice(body)?;
    match document.get("encoded").and_then(Value::as_str) {
        Some(bits) => Ok(bits.to_owned()),
        None => Err(HuffmanError::InvalidRequest(
            "'encoded' field not found in body".into(),
        )),
    }
}

/// Maps a request path under `web_root`; `/` means `/index.html`.
///
/// Returns `None` for paths that try to leave the root.
pub fn resolve_static_path(web_root: &Path, path: &str) -> Option<PathBuf> {
    let path = if path == "/" { "/index.html" } else { path };
    let mut resolved = web_root.to_path_buf();
    for segment in path.split('/').filter(|s| !s.is_empty() && *s != ".") {
        if segment == ".." || segment.contains('\\') {
            return None;
        }
        resolved.push(segment);
    }
    Some(resolved)
}

/// Content type by file extension.
pub fn content_type(path: &str) -> &'static str {
    let extension = path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "png" => "image/png",
        "ico" => "image/x-icon",
        _ => "text/plain; charset=utf-8",
    }
}
