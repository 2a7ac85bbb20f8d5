//! Minimal HTTP/1.1 request reading and response writing.
//!
//! One request per connection; responses always close the connection.

use std::io::{self, Read};

use serde::Serialize;
use tracing::error;

const HEADER_END: &[u8] = b"\r\n\r\n";

/// A parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    /// Request target without its query string.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    /// Parses a raw request. Returns `None` until the header block is complete.
    ///
    /// The body is cut to `Content-Length` when that header is present and no
    /// larger than what arrived.
    pub fn parse(raw: &[u8]) -> Option<Self> {
        let head_end = find_header_end(raw)?;
        let head = String::from_utf8_lossy(&raw[..head_end]);
        let mut lines = head.split("\r\n");

        let mut request_line = lines.next()?.split_whitespace();
        let method = request_line.next().unwrap_or_default().to_owned();
        let target = request_line.next().unwrap_or_default();
        let path = match target.split_once('?') {
            Some((path, _query)) => path,
            None => target,
        }
        .to_owned();

        let headers: Vec<(String, String)> = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(name, value)| {
                (
                    name.to_owned(),
                    value.trim_start_matches(&[' ', '\t'][..]).to_owned(),
                )
            })
            .collect();

        let mut request = Self {
            method,
            path,
            headers,
            body: raw[head_end + HEADER_END.len()..].to_vec(),
        };
        if let Some(length) = request.content_length() {
            if length > 0 && length <= request.body.len() {
                request.body.truncate(length);
            }
        }
        Some(request)
    }

    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn content_length(&self) -> Option<usize> {
        self.header("Content-Length")
            .and_then(|value| value.trim().parse().ok())
    }
}

/// Offset of the `\r\n\r\n` separating headers from body.
pub fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_END.len())
        .position(|window| window == HEADER_END)
}

/// Reads one request from `reader`.
///
/// Stops once the headers and `Content-Length` bytes of body have arrived,
/// the peer closes, or `max_bytes` have been read. Returns `Ok(None)` when no
/// complete header block was received.
pub fn read_request<R: Read>(reader: &mut R, max_bytes: usize) -> io::Result<Option<Request>> {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 4096];
    let mut expected_total: Option<usize> = None;

    while raw.len() < max_bytes {
        let want = chunk.len().min(max_bytes - raw.len());
        let received = match reader.read(&mut chunk[..want]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        raw.extend_from_slice(&chunk[..received]);

        if expected_total.is_none() {
            if let Some(head_end) = find_header_end(&raw) {
                let body_len = Request::parse(&raw[..head_end + HEADER_END.len()])
                    .and_then(|head| head.content_length())
                    .unwrap_or(0);
                let total = (head_end + HEADER_END.len()).saturating_add(body_len);
                expected_total = Some(total.min(max_bytes));
            }
        }
        if matches!(expected_total, Some(total) if raw.len() >= total) {
            break;
        }
    }

    Ok(Request::parse(&raw))
}

/// A response ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// Serializes `value` as the JSON body; a serialization failure becomes a 500.
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self::new(status, "application/json", body),
            Err(e) => {
                error!("Failed to serialize response body: {}", e);
                Self::error(500, "Internal server error")
            }
        }
    }

    /// `{"error": message}` with the given status.
    pub fn error(status: u16, message: &str) -> Self {
        let body = serde_json::json!({ "error": message }).to_string();
        Self::new(status, "application/json", body)
    }

    pub fn reason(&self) -> &'static str {
        reason_phrase(self.status)
    }

    /// Status line, headers and body as sent on the wire.
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\n\
             Content-Type: {}\r\n\
             Content-Length: {}\r\n\
             Access-Control-Allow-Origin: *\r\n\
             Access-Control-Allow-Methods: GET, POST, OPTIONS\r\n\
             Access-Control-Allow-Headers: Content-Type\r\n\
             Connection: close\r\n\
             \r\n",
            self.status,
            self.reason(),
            self.content_type,
            self.body.len()
        );
        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_request_line_and_query() {
        let raw = b"GET /index.html?v=2 HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let req = Request::parse(raw).unwrap();
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/index.html");
        assert_eq!(req.header("host"), Some("localhost"));
        assert!(req.body.is_empty());
    }

    #[test]
    fn test_parse_incomplete_head() {
        assert!(Request::parse(b"GET / HTTP/1.1\r\nHost: x\r\n").is_none());
    }

    #[test]
    fn test_body_cut_to_content_length() {
        let raw = b"POST /api/encode HTTP/1.1\r\ncontent-length: 5\r\n\r\nhello world";
        let req = Request::parse(raw).unwrap();
        assert_eq!(req.content_length(), Some(5));
        assert_eq!(req.body, b"hello");
    }

    #[test]
    fn test_short_body_kept_whole() {
        let raw = b"POST /api/encode HTTP/1.1\r\nContent-Length: 50\r\n\r\nhello";
        let req = Request::parse(raw).unwrap();
        assert_eq!(req.body, b"hello");
    }

    #[test]
    fn test_read_request_stops_at_content_length() {
        let mut input = Cursor::new(
            b"POST /api/encode HTTP/1.1\r\nContent-Length: 3\r\n\r\nabcEXTRA".to_vec(),
        );
        let req = read_request(&mut input, 1024).unwrap().unwrap();
        assert_eq!(req.body, b"abc");
    }

    #[test]
    fn test_read_request_respects_limit() {
        let mut input = Cursor::new(vec![b'x'; 10_000]);
        assert!(read_request(&mut input, 100).unwrap().is_none());
        assert_eq!(input.position(), 100);
    }

    #[test]
    fn test_read_request_huge_content_length() {
        let mut input = Cursor::new(
            b"POST /api/encode HTTP/1.1\r\nContent-Length: 18446744073709551615\r\n\r\nabc"
                .to_vec(),
        );
        let req = read_request(&mut input, 1024).unwrap().unwrap();
        assert_eq!(req.body, b"abc");
    }

    #[test]
    fn test_response_bytes() {
        let resp = Response::new(200, "text/plain", "hi");
        let text = String::from_utf8(resp.to_bytes()).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Length: 2\r\n"));
        assert!(text.contains("Access-Control-Allow-Origin: *\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with("\r\n\r\nhi"));
    }

    #[test]
    fn test_error_body() {
        let resp = Response::error(400, "No text provided");
        assert_eq!(resp.body, br#"{"error":"No text provided"}"#);
        assert_eq!(resp.reason(), "Bad Request");
    }
}
