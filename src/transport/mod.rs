//! HTTP transport seam.
//!
//! The client prepares and signs requests; a [`Transport`] only moves bytes. The default
//! implementation is [`UreqTransport`]; tests plug in their own.

use std::{fmt, fs::File, time::Duration};

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use url::Url;

use crate::error::{Error, TransportError};

pub(crate) mod blocking_transport;
#[cfg(feature = "rustls")]
pub(crate) mod tls;

pub use blocking_transport::UreqTransport;

/// Executes one HTTP exchange.
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the received response, whatever its status.
    ///
    /// An `Err` means no response was received (DNS, connect, TLS, timeout, IO).
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Request body handed to a transport.
pub enum RequestBody {
    Empty,
    Bytes(Bytes),
    /// An open file streamed as the body; `len` is sent as `Content-Length`.
    File { file: File, len: u64 },
}

impl RequestBody {
    pub fn len(&self) -> u64 {
        match self {
            Self::Empty => 0,
            Self::Bytes(b) => b.len() as u64,
            Self::File { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            Self::File { len, .. } => f.debug_struct("File").field("len", len).finish(),
        }
    }
}

/// A fully assembled HTTP request.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    /// Header lines in send order.
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    /// When false, the server certificate is not verified.
    pub verify_tls: bool,
}

impl HttpRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: RequestBody::Empty,
            connect_timeout: None,
            timeout: None,
            verify_tls: true,
        }
    }

    /// First header value stored under `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A received HTTP response with its body fully read.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

pub(crate) fn response_error(status: StatusCode, headers: &HeaderMap, body: &str) -> Error {
    let request_id = crate::util::headers::header_string(headers, "x-amz-request-id");
    let snippet = truncate_snippet(body, 4096);

    if let Some(parsed) = crate::util::xml::parse_error_xml(body) {
        return Error::Api {
            status,
            code: parsed.code,
            message: parsed.message,
            request_id: parsed.request_id.or(request_id),
            host_id: parsed.host_id,
            body_snippet: Some(snippet),
        };
    }

    Error::Api {
        status,
        code: None,
        message: None,
        request_id,
        host_id: None,
        body_snippet: Some(snippet),
    }
}

fn truncate_snippet(body: &str, max_len: usize) -> String {
    if body.len() <= max_len {
        return body.to_string();
    }

    let mut cut = max_len;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }

    let mut out = body[..cut].to_string();
    out.push_str("...");
    out
}
