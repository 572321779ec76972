use std::{fmt, path::PathBuf, time::Duration};

use bytes::Bytes;
use http::Method;
use url::Url;

use crate::{
    transport::{HttpRequest, RequestBody},
    util::{headers::HeaderSet, redact::redact_authorization},
};

/// What an operation asks for, before defaults, addressing and signing are applied.
#[derive(Debug)]
pub(crate) struct RequestIntent {
    pub(crate) method: Method,
    /// Already resolved against the default bucket; empty for service-level calls.
    pub(crate) bucket: String,
    pub(crate) key: String,
    /// Caller headers, overriding the defaults by name.
    pub(crate) headers: HeaderSet,
    pub(crate) body: IntentBody,
}

#[derive(Debug)]
pub(crate) enum IntentBody {
    Empty,
    Bytes(Bytes),
    File(PathBuf),
}

impl RequestIntent {
    pub(crate) fn new(method: Method, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            method,
            bucket: bucket.into(),
            key: key.into(),
            headers: HeaderSet::new(),
            body: IntentBody::Empty,
        }
    }

    pub(crate) fn headers(mut self, headers: HeaderSet) -> Self {
        self.headers = headers;
        self
    }

    pub(crate) fn body(mut self, body: IntentBody) -> Self {
        self.body = body;
        self
    }
}

/// A signed request, ready to be dispatched.
///
/// Header lines are in send order with `Authorization` last. Headers with empty values are
/// signed as empty strings but never sent.
pub struct PreparedRequest {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: RequestBody,
    pub(crate) bucket: String,
    pub(crate) key: String,
    pub(crate) resource: String,
    pub(crate) string_to_sign: String,
}

impl PreparedRequest {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First header value stored under `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Canonical resource covered by the signature (`/bucket/key` for both addressing styles).
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Exact string that was signed. Compare it with the `StringToSign` in a
    /// `SignatureDoesNotMatch` error document.
    pub fn string_to_sign(&self) -> &str {
        &self.string_to_sign
    }

    pub fn body_len(&self) -> u64 {
        self.body.len()
    }

    pub(crate) fn into_http_request(self, timeout: Option<Duration>) -> HttpRequest {
        let mut request = HttpRequest::new(self.method, self.url);
        request.headers = self.headers;
        request.body = self.body;
        request.timeout = timeout;
        request
    }
}

impl fmt::Debug for PreparedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers = self
            .headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case("authorization") {
                    (name.as_str(), redact_authorization(value))
                } else {
                    (name.as_str(), value.clone())
                }
            })
            .collect::<Vec<_>>();

        f.debug_struct("PreparedRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &headers)
            .field("body", &self.body)
            .field("resource", &self.resource)
            .finish()
    }
}
