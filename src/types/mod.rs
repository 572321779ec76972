use std::{borrow::Cow, fmt, path::PathBuf};

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result, TransportError};

/// Canned ACL sent as `x-amz-acl`.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Acl {
    Private,
    #[default]
    PublicRead,
    PublicReadWrite,
    AuthenticatedRead,
}

impl Acl {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
            Self::PublicReadWrite => "public-read-write",
            Self::AuthenticatedRead => "authenticated-read",
        }
    }
}

impl fmt::Display for Acl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Acl {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "private" => Ok(Self::Private),
            "public-read" => Ok(Self::PublicRead),
            "public-read-write" => Ok(Self::PublicReadWrite),
            "authenticated-read" => Ok(Self::AuthenticatedRead),
            other => Err(Error::invalid_config(format!("unknown canned ACL: {other}"))),
        }
    }
}

/// Storage class sent as `x-amz-storage-class`.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StorageClass {
    #[default]
    Standard,
    ReducedRedundancy,
    StandardInfrequentAccess,
}

impl StorageClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::ReducedRedundancy => "REDUCED_REDUNDANCY",
            Self::StandardInfrequentAccess => "STANDARD_IA",
        }
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for StorageClass {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "STANDARD" => Ok(Self::Standard),
            "REDUCED_REDUNDANCY" => Ok(Self::ReducedRedundancy),
            "STANDARD_IA" => Ok(Self::StandardInfrequentAccess),
            other => Err(Error::invalid_config(format!(
                "unknown storage class: {other}"
            ))),
        }
    }
}

/// Where the bytes of an uploaded object come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectSource {
    /// In-memory bytes; sent with a `Content-MD5` header.
    Bytes(Bytes),
    /// A local file streamed from disk with its length as `Content-Length`.
    File(PathBuf),
    /// A remote document fetched into memory before upload.
    Url(Url),
}

impl ObjectSource {
    /// Treats `value` as a local file when it names a readable regular file, and as the
    /// object bytes otherwise.
    pub fn path_or_bytes(value: impl Into<String>) -> Self {
        let value = value.into();
        let path = std::path::Path::new(&value);
        if path.is_file() && std::fs::File::open(path).is_ok() {
            return Self::File(PathBuf::from(value));
        }
        Self::Bytes(Bytes::from(value))
    }
}

/// Outcome of one dispatched request.
///
/// Exactly one of [`Response::error`] and [`Response::status`] is set: a transport
/// failure carries no status or body, and a received response always has both (the body
/// may be empty).
#[derive(Debug)]
pub struct Response {
    error: Option<TransportError>,
    status: Option<StatusCode>,
    body: Option<Bytes>,
    headers: HeaderMap,
}

impl Response {
    pub(crate) fn completed(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            error: None,
            status: Some(status),
            body: Some(body),
            headers,
        }
    }

    pub(crate) fn failed(error: TransportError) -> Self {
        Self {
            error: Some(error),
            status: None,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    /// Transport failure, if the request never produced a response.
    pub fn error(&self) -> Option<&TransportError> {
        self.error.as_ref()
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Body decoded as UTF-8 (lossy).
    pub fn body_text(&self) -> Option<Cow<'_, str>> {
        self.body.as_deref().map(String::from_utf8_lossy)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// True for a received 2xx response.
    pub fn is_success(&self) -> bool {
        self.status.is_some_and(|s| s.is_success())
    }

    pub fn into_body(self) -> Option<Bytes> {
        self.body
    }

    /// Converts transport failures and non-2xx statuses into [`Error`].
    pub fn error_for_status(mut self) -> Result<Self> {
        if let Some(err) = self.error.take() {
            return Err(Error::Transport(err));
        }
        match self.status {
            Some(status) if !status.is_success() => {
                let body = self.body_text().unwrap_or_default();
                Err(crate::transport::response_error(status, &self.headers, &body))
            }
            _ => Ok(self),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct XmlError {
    #[serde(rename = "Code")]
    pub(crate) code: Option<String>,
    #[serde(rename = "Message")]
    pub(crate) message: Option<String>,
    #[serde(rename = "RequestId")]
    pub(crate) request_id: Option<String>,
    #[serde(rename = "HostId")]
    pub(crate) host_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct XmlListAllMyBucketsResult {
    #[serde(rename = "Buckets")]
    pub(crate) buckets: Option<XmlBuckets>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct XmlBuckets {
    #[serde(rename = "Bucket", default)]
    pub(crate) buckets: Vec<XmlBucket>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct XmlBucket {
    #[serde(rename = "Name")]
    pub(crate) name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acl_and_storage_class_wire_values() {
        assert_eq!(Acl::default().as_str(), "public-read");
        assert_eq!(Acl::try_from("authenticated-read").unwrap(), Acl::AuthenticatedRead);
        assert!(Acl::try_from("bucket-owner-full-control").is_err());

        assert_eq!(StorageClass::default().as_str(), "STANDARD");
        assert_eq!(
            StorageClass::StandardInfrequentAccess.to_string(),
            "STANDARD_IA"
        );
        assert_eq!(
            StorageClass::try_from("REDUCED_REDUNDANCY").unwrap(),
            StorageClass::ReducedRedundancy
        );
    }

    #[test]
    fn failed_response_has_no_status_or_body() {
        let resp = Response::failed(TransportError::new("timeout", "timed out"));
        assert!(resp.error().is_some());
        assert!(resp.status().is_none());
        assert!(resp.body().is_none());
        assert!(!resp.is_success());
        assert!(matches!(resp.error_for_status(), Err(Error::Transport(_))));
    }

    #[test]
    fn error_for_status_parses_s3_error_document() {
        let body = Bytes::from_static(
            b"<Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>",
        );
        let resp = Response::completed(StatusCode::FORBIDDEN, HeaderMap::new(), body);
        match resp.error_for_status() {
            Err(Error::Api { status, code, .. }) => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(code.as_deref(), Some("AccessDenied"));
            }
            other => panic!("expected api error, got {other:?}"),
        }

        let ok = Response::completed(StatusCode::NO_CONTENT, HeaderMap::new(), Bytes::new());
        assert!(ok.error_for_status().is_ok());
    }

    #[test]
    fn path_or_bytes_falls_back_to_bytes() {
        let source = ObjectSource::path_or_bytes("definitely/not/a/file.txt");
        assert_eq!(
            source,
            ObjectSource::Bytes(Bytes::from_static(b"definitely/not/a/file.txt"))
        );
    }
}
