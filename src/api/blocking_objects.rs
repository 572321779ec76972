//! Blocking object operations.

use std::path::PathBuf;

use bytes::Bytes;
use http::Method;
use url::Url;

use crate::{
    client::{BlockingClient, IntentBody, PreparedRequest, RequestIntent},
    error::{Error, Result},
    types::{Acl, ObjectSource, Response, StorageClass},
    util::headers::{self, HeaderSet},
};

/// Object operations service (blocking).
#[derive(Clone)]
pub struct BlockingObjectsService {
    client: BlockingClient,
}

impl BlockingObjectsService {
    pub(crate) fn new(client: BlockingClient) -> Self {
        Self { client }
    }

    /// Starts a request to GET an object.
    pub fn get(&self, bucket: impl AsRef<str>, key: impl Into<String>) -> BlockingGetObjectRequest {
        BlockingGetObjectRequest {
            bucket: self.client.resolve_bucket_name(bucket.as_ref()),
            client: self.client.clone(),
            key: key.into(),
            headers: HeaderSet::new(),
        }
    }

    /// Starts a request to PUT an object.
    pub fn put(&self, bucket: impl AsRef<str>, key: impl Into<String>) -> BlockingPutObjectRequest {
        BlockingPutObjectRequest {
            bucket: self.client.resolve_bucket_name(bucket.as_ref()),
            client: self.client.clone(),
            key: key.into(),
            source: None,
            headers: HeaderSet::new(),
            metadata: Vec::new(),
        }
    }

    /// Starts a request to DELETE an object.
    pub fn delete(
        &self,
        bucket: impl AsRef<str>,
        key: impl Into<String>,
    ) -> BlockingDeleteObjectRequest {
        BlockingDeleteObjectRequest {
            bucket: self.client.resolve_bucket_name(bucket.as_ref()),
            client: self.client.clone(),
            key: key.into(),
        }
    }
}

/// Request builder for GET object.
pub struct BlockingGetObjectRequest {
    client: BlockingClient,
    bucket: String,
    key: String,
    headers: HeaderSet,
}

impl BlockingGetObjectRequest {
    /// Adds a request header such as `Range` or `If-None-Match`.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    pub fn prepare(&self) -> Result<PreparedRequest> {
        headers::validate(&self.headers)?;
        self.client.prepare(
            RequestIntent::new(Method::GET, self.bucket.as_str(), self.key.as_str())
                .headers(self.headers.clone()),
        )
    }

    /// Sends the request. The object bytes are in [`Response::body`].
    pub fn send(self) -> Result<Response> {
        Ok(self.client.dispatch(self.prepare()?))
    }
}

/// Request builder for DELETE object.
pub struct BlockingDeleteObjectRequest {
    client: BlockingClient,
    bucket: String,
    key: String,
}

impl BlockingDeleteObjectRequest {
    pub fn prepare(&self) -> Result<PreparedRequest> {
        self.client.prepare(RequestIntent::new(
            Method::DELETE,
            self.bucket.as_str(),
            self.key.as_str(),
        ))
    }

    pub fn send(self) -> Result<Response> {
        Ok(self.client.dispatch(self.prepare()?))
    }
}

/// Request builder for PUT object.
///
/// Without a body source an empty object is uploaded.
pub struct BlockingPutObjectRequest {
    client: BlockingClient,
    bucket: String,
    key: String,
    source: Option<ObjectSource>,
    headers: HeaderSet,
    metadata: Vec<(String, String)>,
}

impl BlockingPutObjectRequest {
    /// Uploads in-memory bytes.
    pub fn body_bytes(mut self, body: impl Into<Bytes>) -> Self {
        self.source = Some(ObjectSource::Bytes(body.into()));
        self
    }

    /// Streams a local file.
    pub fn body_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(ObjectSource::File(path.into()));
        self
    }

    /// Fetches a remote document and uploads its bytes.
    pub fn body_url(mut self, url: Url) -> Self {
        self.source = Some(ObjectSource::Url(url));
        self
    }

    /// Uploads the named file when `value` is a readable file path, otherwise `value` itself.
    pub fn body_path_or_bytes(mut self, value: impl Into<String>) -> Self {
        self.source = Some(ObjectSource::path_or_bytes(value));
        self
    }

    pub fn body(mut self, source: ObjectSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets a request header, replacing a default of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Sets the Content-Type header; otherwise it is guessed from the body.
    pub fn content_type(self, value: impl Into<String>) -> Self {
        self.header("Content-Type", value)
    }

    pub fn acl(self, acl: Acl) -> Self {
        self.header("x-amz-acl", acl.as_str())
    }

    pub fn storage_class(self, storage_class: StorageClass) -> Self {
        self.header("x-amz-storage-class", storage_class.as_str())
    }

    /// Adds a user metadata entry, sent as `x-amz-meta-<key>`.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    /// Signs the request. A URL source is downloaded here.
    pub fn prepare(&self) -> Result<PreparedRequest> {
        if !self.client.config().auth().is_present() {
            return Err(Error::MissingCredentials);
        }

        let mut headers = self.headers.clone();
        for (name, value) in &self.metadata {
            headers.set(crate::util::redact::metadata_header_name(name)?, value.as_str());
        }
        headers::validate(&headers)?;

        let body = match &self.source {
            None => IntentBody::Bytes(Bytes::new()),
            Some(ObjectSource::Bytes(bytes)) => IntentBody::Bytes(bytes.clone()),
            Some(ObjectSource::File(path)) => IntentBody::File(path.clone()),
            Some(ObjectSource::Url(url)) => IntentBody::Bytes(self.client.fetch(url)?),
        };

        self.client.prepare(
            RequestIntent::new(Method::PUT, self.bucket.as_str(), self.key.as_str())
                .headers(headers)
                .body(body),
        )
    }

    pub fn send(self) -> Result<Response> {
        Ok(self.client.dispatch(self.prepare()?))
    }
}
