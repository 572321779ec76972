//! Blocking bucket operations.

use http::Method;

use crate::{
    client::{BlockingClient, PreparedRequest, RequestIntent},
    error::Result,
    types::{Acl, Response},
    util::headers::HeaderSet,
};

/// Bucket operations service (blocking).
#[derive(Clone)]
pub struct BlockingBucketsService {
    client: BlockingClient,
}

impl BlockingBucketsService {
    pub(crate) fn new(client: BlockingClient) -> Self {
        Self { client }
    }

    /// Starts a request to list the caller's buckets.
    pub fn list(&self) -> BlockingListBucketsRequest {
        BlockingListBucketsRequest {
            client: self.client.clone(),
        }
    }

    /// Starts a request to create a bucket.
    ///
    /// The name is resolved against the client's default bucket.
    pub fn create(&self, bucket: impl AsRef<str>) -> BlockingCreateBucketRequest {
        BlockingCreateBucketRequest {
            bucket: self.client.resolve_bucket_name(bucket.as_ref()),
            client: self.client.clone(),
            acl: None,
        }
    }

    /// Starts a request to delete a bucket.
    pub fn delete(&self, bucket: impl AsRef<str>) -> BlockingDeleteBucketRequest {
        BlockingDeleteBucketRequest {
            bucket: self.client.resolve_bucket_name(bucket.as_ref()),
            client: self.client.clone(),
        }
    }
}

/// Request builder for listing buckets.
pub struct BlockingListBucketsRequest {
    client: BlockingClient,
}

impl BlockingListBucketsRequest {
    pub fn prepare(&self) -> Result<PreparedRequest> {
        self.client
            .prepare(RequestIntent::new(Method::GET, "", ""))
    }

    /// Sends the request and returns bucket names in the order the service lists them.
    ///
    /// A transport failure or a non-2xx status is an error; a body without bucket names
    /// yields an empty list.
    pub fn send(self) -> Result<Vec<String>> {
        let resp = self.client.dispatch(self.prepare()?).error_for_status()?;
        let body = resp.body_text().unwrap_or_default();
        Ok(crate::util::xml::parse_bucket_names(&body))
    }
}

/// Request builder for creating a bucket.
pub struct BlockingCreateBucketRequest {
    client: BlockingClient,
    bucket: String,
    acl: Option<Acl>,
}

impl BlockingCreateBucketRequest {
    /// Overrides the client's default ACL for the new bucket.
    pub fn acl(mut self, acl: Acl) -> Self {
        self.acl = Some(acl);
        self
    }

    pub fn prepare(&self) -> Result<PreparedRequest> {
        let mut headers = HeaderSet::new();
        if let Some(acl) = self.acl {
            headers.set("x-amz-acl", acl.as_str());
        }
        self.client.prepare(
            RequestIntent::new(Method::PUT, self.bucket.as_str(), "").headers(headers),
        )
    }

    /// Sends the request. The service status is passed through in the [`Response`].
    pub fn send(self) -> Result<Response> {
        Ok(self.client.dispatch(self.prepare()?))
    }
}

/// Request builder for deleting a bucket.
pub struct BlockingDeleteBucketRequest {
    client: BlockingClient,
    bucket: String,
}

impl BlockingDeleteBucketRequest {
    pub fn prepare(&self) -> Result<PreparedRequest> {
        self.client
            .prepare(RequestIntent::new(Method::DELETE, self.bucket.as_str(), ""))
    }

    pub fn send(self) -> Result<Response> {
        Ok(self.client.dispatch(self.prepare()?))
    }
}
