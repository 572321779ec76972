use std::{fs::File, sync::Arc, time::Duration};

use bytes::Bytes;
use http::Method;
use time::OffsetDateTime;
use url::Url;

use crate::{
    api,
    auth::{AddressingStyle, Auth},
    client::request::{IntentBody, PreparedRequest, RequestIntent},
    error::{Error, Result},
    transport::{HttpRequest, RequestBody, Transport, UreqTransport},
    types::{Acl, Response, StorageClass},
    util::{self, headers::HeaderSet},
};

pub(crate) const DEFAULT_ENDPOINT: &str = "s3.amazonaws.com";
const FETCH_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Session settings applied to every request a client makes.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    endpoint: String,
    https: bool,
    auth: Auth,
    default_bucket: Option<String>,
    acl: Acl,
    storage_class: StorageClass,
    addressing: AddressingStyle,
    timeout: Option<Duration>,
    insecure_fetch: bool,
}

impl ClientConfig {
    /// Service host, optionally with a port (`s3.amazonaws.com`, `localhost:9000`).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn scheme(&self) -> &'static str {
        if self.https { "https" } else { "http" }
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn default_bucket(&self) -> Option<&str> {
        self.default_bucket.as_deref()
    }

    pub fn acl(&self) -> Acl {
        self.acl
    }

    pub fn storage_class(&self) -> StorageClass {
        self.storage_class
    }

    pub fn addressing_style(&self) -> AddressingStyle {
        self.addressing
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn insecure_fetch(&self) -> bool {
        self.insecure_fetch
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            https: false,
            auth: Auth::Anonymous,
            default_bucket: None,
            acl: Acl::default(),
            storage_class: StorageClass::default(),
            addressing: AddressingStyle::Auto,
            timeout: None,
            insecure_fetch: false,
        }
    }
}

/// Blocking S3 client using legacy HMAC-SHA1 request signing.
///
/// Cloning is cheap; the transport is shared. Setters only affect the client they are
/// called on.
#[derive(Clone)]
pub struct BlockingClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

pub struct BlockingClientBuilder {
    config: ClientConfig,
    user_agent: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl BlockingClient {
    pub fn builder() -> BlockingClientBuilder {
        BlockingClientBuilder::new()
    }

    pub fn objects(&self) -> api::BlockingObjectsService {
        api::BlockingObjectsService::new(self.clone())
    }

    pub fn buckets(&self) -> api::BlockingBucketsService {
        api::BlockingBucketsService::new(self.clone())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn set_auth(&mut self, auth: Auth) {
        self.config.auth = auth;
    }

    pub fn set_acl(&mut self, acl: Acl) {
        self.config.acl = acl;
    }

    pub fn set_storage_class(&mut self, storage_class: StorageClass) {
        self.config.storage_class = storage_class;
    }

    /// Sets or clears the bucket that every bucket argument is nested under.
    pub fn set_bucket(&mut self, bucket: Option<&str>) {
        self.config.default_bucket = bucket.map(normalize_default_bucket);
    }

    pub fn set_endpoint(&mut self, endpoint: impl AsRef<str>) -> Result<()> {
        self.config.endpoint = validate_endpoint(endpoint.as_ref())?;
        Ok(())
    }

    /// Applies the default bucket to a caller-supplied bucket argument.
    ///
    /// One leading `/` is dropped, the default bucket (if any) is prefixed with a `/`
    /// separator, and one trailing `/` is dropped: default `root` and `/sub/` give `root/sub`.
    pub fn resolve_bucket_name(&self, bucket: &str) -> String {
        let bucket = bucket.strip_prefix('/').unwrap_or(bucket);
        let mut name = match self.config.default_bucket.as_deref() {
            Some(default) => format!("{default}/{bucket}"),
            None => bucket.to_string(),
        };
        if name.ends_with('/') {
            name.pop();
        }
        name
    }

    pub(crate) fn prepare(&self, intent: RequestIntent) -> Result<PreparedRequest> {
        self.prepare_at(intent, OffsetDateTime::now_utc())
    }

    /// Builds and signs `intent` with `now` as the request date.
    pub(crate) fn prepare_at(
        &self,
        intent: RequestIntent,
        now: OffsetDateTime,
    ) -> Result<PreparedRequest> {
        let creds = self
            .config
            .auth
            .credentials()
            .ok_or(Error::MissingCredentials)?;

        let RequestIntent {
            method,
            bucket,
            key,
            headers: caller_headers,
            body,
        } = intent;

        if has_dot_segment(&bucket) || has_dot_segment(&key) {
            return Err(Error::invalid_config(
                "bucket and key must not contain `.` or `..` path segments",
            ));
        }

        let uri = util::encode::object_uri(&key);
        let mut headers = HeaderSet::new()
            .with("Content-MD5", "")
            .with("Content-Type", "")
            .with("Date", util::signing::http_date(now))
            .with("Host", self.config.endpoint.as_str())
            .with("x-amz-storage-class", self.config.storage_class.as_str())
            .with("x-amz-acl", self.config.acl.as_str());
        if let Some(token) = &creds.session_token {
            headers.set("x-amz-security-token", token.as_str());
        }
        headers.merge(&caller_headers);

        let target = util::url::resolve_target(
            &self.config.endpoint,
            &bucket,
            &uri,
            self.config.addressing,
        )?;
        headers.set("Host", target.host.as_str());

        let body = match body {
            IntentBody::Empty => RequestBody::Empty,
            IntentBody::Bytes(bytes) => {
                headers.set("Content-MD5", util::md5::content_md5(&bytes));
                if !headers.has_value("Content-Type") {
                    headers.set("Content-Type", util::mime::from_bytes(&bytes));
                }
                RequestBody::Bytes(bytes)
            }
            IntentBody::File(path) => {
                let file = File::open(&path).map_err(|e| {
                    Error::io(format!("failed to open {}", path.display()), e)
                })?;
                let len = file
                    .metadata()
                    .map_err(|e| Error::io(format!("failed to stat {}", path.display()), e))?
                    .len();
                if !headers.has_value("Content-Type") {
                    headers.set("Content-Type", util::mime::from_path(&path));
                }
                RequestBody::File { file, len }
            }
        };

        let string_to_sign = util::signing::string_to_sign(&method, &headers, &target.resource);
        let authorization = util::signing::authorization(creds, &string_to_sign);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            resource = %target.resource,
            string_to_sign = %string_to_sign.escape_debug(),
            "signed request"
        );

        let mut lines = headers
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<Vec<_>>();
        lines.push(("Authorization".to_string(), authorization));

        let url = Url::parse(&format!(
            "{}://{}{}",
            self.config.scheme(),
            target.host,
            target.path
        ))
        .map_err(|e| Error::invalid_config(format!("cannot build request URL: {e}")))?;

        Ok(PreparedRequest {
            method,
            url,
            headers: lines,
            body,
            bucket,
            key,
            resource: target.resource,
            string_to_sign,
        })
    }

    /// Sends a prepared request. Transport failures are reported in the returned
    /// [`Response`], never as a panic or `Err`.
    pub fn dispatch(&self, prepared: PreparedRequest) -> Response {
        #[cfg(feature = "tracing")]
        let _guard = tracing::info_span!(
            "s3.request",
            method = %prepared.method,
            bucket = prepared.bucket.as_str(),
            key = prepared.key.as_str(),
            host = prepared.url.host_str().unwrap_or(""),
        )
        .entered();

        let resource = prepared.resource.clone();
        match self
            .transport
            .send(prepared.into_http_request(self.config.timeout))
        {
            Ok(resp) => Response::completed(resp.status, resp.headers, resp.body),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(code = %err.code, message = %err.message, resource = %resource, "request failed");
                Response::failed(err.with_resource(resource))
            }
        }
    }

    /// Downloads a remote document into memory for use as an upload body.
    pub(crate) fn fetch(&self, url: &Url) -> Result<Bytes> {
        let mut request = HttpRequest::new(Method::GET, url.clone());
        request.connect_timeout = Some(FETCH_CONNECT_TIMEOUT);
        request.timeout = self.config.timeout;
        request.verify_tls = !self.config.insecure_fetch;

        let resp = self.transport.send(request).map_err(|err| Error::Fetch {
            url: url.to_string(),
            status: None,
            message: err.to_string(),
        })?;

        if !resp.status.is_success() {
            return Err(Error::Fetch {
                url: url.to_string(),
                status: Some(resp.status),
                message: "remote source returned a non-success status".to_string(),
            });
        }

        Ok(resp.body)
    }
}

impl BlockingClientBuilder {
    fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            user_agent: None,
            transport: None,
        }
    }

    /// Service host with an optional port and no scheme, e.g. `localhost:9000`.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    pub fn https(mut self, https: bool) -> Self {
        self.config.https = https;
        self
    }

    pub fn auth(mut self, auth: impl Into<Auth>) -> Self {
        self.config.auth = auth.into();
        self
    }

    pub fn default_bucket(mut self, bucket: impl AsRef<str>) -> Self {
        self.config.default_bucket = Some(normalize_default_bucket(bucket.as_ref()));
        self
    }

    pub fn acl(mut self, acl: Acl) -> Self {
        self.config.acl = acl;
        self
    }

    pub fn storage_class(mut self, storage_class: StorageClass) -> Self {
        self.config.storage_class = storage_class;
        self
    }

    pub fn addressing_style(mut self, style: AddressingStyle) -> Self {
        self.config.addressing = style;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Skips certificate verification when fetching remote upload sources.
    pub fn insecure_fetch(mut self, insecure: bool) -> Self {
        self.config.insecure_fetch = insecure;
        self
    }

    /// Replaces the default `ureq` transport.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn build(mut self) -> Result<BlockingClient> {
        self.config.endpoint = validate_endpoint(&self.config.endpoint)?;
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(UreqTransport::new(self.user_agent)),
        };

        Ok(BlockingClient {
            config: self.config,
            transport,
        })
    }
}

fn validate_endpoint(endpoint: &str) -> Result<String> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(Error::invalid_config("endpoint must not be empty"));
    }
    if endpoint.contains("://") {
        return Err(Error::invalid_config(
            "endpoint must be a host without a scheme; use https() to select TLS",
        ));
    }
    if endpoint.contains(['/', '?', '#']) {
        return Err(Error::invalid_config(
            "endpoint must not include a path, query or fragment",
        ));
    }
    Url::parse(&format!("http://{endpoint}/"))
        .map_err(|_| Error::invalid_config("endpoint is not a valid host"))?;
    Ok(endpoint.to_ascii_lowercase())
}

/// URL parsing collapses `.` and `..` segments, which would make the request path differ
/// from the signed resource.
fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(|segment| segment == "." || segment == "..")
}

fn normalize_default_bucket(bucket: &str) -> String {
    bucket.strip_suffix('/').unwrap_or(bucket).to_string()
}
