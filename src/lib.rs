//! A small blocking client for S3-compatible storage using legacy HMAC-SHA1 request
//! signing ("signature version 2").
//!
//! ## Quick start
//!
//! ```no_run
//! # fn demo() -> Result<(), s3v2::Error> {
//! use s3v2::{Auth, BlockingClient};
//!
//! let client = BlockingClient::builder()
//!     .endpoint("s3.amazonaws.com")
//!     .auth(Auth::from_env()?)
//!     .build()?;
//!
//! for bucket in client.buckets().list().send()? {
//!     println!("{bucket}");
//! }
//!
//! client
//!     .objects()
//!     .put("my-bucket", "notes/hello.txt")
//!     .body_bytes("hello")
//!     .send()?
//!     .error_for_status()?;
//!
//! let obj = client.objects().get("my-bucket", "notes/hello.txt").send()?;
//! println!("{:?}: {:?}", obj.status(), obj.body_text());
//! # Ok(())
//! # }
//! ```
//!
//! Operations return a [`Response`] that carries the HTTP status and body as received.
//! Use [`Response::error_for_status`] to turn transport failures and non-2xx statuses
//! into an [`Error`].

#[cfg(all(
    feature = "rustls",
    feature = "native-tls",
    not(feature = "allow-both-tls")
))]
compile_error!("Enable only one of: rustls, native-tls.");

/// Service entry points and request builders.
pub mod api;
/// Shared request/response types.
pub mod types;

mod auth;
mod client;
mod error;
mod transport;
mod util;

pub use auth::{AddressingStyle, Auth, Credentials};
pub use client::{BlockingClient, BlockingClientBuilder, ClientConfig, PreparedRequest};
pub use error::{Error, Result, TransportError};
pub use transport::{HttpRequest, HttpResponse, RequestBody, Transport, UreqTransport};
pub use types::{Acl, ObjectSource, Response, StorageClass};
pub use util::headers::HeaderSet;
pub use util::url::is_dns_compatible_bucket;
