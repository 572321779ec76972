mod blocking_client;
mod request;

pub use blocking_client::{BlockingClient, BlockingClientBuilder, ClientConfig};
pub use request::PreparedRequest;
pub(crate) use request::{IntentBody, RequestIntent};
