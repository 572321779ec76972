use std::{error::Error as StdError, fmt};

use http::StatusCode;

/// Library result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Transport-level failure recorded for a dispatched request.
///
/// `resource` is the canonical resource that was signed, which is usually the first thing
/// to compare when a server reports a signature mismatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportError {
    /// Short transport-specific code (`timeout`, `host_not_found`, ...).
    pub code: String,
    /// Human readable description from the HTTP stack.
    pub message: String,
    /// Canonical resource of the failed request; empty until the dispatcher fills it in.
    pub resource: String,
}

impl TransportError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            resource: String::new(),
        }
    }

    pub(crate) fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.resource.is_empty() {
            write!(f, " (resource {})", self.resource)?;
        }
        Ok(())
    }
}

impl StdError for TransportError {}

/// Error type for request building, transport, and API responses.
#[non_exhaustive]
pub enum Error {
    /// Invalid configuration or parameters.
    InvalidConfig { message: String },

    /// A signed call was attempted without credentials.
    MissingCredentials,

    /// Service returned an error response.
    Api {
        status: StatusCode,
        code: Option<String>,
        message: Option<String>,
        request_id: Option<String>,
        host_id: Option<String>,
        body_snippet: Option<String>,
    },

    /// The HTTP call did not produce a response.
    Transport(TransportError),

    /// Fetching a remote upload source failed.
    Fetch {
        url: String,
        status: Option<StatusCode>,
        message: String,
    },

    /// Local file access failed.
    Io {
        message: String,
        source: std::io::Error,
    },
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { message } => f
                .debug_struct("InvalidConfig")
                .field("message", message)
                .finish(),
            Self::MissingCredentials => f.write_str("MissingCredentials"),
            Self::Api {
                status,
                code,
                message,
                request_id,
                host_id,
                body_snippet,
            } => f
                .debug_struct("Api")
                .field("status", status)
                .field("code", code)
                .field("message", message)
                .field("request_id", request_id)
                .field("host_id", host_id)
                .field("body_snippet", body_snippet)
                .finish(),
            Self::Transport(err) => f.debug_tuple("Transport").field(err).finish(),
            Self::Fetch {
                url,
                status,
                message,
            } => f
                .debug_struct("Fetch")
                .field("url", url)
                .field("status", status)
                .field("message", message)
                .finish(),
            Self::Io { message, source } => f
                .debug_struct("Io")
                .field("message", message)
                .field("source", source)
                .finish(),
        }
    }
}

impl Error {
    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates a local IO error.
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Returns an HTTP status when available.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Fetch { status, .. } => *status,
            Self::InvalidConfig { .. }
            | Self::MissingCredentials
            | Self::Transport(_)
            | Self::Io { .. } => None,
        }
    }

    /// Returns the request id if reported by the service.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Api { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    /// Returns true if repeating the same call could succeed.
    ///
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api { status, .. } => status.is_server_error(),
            Self::Transport(_) | Self::Fetch { .. } => true,
            Self::InvalidConfig { .. }
            | Self::MissingCredentials
            | Self::Io { .. } => false,
        }
    }
}

fn format_optional_field(label: &str, value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => format!(" {label}={v}"),
        _ => String::new(),
    }
}

fn format_optional_message(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => format!(" ({v})"),
        _ => String::new(),
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { message } => write!(f, "invalid config: {message}"),
            Self::MissingCredentials => f.write_str("credentials are required for signed requests"),
            Self::Api {
                status,
                code,
                message,
                request_id,
                ..
            } => {
                let code = format_optional_field("code", code);
                let request_id = format_optional_field("request_id", request_id);
                let msg = format_optional_message(message);
                write!(f, "api error: {status}{code}{request_id}{msg}")
            }
            Self::Transport(err) => write!(f, "transport error: {err}"),
            Self::Fetch {
                url,
                status: Some(status),
                ..
            } => write!(f, "fetch error: {url} returned {status}"),
            Self::Fetch { url, message, .. } => write!(f, "fetch error: {url}: {message}"),
            Self::Io { message, .. } => write!(f, "io error: {message}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::InvalidConfig { .. }
            | Self::MissingCredentials
            | Self::Api { .. }
            | Self::Fetch { .. } => None,
        }
    }
}

impl From<TransportError> for Error {
    fn from(value: TransportError) -> Self {
        Self::Transport(value)
    }
}
