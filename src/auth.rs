use std::fmt;

use crate::error::Error;

#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl Credentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Result<Self, Error> {
        let access_key_id = access_key_id.into();
        let secret_access_key = secret_access_key.into();

        if access_key_id.trim().is_empty() {
            return Err(Error::invalid_config("access_key_id must not be empty"));
        }
        if secret_access_key.trim().is_empty() {
            return Err(Error::invalid_config("secret_access_key must not be empty"));
        }

        Ok(Self {
            access_key_id,
            secret_access_key,
            session_token: None,
        })
    }

    /// Attaches a temporary session token, sent (and signed) as `x-amz-security-token`.
    pub fn with_session_token(mut self, session_token: impl Into<String>) -> Result<Self, Error> {
        let session_token = session_token.into();
        if session_token.trim().is_empty() {
            return Err(Error::invalid_config("session_token must not be empty"));
        }
        self.session_token = Some(session_token);
        Ok(self)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "access_key_id",
                &crate::util::redact::redact_value(&self.access_key_id),
            )
            .field("secret_access_key", &"<redacted>")
            .field(
                "session_token",
                &self
                    .session_token
                    .as_ref()
                    .map(|v| crate::util::redact::redact_value(v)),
            )
            .finish()
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub enum Auth {
    #[default]
    Anonymous,
    Static(Credentials),
}

impl Auth {
    pub fn from_env() -> Result<Self, Error> {
        let access_key_id = std::env::var("AWS_ACCESS_KEY_ID")
            .map_err(|_| Error::invalid_config("missing AWS_ACCESS_KEY_ID"))?;
        let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY")
            .map_err(|_| Error::invalid_config("missing AWS_SECRET_ACCESS_KEY"))?;
        let session_token = std::env::var("AWS_SESSION_TOKEN").ok();

        let mut creds = Credentials::new(access_key_id, secret_access_key)?;
        if let Some(token) = session_token.filter(|t| !t.trim().is_empty()) {
            creds = creds.with_session_token(token)?;
        }

        Ok(Self::Static(creds))
    }

    pub fn is_present(&self) -> bool {
        self.credentials().is_some()
    }

    pub(crate) fn credentials(&self) -> Option<&Credentials> {
        match self {
            Self::Anonymous => None,
            Self::Static(creds) => Some(creds),
        }
    }
}

impl From<Credentials> for Auth {
    fn from(value: Credentials) -> Self {
        Self::Static(value)
    }
}

/// How a bucket is placed in the request URL.
///
/// `Auto` uses virtual-hosted style whenever the bucket name is a valid DNS label and
/// falls back to path style otherwise.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddressingStyle {
    #[default]
    Auto,
    Path,
    VirtualHosted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_keys() {
        assert!(Credentials::new("", "secret").is_err());
        assert!(Credentials::new("AKID", "  ").is_err());
        assert!(Credentials::new("AKID", "secret").is_ok());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let creds = Credentials::new("AKIDEXAMPLE123", "wJalrXUtnFEMI")
            .unwrap()
            .with_session_token("token-token-token")
            .unwrap();
        let out = format!("{creds:?}");
        assert!(!out.contains("wJalrXUtnFEMI"));
        assert!(!out.contains("token-token-token"));
        assert!(out.contains("AKID...E123"));
    }

    #[test]
    fn anonymous_auth_has_no_credentials() {
        assert!(!Auth::Anonymous.is_present());
        let auth = Auth::from(Credentials::new("AKID", "secret").unwrap());
        assert!(auth.is_present());
    }
}
