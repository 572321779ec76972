//! Ordered, case-insensitive request header collection.

use http::{HeaderMap, HeaderName, HeaderValue};

use crate::error::Error;

/// Ordered mapping of header name to value.
///
/// Names compare case-insensitively. Replacing an existing header keeps its original
/// position and spelling so that transport header lines stay stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header, replacing any value stored under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style variant of [`HeaderSet::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.entries[idx].1.as_str())
    }

    /// Value of `name`, or the empty string when absent.
    pub fn value(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// True when the header is present with a non-empty value.
    pub fn has_value(&self, name: &str) -> bool {
        !self.value(name).is_empty()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    /// Overlays `other` on top of `self`; values from `other` win.
    pub fn merge(&mut self, other: &HeaderSet) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderSet
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.set(name, value);
        }
        set
    }
}

pub(crate) fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

/// Rejects names and values that cannot be sent as HTTP header lines.
pub(crate) fn validate(headers: &HeaderSet) -> Result<(), Error> {
    for (name, value) in headers.iter() {
        HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::invalid_config(format!("invalid header name: {name}")))?;
        HeaderValue::from_str(value)
            .map_err(|_| Error::invalid_config(format!("invalid value for header {name}")))?;
    }
    Ok(())
}
