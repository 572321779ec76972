use crate::{auth::AddressingStyle, error::Error};

/// Where a request goes and what gets signed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ResolvedTarget {
    /// Value for the `Host` header.
    pub(crate) host: String,
    /// Transport path, already percent-encoded.
    pub(crate) path: String,
    /// Canonical resource used in the string-to-sign.
    pub(crate) resource: String,
}

/// Resolves host, request path, and canonical resource for `bucket` + `uri`.
///
/// `uri` is the encoded object URI and always starts with `/`. An empty bucket targets the
/// service itself.
pub(crate) fn resolve_target(
    endpoint: &str,
    bucket: &str,
    uri: &str,
    addressing: AddressingStyle,
) -> Result<ResolvedTarget, Error> {
    if bucket.is_empty() {
        return Ok(ResolvedTarget {
            host: endpoint.to_string(),
            path: uri.to_string(),
            resource: uri.to_string(),
        });
    }

    match resolve_addressing_style(bucket, addressing)? {
        AddressingStyle::VirtualHosted => Ok(ResolvedTarget {
            host: format!("{bucket}.{endpoint}"),
            path: uri.to_string(),
            resource: format!("/{bucket}{uri}"),
        }),
        _ => {
            let path = format!("/{bucket}{uri}");
            Ok(ResolvedTarget {
                host: endpoint.to_string(),
                resource: path.clone(),
                path,
            })
        }
    }
}

fn resolve_addressing_style(
    bucket: &str,
    addressing: AddressingStyle,
) -> Result<AddressingStyle, Error> {
    match addressing {
        AddressingStyle::Path => Ok(AddressingStyle::Path),
        AddressingStyle::VirtualHosted => {
            if !is_dns_compatible_bucket(bucket) {
                return Err(Error::invalid_config(
                    "bucket is not DNS compatible for virtual-hosted-style",
                ));
            }
            Ok(AddressingStyle::VirtualHosted)
        }
        AddressingStyle::Auto => {
            if is_dns_compatible_bucket(bucket) {
                Ok(AddressingStyle::VirtualHosted)
            } else {
                Ok(AddressingStyle::Path)
            }
        }
    }
}

/// True when `bucket` can be used as a DNS label in front of the endpoint host.
pub fn is_dns_compatible_bucket(bucket: &str) -> bool {
    let bytes = bucket.as_bytes();
    let (Some(&first), Some(&last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    if bytes.len() > 63 {
        return false;
    }

    let is_allowed = |b: u8| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.');
    if !bytes.iter().all(|&b| is_allowed(b)) {
        return false;
    }

    if bucket.contains("-.") || bucket.contains("..") {
        return false;
    }

    let is_edge = |b: u8| matches!(b, b'a'..=b'z' | b'0'..=b'9');
    is_edge(first) && is_edge(last)
}
