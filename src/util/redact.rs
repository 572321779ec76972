use crate::error::Error;

pub(crate) fn redact_value(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return "<redacted>".to_string();
    }

    let head = value.chars().take(4).collect::<String>();
    let tail = value
        .chars()
        .rev()
        .take(4)
        .collect::<String>()
        .chars()
        .rev()
        .collect::<String>();

    if head.len() + tail.len() >= value.len() {
        return "<redacted>".to_string();
    }

    format!("{head}...{tail}")
}

/// Hides the signature part of an `AWS key:signature` header value.
pub(crate) fn redact_authorization(value: &str) -> String {
    match value.split_once(':') {
        Some((prefix, _)) => format!("{prefix}:<redacted>"),
        None => "<redacted>".to_string(),
    }
}

pub(crate) fn metadata_header_name(value: &str) -> Result<String, Error> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::invalid_config("metadata key must not be empty"));
    }
    if !value
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
    {
        return Err(Error::invalid_config(
            "invalid metadata key for x-amz-meta-* header",
        ));
    }

    let mut name = String::with_capacity("x-amz-meta-".len() + value.len());
    name.push_str("x-amz-meta-");
    name.push_str(&value.to_ascii_lowercase());
    Ok(name)
}
