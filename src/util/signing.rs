//! Legacy S3 request signing (HMAC-SHA1, "signature version 2").
//!
//! ```text
//! StringToSign = Verb + "\n" +
//!                Content-MD5 + "\n" +
//!                Content-Type + "\n" +
//!                Date +
//!                ("\n" + amz-header)* +
//!                "\n" + Resource
//! Authorization = "AWS " + AccessKeyId + ":" + Base64(HMAC-SHA1(Secret, StringToSign))
//! ```

use std::cmp::Ordering;

use base64::Engine as _;
use hmac::{Hmac, Mac as _};
use http::Method;
use sha1::Sha1;
use time::{OffsetDateTime, UtcOffset};

use crate::{auth::Credentials, util::headers::HeaderSet};

type HmacSha1 = Hmac<Sha1>;

pub(crate) const AMZ_PREFIX: &str = "x-amz-";

/// Builds the exact string whose signature authenticates the request.
pub(crate) fn string_to_sign(method: &Method, headers: &HeaderSet, resource: &str) -> String {
    let amz = canonical_amz_headers(headers);
    format!(
        "{method}\n{}\n{}\n{}{amz}\n{resource}",
        headers.value("Content-MD5"),
        headers.value("Content-Type"),
        headers.value("Date"),
    )
}

/// Vendor header segment: each `name:value` line prefixed with `\n`, empty when there are none.
pub(crate) fn canonical_amz_headers(headers: &HeaderSet) -> String {
    let mut lines = headers
        .iter()
        .filter(|(name, value)| !value.is_empty() && is_amz_header(name))
        .map(|(name, value)| format!("{}:{value}", name.to_ascii_lowercase()))
        .collect::<Vec<_>>();

    lines.sort_by(|a, b| compare_amz_lines(a, b));

    let mut out = String::new();
    for line in lines {
        out.push('\n');
        out.push_str(&line);
    }
    out
}

/// Orders `name:value` lines by header name over the shorter of the two name lengths;
/// on a tie the shorter name comes first.
pub(crate) fn compare_amz_lines(a: &str, b: &str) -> Ordering {
    let len_a = a.find(':').unwrap_or(a.len());
    let len_b = b.find(':').unwrap_or(b.len());
    let min = len_a.min(len_b);
    let prefix = a.as_bytes()[..min].cmp(&b.as_bytes()[..min]);

    if len_a == len_b {
        return prefix;
    }
    match prefix {
        Ordering::Equal => len_a.cmp(&len_b),
        other => other,
    }
}

fn is_amz_header(name: &str) -> bool {
    name.len() >= AMZ_PREFIX.len() && name[..AMZ_PREFIX.len()].eq_ignore_ascii_case(AMZ_PREFIX)
}

/// `Authorization` header value for a canonical string.
pub(crate) fn authorization(credentials: &Credentials, string_to_sign: &str) -> String {
    let signature = signature(&credentials.secret_access_key, string_to_sign);
    format!("AWS {}:{signature}", credentials.access_key_id)
}

pub(crate) fn signature(secret: &str, string_to_sign: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC can accept any key length");
    mac.update(string_to_sign.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}

/// `Date` header value, e.g. `Tue, 27 Mar 2007 19:36:42 GMT`.
pub(crate) fn http_date(now: OffsetDateTime) -> String {
    let now = now.to_offset(UtcOffset::UTC);
    let weekday = now.weekday().to_string();
    let month = now.month().to_string();
    format!(
        "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
        &weekday[..3],
        now.day(),
        &month[..3],
        now.year(),
        now.hour(),
        now.minute(),
        now.second(),
    )
}
