use crate::types;

pub(crate) fn parse_error_xml(body: &str) -> Option<types::XmlError> {
    if body.trim().is_empty() {
        return None;
    }

    quick_xml::de::from_str::<types::XmlError>(body).ok()
}

/// Bucket names from a `ListAllMyBucketsResult` document, in document order.
///
/// A document without `Buckets/Bucket/Name` nodes yields no names. Malformed XML is
/// treated the same way.
pub(crate) fn parse_bucket_names(body: &str) -> Vec<String> {
    match quick_xml::de::from_str::<types::XmlListAllMyBucketsResult>(body) {
        Ok(parsed) => parsed
            .buckets
            .map(|b| b.buckets.into_iter().map(|bucket| bucket.name).collect())
            .unwrap_or_default(),
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "unparseable ListAllMyBuckets response, assuming no buckets");
            Vec::new()
        }
    }
}
