use std::path::Path;

pub(crate) const OCTET_STREAM: &str = "application/octet-stream";

/// Content type guessed from a file extension.
pub(crate) fn from_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(OCTET_STREAM)
        .to_string()
}

/// Content type guessed from leading bytes.
pub(crate) fn from_bytes(bytes: &[u8]) -> &'static str {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xff\xd8\xff", "image/jpeg"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"%PDF-", "application/pdf"),
        (b"PK\x03\x04", "application/zip"),
        (b"\x1f\x8b", "application/gzip"),
        (b"BZh", "application/x-bzip2"),
        (b"II*\x00", "image/tiff"),
        (b"MM\x00*", "image/tiff"),
        (b"OggS", "application/ogg"),
        (b"ID3", "audio/mpeg"),
    ];

    if let Some(&(_, mime)) = SIGNATURES.iter().find(|(sig, _)| bytes.starts_with(sig)) {
        return mime;
    }
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WAVE" {
        return "audio/x-wav";
    }

    let head = &bytes[..bytes.len().min(512)];
    let Some(text) = leading_text(head) else {
        return OCTET_STREAM;
    };

    let trimmed = text.trim_start().to_ascii_lowercase();
    if trimmed.starts_with("<?xml") {
        if trimmed.contains("<svg") {
            return "image/svg+xml";
        }
        return "text/xml";
    }
    if trimmed.starts_with("<!doctype html") || trimmed.starts_with("<html") {
        return "text/html";
    }
    if trimmed.starts_with("<svg") {
        return "image/svg+xml";
    }
    "text/plain"
}

/// `head` as text when it looks like UTF-8 without control bytes; a multi-byte character
/// cut at the end of the window is tolerated.
fn leading_text(head: &[u8]) -> Option<&str> {
    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        Err(err) if err.error_len().is_none() => {
            std::str::from_utf8(&head[..err.valid_up_to()]).ok()?
        }
        Err(_) => return None,
    };

    let is_binary = text
        .bytes()
        .any(|b| b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r' | 0x0c));
    if is_binary { None } else { Some(text) }
}
