//! Inline data-URI codec.
//!
//! Decodes and encodes self-describing inline-data strings of the shape
//! `data:<mediatype>[;<encoding>],<payload>`. The payload is base64 when the
//! encoding token says so (case-insensitively), otherwise literal text.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;

use crate::blob::Blob;
use crate::error::CacheError;

/// Prefix identifying an inline-data string.
pub const PREFIX: &str = "data:";

const BASE64_TOKEN: &str = "base64";

/// Whether a string looks like an inline-data URI.
pub fn is_data_uri(s: &str) -> bool {
    s.starts_with(PREFIX)
}

/// Decode an inline-data string into a [`Blob`].
///
/// # Examples
///
/// ```rust
/// use lsw_cache::data_uri;
///
/// let blob = data_uri::decode("data:text/plain;base64,aGVsbG8=").unwrap();
/// assert_eq!(blob.media_type(), "text/plain");
/// assert_eq!(blob.bytes().as_ref(), b"hello");
/// ```
pub fn decode(uri: &str) -> Result<Blob, CacheError> {
    let rest = uri
        .strip_prefix(PREFIX)
        .ok_or_else(|| CacheError::format("missing 'data:' prefix"))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| CacheError::format("missing ',' payload separator"))?;

    let (media_type, encoding) = match header.split_once(';') {
        Some((media_type, token)) => (media_type, Some(token)),
        None => (header, None),
    };

    let bytes = match encoding {
        Some(token) if token.eq_ignore_ascii_case(BASE64_TOKEN) => {
            Bytes::from(STANDARD.decode(payload)?)
        }
        // Any other (or no) encoding token means the payload is literal text.
        _ => Bytes::copy_from_slice(payload.as_bytes()),
    };

    Ok(Blob::new(media_type, bytes))
}

/// Encode a [`Blob`] as an inline-data string.
///
/// Always emits the base64 form so arbitrary bytes survive; `decode` of the
/// result reproduces the blob's media type and payload.
pub fn encode(blob: &Blob) -> String {
    format!(
        "{}{};{},{}",
        PREFIX,
        blob.media_type(),
        BASE64_TOKEN,
        STANDARD.encode(blob.bytes())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_base64_payload() {
        let blob = decode("data:text/plain;base64,aGVsbG8=").unwrap();
        assert_eq!(blob.media_type(), "text/plain");
        assert_eq!(blob.bytes().as_ref(), b"hello");
    }

    #[test]
    fn decode_base64_token_case_insensitive() {
        let blob = decode("data:text/plain;BASE64,aGVsbG8=").unwrap();
        assert_eq!(blob.bytes().as_ref(), b"hello");
    }

    #[test]
    fn decode_literal_payload() {
        let blob = decode("data:text/plain,hello").unwrap();
        assert_eq!(blob.media_type(), "text/plain");
        assert_eq!(blob.bytes().as_ref(), b"hello");
    }

    #[test]
    fn unknown_encoding_token_treated_as_literal() {
        let blob = decode("data:text/plain;utf8,hello").unwrap();
        assert_eq!(blob.bytes().as_ref(), b"hello");
    }

    #[test]
    fn missing_prefix_rejected() {
        assert!(matches!(
            decode("not-a-data-uri"),
            Err(CacheError::Format { .. })
        ));
    }

    #[test]
    fn missing_comma_rejected() {
        assert!(matches!(
            decode("data:text/plain;base64"),
            Err(CacheError::Format { .. })
        ));
    }

    #[test]
    fn malformed_base64_rejected() {
        assert!(matches!(
            decode("data:text/plain;base64,@@@@"),
            Err(CacheError::Base64(_))
        ));
    }

    #[test]
    fn empty_media_type_allowed() {
        let blob = decode("data:,hello").unwrap();
        assert_eq!(blob.media_type(), "");
        assert_eq!(blob.bytes().as_ref(), b"hello");
    }

    #[test]
    fn encode_then_decode_preserves_blob() {
        let original = Blob::new("application/octet-stream", vec![0u8, 1, 2, 255]);
        let uri = encode(&original);
        assert!(is_data_uri(&uri));
        assert_eq!(decode(&uri).unwrap(), original);
    }
}
