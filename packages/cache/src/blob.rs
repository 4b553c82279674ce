//! Binary payloads tagged with a media type.

use bytes::Bytes;

/// A byte payload with an associated media type.
///
/// Blobs come out of the data-URI codec and out of cache resolution when a
/// leaf decodes to binary content. A blob made from bare text carries an
/// empty media type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    media_type: String,
    bytes: Bytes,
}

impl Blob {
    /// Create a blob from a media type and raw bytes.
    pub fn new(media_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Blob {
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Create an untyped blob from text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Blob {
            media_type: String::new(),
            bytes: Bytes::from(text.into().into_bytes()),
        }
    }

    /// The media type, possibly empty.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// The raw bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// The payload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// View the payload as UTF-8 text, if it is valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_blob() {
        let blob = Blob::new("text/plain", &b"hello"[..]);
        assert_eq!(blob.media_type(), "text/plain");
        assert_eq!(blob.bytes().as_ref(), b"hello");
        assert_eq!(blob.len(), 5);
        assert!(!blob.is_empty());
    }

    #[test]
    fn from_text_has_empty_media_type() {
        let blob = Blob::from_text("hi");
        assert_eq!(blob.media_type(), "");
        assert_eq!(blob.as_text(), Some("hi"));
    }

    #[test]
    fn as_text_rejects_invalid_utf8() {
        let blob = Blob::new("application/octet-stream", vec![0xff, 0xfe]);
        assert_eq!(blob.as_text(), None);
    }

    #[test]
    fn empty_blob() {
        let blob = Blob::from_text("");
        assert!(blob.is_empty());
        assert_eq!(blob.len(), 0);
    }
}
