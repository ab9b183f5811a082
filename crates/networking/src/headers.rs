//! HTTP header handling.

use indexmap::IndexMap;
use std::fmt;

/// HTTP header map (case-insensitive keys, order-preserving).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderMap {
    headers: IndexMap<String, String>,
}

impl HeaderMap {
    /// Create a new empty header map.
    pub fn new() -> Self {
        Self {
            headers: IndexMap::new(),
        }
    }

    /// Insert a header.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_lowercase();
        self.headers.insert(name, value.into());
    }

    /// Append a header, joining repeated values with `, `.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_lowercase();
        let value = value.into();
        match self.headers.get_mut(&name) {
            Some(existing) => {
                existing.push_str(", ");
                existing.push_str(&value);
            }
            None => {
                self.headers.insert(name, value);
            }
        }
    }

    /// Get a header value.
    pub fn get(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_lowercase())
    }

    /// Check if a header exists.
    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(&name.to_lowercase())
    }

    /// Remove a header.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.headers.shift_remove(&name.to_lowercase())
    }

    /// Get number of headers.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Iterate over headers.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.headers.iter()
    }

    /// Get Content-Type header.
    pub fn content_type(&self) -> Option<&String> {
        self.get(names::CONTENT_TYPE)
    }
}

impl fmt::Display for HeaderMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.headers {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// Header names used by the probers.
pub mod names {
    pub const CONTENT_TYPE: &str = "content-type";
    pub const RANGE: &str = "range";
}

/// Build a `Range` header value for an inclusive byte range.
pub fn byte_range(start: u64, end: u64) -> String {
    format!("bytes={}-{}", start, end)
}

/// Content type utilities.
pub mod content_type {
    pub const IMAGE_PREFIX: &str = "image/";
    pub const VIDEO_PREFIX: &str = "video/";

    /// Check if content type is an image.
    pub fn is_image(content_type: &str) -> bool {
        content_type.starts_with(IMAGE_PREFIX)
    }

    /// Check if content type is a video.
    pub fn is_video(content_type: &str) -> bool {
        content_type.starts_with(VIDEO_PREFIX)
    }

    /// Essence (`type/subtype`) of a content type, when it parses.
    pub fn essence(content_type: &str) -> Option<String> {
        content_type
            .parse::<mime::Mime>()
            .ok()
            .map(|m| m.essence_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_map() {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", "video/mp4");
        headers.insert("Content-Range", "bytes 0-0/1024");

        assert_eq!(headers.get("content-type"), Some(&"video/mp4".to_string()));
        assert_eq!(headers.content_type(), Some(&"video/mp4".to_string()));
        assert_eq!(headers.get("CONTENT-RANGE"), Some(&"bytes 0-0/1024".to_string()));
        assert_eq!(headers.len(), 2);

        headers.remove("CONTENT-RANGE");
        assert!(!headers.contains("content-range"));
    }

    #[test]
    fn test_append_joins_repeated_values() {
        let mut headers = HeaderMap::new();
        headers.append("Content-Type", "image/png");
        headers.append("content-type", "video/mp4");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.content_type(), Some(&"image/png, video/mp4".to_string()));
    }

    #[test]
    fn test_header_map_from_iter() {
        let headers: HeaderMap = [("Content-Type", "image/png")].into_iter().collect();
        assert_eq!(headers.content_type(), Some(&"image/png".to_string()));
    }

    #[test]
    fn test_byte_range() {
        assert_eq!(byte_range(0, 0), "bytes=0-0");
        assert_eq!(byte_range(10, 99), "bytes=10-99");
    }

    #[test]
    fn test_content_type_detection() {
        assert!(content_type::is_image("image/png"));
        assert!(content_type::is_video("video/webm; codecs=vp9"));
        assert!(!content_type::is_image("Image/PNG"));
        assert!(!content_type::is_video("application/pdf"));
        assert_eq!(
            content_type::essence("video/webm; codecs=vp9"),
            Some("video/webm".to_string())
        );
    }
}
