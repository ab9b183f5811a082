//! HTTP request handling.

use crate::client::ClientError;
use crate::headers::{byte_range, names, HeaderMap};
use http::Method;
use url::Url;

/// A probe request. Probes never carry a body.
#[derive(Clone, Debug)]
pub struct Request {
    /// Request method.
    pub method: Method,
    /// Request URL.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
}

impl Request {
    /// Create a new request.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
        }
    }

    /// Parse `url` and create a request for it.
    pub fn parse(method: Method, url: &str) -> Result<Self, ClientError> {
        let url = Url::parse(url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        Ok(Self::new(method, url))
    }

    /// Metadata-only request.
    pub fn head(url: &str) -> Result<Self, ClientError> {
        Self::parse(Method::HEAD, url)
    }

    /// GET restricted to the first byte of the resource.
    pub fn first_byte(url: &str) -> Result<Self, ClientError> {
        Ok(Self::parse(Method::GET, url)?.range(0, 0))
    }

    /// Set a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Restrict the request to an inclusive byte range.
    pub fn range(self, start: u64, end: u64) -> Self {
        self.header(names::RANGE, byte_range(start, end))
    }

    /// Get the URL as a string.
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_request() {
        let request = Request::head("https://example.com/image.png").unwrap();
        assert_eq!(request.method, Method::HEAD);
        assert!(request.headers.is_empty());
        assert_eq!(request.url_str(), "https://example.com/image.png");
    }

    #[test]
    fn test_first_byte_request() {
        let request = Request::first_byte("https://example.com/media").unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.headers.get("Range"), Some(&"bytes=0-0".to_string()));
    }

    #[test]
    fn test_invalid_url() {
        let err = Request::head("not a url").unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
