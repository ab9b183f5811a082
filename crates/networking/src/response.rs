//! HTTP response handling.

use crate::headers::HeaderMap;
use http::StatusCode;
use url::Url;

/// Status line and headers of a probe response.
///
/// The body is dropped unread; probes only look at metadata.
#[derive(Clone, Debug)]
pub struct Response {
    /// Response status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Final URL (after redirects).
    pub url: Url,
}

impl Response {
    /// Create a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, url: Url) -> Self {
        Self {
            status,
            headers,
            url,
        }
    }

    /// Create a response from reqwest response, discarding the body.
    pub(crate) fn from_reqwest(response: reqwest::Response) -> Self {
        let status = response.status();
        let url = response.url().clone();

        let mut headers = HeaderMap::new();
        for (name, value) in response.headers() {
            headers.append(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
        }

        Self {
            status,
            headers,
            url,
        }
    }

    /// Get the response status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Check if the response was successful (2xx).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if the server answered a range request with partial content.
    pub fn is_partial(&self) -> bool {
        self.status == StatusCode::PARTIAL_CONTENT
    }

    /// Get the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a specific header.
    pub fn header(&self, name: &str) -> Option<&String> {
        self.headers.get(name)
    }

    /// Get the final URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Raw Content-Type header value.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.content_type().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&str>) -> Response {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert("Content-Type", ct);
        }
        Response::new(
            StatusCode::from_u16(status).unwrap(),
            headers,
            Url::parse("https://example.com/media").unwrap(),
        )
    }

    #[test]
    fn test_partial_content() {
        let partial = response(206, Some("video/mp4"));
        assert!(partial.is_success());
        assert!(partial.is_partial());
        assert_eq!(partial.content_type(), Some("video/mp4"));
    }

    #[test]
    fn test_from_reqwest_keeps_opaque_header_bytes() {
        let raw = http::Response::builder()
            .status(200)
            .header("content-type", http::HeaderValue::from_bytes(b"image/\xffpng").unwrap())
            .body(Vec::<u8>::new())
            .unwrap();

        let response = Response::from_reqwest(reqwest::Response::from(raw));

        assert_eq!(response.content_type(), Some("image/\u{fffd}png"));
    }

    #[test]
    fn test_from_reqwest_joins_repeated_content_type() {
        let raw = http::Response::builder()
            .status(200)
            .header("content-type", "text/html")
            .header("content-type", "image/png")
            .body(Vec::<u8>::new())
            .unwrap();

        let response = Response::from_reqwest(reqwest::Response::from(raw));

        assert_eq!(response.content_type(), Some("text/html, image/png"));
    }

    #[test]
    fn test_not_found() {
        let missing = response(404, None);
        assert!(!missing.is_success());
        assert_eq!(missing.content_type(), None);
    }
}
