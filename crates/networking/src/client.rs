//! HTTP client implementation.

use crate::request::Request;
use crate::response::Response;
use crate::transport::Transport;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// HTTP client errors.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Timeout")]
    Timeout,
    #[error("Too many redirects")]
    TooManyRedirects,
    #[error("Request error: {0}")]
    Request(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_redirect() {
            ClientError::TooManyRedirects
        } else if err.is_connect() {
            ClientError::Connection(err.to_string())
        } else if err.is_builder() {
            ClientError::InvalidUrl(err.to_string())
        } else {
            ClientError::Request(err.to_string())
        }
    }
}

/// HTTP client for issuing probe requests.
pub struct HttpClient {
    /// Inner reqwest client.
    inner: reqwest::Client,
    /// Client configuration.
    config: ClientConfig,
}

/// Client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    /// Connect timeout.
    pub connect_timeout: Option<Duration>,
    /// Maximum redirects.
    pub max_redirects: u32,
    /// User agent string.
    pub user_agent: String,
}

/// Default user agent string.
pub fn default_user_agent() -> String {
    format!("MediaRenderer/{} ({})", env!("CARGO_PKG_VERSION"), std::env::consts::OS)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            max_redirects: 20,
            user_agent: default_user_agent(),
        }
    }
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects as usize));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let inner = builder.build().map_err(|e| ClientError::Request(e.to_string()))?;

        Ok(Self { inner, config })
    }

    /// Get client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(&self, request: Request) -> Result<Response, ClientError> {
        let mut req_builder = self
            .inner
            .request(request.method.clone(), request.url.clone());

        for (name, value) in request.headers.iter() {
            req_builder = req_builder.header(name.as_str(), value.as_str());
        }

        tracing::debug!(method = %request.method, url = %request.url, "Sending probe request");

        let response = req_builder.send().await?;

        tracing::debug!(status = response.status().as_u16(), url = %request.url, "Probe response");

        Ok(Response::from_reqwest(response))
    }
}

/// HTTP client builder.
pub struct HttpClientBuilder {
    config: ClientConfig,
}

impl HttpClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Set request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Set maximum redirects.
    pub fn max_redirects(mut self, max: u32) -> Self {
        self.config.max_redirects = max;
        self
    }

    /// Set user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<HttpClient, ClientError> {
        HttpClient::with_config(self.config)
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Accept one connection, answer it with `reply` and yield the raw request head.
    async fn serve_once(reply: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
            }
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&raw).to_lowercase()
        });

        (base, handle)
    }

    fn header_lines(raw: &str) -> Vec<&str> {
        raw.split("\r\n").skip(1).filter(|line| !line.is_empty()).collect()
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.max_redirects, 20);
        assert!(config.timeout.is_none());
        assert!(config.user_agent.starts_with("MediaRenderer/"));
    }

    #[test]
    fn test_client_builder() {
        let builder = HttpClientBuilder::new()
            .timeout(Duration::from_secs(5))
            .max_redirects(3)
            .user_agent("detector-test");

        assert_eq!(builder.config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(builder.config.max_redirects, 3);
        assert_eq!(builder.config.user_agent, "detector-test");
    }

    #[tokio::test]
    async fn test_build_client() {
        let client = HttpClientBuilder::new()
            .connect_timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        assert_eq!(client.config().connect_timeout, Some(Duration::from_secs(2)));
    }

    #[tokio::test]
    async fn test_head_sends_no_extra_headers() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let client = HttpClientBuilder::new().user_agent("detector-test").build().unwrap();

        let response = client
            .execute(Request::head(&format!("{}/x", base)).unwrap())
            .await
            .unwrap();
        let raw = server.await.unwrap();

        assert!(raw.starts_with("head /x http/1.1\r\n"));
        for line in header_lines(&raw) {
            let (name, value) = line.split_once(':').unwrap();
            match name {
                "host" => {}
                "user-agent" => assert_eq!(value.trim(), "detector-test"),
                // reqwest's own default
                "accept" => assert_eq!(value.trim(), "*/*"),
                other => panic!("unexpected header {:?}", other),
            }
        }
        assert_eq!(response.status(), http::StatusCode::OK);
        assert_eq!(response.content_type(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_first_byte_get_over_socket() {
        let (base, server) = serve_once(
            "HTTP/1.1 206 Partial Content\r\nContent-Type: video/mp4\r\nContent-Range: bytes 0-0/1024\r\nContent-Length: 1\r\nConnection: close\r\n\r\nx",
        )
        .await;
        let client = HttpClient::new().unwrap();

        let response = client
            .execute(Request::first_byte(&format!("{}/clip", base)).unwrap())
            .await
            .unwrap();
        let raw = server.await.unwrap();

        assert!(raw.starts_with("get /clip http/1.1\r\n"));
        assert!(header_lines(&raw).contains(&"range: bytes=0-0"));
        assert!(response.is_partial());
        assert_eq!(response.content_type(), Some("video/mp4"));
        assert_eq!(response.url().path(), "/clip");
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = HttpClient::new()
            .unwrap()
            .execute(Request::head(&format!("http://{}/x", addr)).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Connection(_)));
    }
}
