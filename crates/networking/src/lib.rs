//! Networking layer for media probing.
//!
//! This crate handles:
//! - HEAD and ranged GET requests
//! - Response status and header inspection (bodies are never buffered)
//! - The `Transport` seam used by probers and replaced by mocks in tests

pub mod client;
pub mod headers;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{default_user_agent, ClientConfig, ClientError, HttpClient, HttpClientBuilder};
pub use headers::HeaderMap;
pub use request::Request;
pub use response::Response;
pub use transport::Transport;
