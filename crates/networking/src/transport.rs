//! Request execution seam.

use crate::client::ClientError;
use crate::request::Request;
use crate::response::Response;
use async_trait::async_trait;
use std::sync::Arc;

/// Executes probe requests.
///
/// `HttpClient` is the production implementation; tests substitute
/// in-memory transports.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request and return its status and headers.
    async fn execute(&self, request: Request) -> Result<Response, ClientError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: Request) -> Result<Response, ClientError> {
        (**self).execute(request).await
    }
}
