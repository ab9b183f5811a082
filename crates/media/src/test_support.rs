//! In-memory transport for tests.

use async_trait::async_trait;
use http::StatusCode;
use networking::{ClientError, HeaderMap, Request, Response, Transport};
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::oneshot;
use url::Url;

#[derive(Clone, Debug)]
pub(crate) enum MockReply {
    Status {
        status: u16,
        content_type: Option<String>,
    },
    Fail(String),
}

/// Answers requests from a fixed route table and records every request.
///
/// Unrouted urls answer 404.
#[derive(Default)]
pub(crate) struct MockTransport {
    routes: Mutex<HashMap<String, MockReply>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    requests: Mutex<Vec<Request>>,
}

fn normalize(url: &str) -> String {
    Url::parse(url).map(|u| u.to_string()).unwrap_or_else(|_| url.to_string())
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, url: &str, status: u16, content_type: Option<&str>) -> Self {
        self.routes.lock().insert(
            normalize(url),
            MockReply::Status {
                status,
                content_type: content_type.map(str::to_string),
            },
        );
        self
    }

    pub(crate) fn fail(self, url: &str, error: &str) -> Self {
        self.routes
            .lock()
            .insert(normalize(url), MockReply::Fail(error.to_string()));
        self
    }

    /// Hold the next request for `url` until the returned sender fires.
    pub(crate) fn gate(&self, url: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(normalize(url), rx);
        tx
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: Request) -> Result<Response, ClientError> {
        let key = request.url.to_string();
        self.requests.lock().push(request.clone());

        let gate = self.gates.lock().remove(&key);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let reply = self.routes.lock().get(&key).cloned();
        match reply {
            Some(MockReply::Fail(error)) => Err(ClientError::Connection(error)),
            Some(MockReply::Status {
                status,
                content_type,
            }) => {
                let mut headers = HeaderMap::new();
                if let Some(ct) = content_type {
                    headers.insert("Content-Type", ct);
                }
                let status = StatusCode::from_u16(status)
                    .map_err(|e| ClientError::Request(e.to_string()))?;
                Ok(Response::new(status, headers, request.url))
            }
            None => Ok(Response::new(
                StatusCode::NOT_FOUND,
                HeaderMap::new(),
                request.url,
            )),
        }
    }
}
