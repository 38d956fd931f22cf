/// In-memory transport for tests.
///
/// Serves canned responses per URL and records every request in order.
/// URLs without a canned response answer with status 404.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{FetchError, Transport};

#[derive(Debug, Clone)]
enum Canned {
    Body(String),
    Status(u16),
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    responses: HashMap<String, Canned>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), Canned::Body(body.to_string()));
        self
    }

    #[must_use]
    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(url.to_string(), Canned::Status(status));
        self
    }

    #[must_use]
    pub fn with_error(mut self, url: &str, message: &str) -> Self {
        self.responses
            .insert(url.to_string(), Canned::Error(message.to_string()));
        self
    }

    /// URLs requested so far, in request order. Shared between clones.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());

        // Yield so concurrent pipelines interleave like real I/O.
        tokio::task::yield_now().await;

        match self.responses.get(url) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            Some(Canned::Error(message)) => Err(FetchError::Request {
                url: url.to_string(),
                message: message.clone(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
