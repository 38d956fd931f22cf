/// Remote document retrieval with ordered candidate fallback.
pub mod http;
pub mod mock;
pub mod variants;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::debug_log::DebugLog;

pub use variants::expand_variants;

/// Errors that can occur while retrieving a source document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read body of {url}: {message}")]
    Body { url: String, message: String },

    #[error("no candidate URLs given")]
    NoCandidates,

    #[error("all {attempted} candidate URLs failed")]
    Exhausted { attempted: usize },
}

/// Trait for the GET-text capability the pipeline needs.
///
/// Implementations must be `Send + Sync` so one transport can serve every
/// concurrent source pipeline behind `Arc`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url` and return its body. A non-2xx status is an error.
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Raw text together with the candidate that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub url: String,
    pub text: String,
}

/// Tries candidate URLs one at a time, first success wins.
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    log: DebugLog,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>, log: DebugLog) -> Self {
        Self { transport, log }
    }

    #[must_use]
    pub fn log(&self) -> &DebugLog {
        &self.log
    }

    /// Return the first candidate that downloads successfully.
    pub async fn fetch_first_available(&self, urls: &[String]) -> Result<Fetched, FetchError> {
        self.fetch_until(urls, Some).await.map(|(fetched, _)| fetched)
    }

    /// Walk `urls` in order until `accept` returns `Some` for a downloaded body.
    ///
    /// A rejected body counts as a failed candidate. Candidates are never
    /// retried and never fetched concurrently.
    pub async fn fetch_until<T, F>(&self, urls: &[String], mut accept: F) -> Result<(T, String), FetchError>
    where
        F: FnMut(Fetched) -> Option<T>,
    {
        if urls.is_empty() {
            return Err(FetchError::NoCandidates);
        }

        for url in urls {
            let text = match self.transport.get_text(url).await {
                Ok(text) => text,
                Err(e) => {
                    self.log.push(format!("URL {url} failed: {e}"));
                    continue;
                }
            };

            self.log.push(format!("Successfully fetched {url}"));
            let fetched = Fetched {
                url: url.clone(),
                text,
            };
            match accept(fetched) {
                Some(value) => return Ok((value, url.clone())),
                None => self
                    .log
                    .push(format!("No usable content in {url}, trying next URL")),
            }
        }

        self.log
            .push(format!("All {} URLs failed: {}", urls.len(), urls.join(", ")));
        Err(FetchError::Exhausted {
            attempted: urls.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::mock::MockTransport;

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let transport = MockTransport::new()
            .with_status("https://a", 404)
            .with_body("https://b", "body b")
            .with_body("https://c", "body c");
        let fetcher = Fetcher::new(Arc::new(transport.clone()), DebugLog::new());

        let fetched = fetcher
            .fetch_first_available(&urls(&["https://a", "https://b", "https://c"]))
            .await
            .unwrap();

        assert_eq!(fetched.url, "https://b");
        assert_eq!(fetched.text, "body b");
        assert_eq!(transport.requests(), vec!["https://a", "https://b"]);
    }

    #[tokio::test]
    async fn test_exhausted_never_retries() {
        let transport = MockTransport::new()
            .with_error("https://a", "connection refused")
            .with_status("https://b", 500);
        let log = DebugLog::new();
        let fetcher = Fetcher::new(Arc::new(transport.clone()), log.clone());

        let err = fetcher
            .fetch_first_available(&urls(&["https://a", "https://b"]))
            .await
            .unwrap_err();

        assert_eq!(err, FetchError::Exhausted { attempted: 2 });
        assert_eq!(transport.requests(), vec!["https://a", "https://b"]);
        let lines = log.messages();
        assert!(lines.iter().any(|l| l.contains("connection refused")));
        assert!(lines.iter().any(|l| l.contains("status 500")));
    }

    #[tokio::test]
    async fn test_unknown_url_is_not_found() {
        let fetcher = Fetcher::new(Arc::new(MockTransport::new()), DebugLog::new());
        let err = fetcher
            .fetch_first_available(&urls(&["https://missing"]))
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::Exhausted { attempted: 1 });
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let fetcher = Fetcher::new(Arc::new(MockTransport::new()), DebugLog::new());
        let err = fetcher.fetch_first_available(&[]).await.unwrap_err();
        assert_eq!(err, FetchError::NoCandidates);
    }

    #[tokio::test]
    async fn test_fetch_until_skips_rejected_body() {
        let transport = MockTransport::new()
            .with_body("https://a", "no table here")
            .with_body("https://b", "| table |");
        let fetcher = Fetcher::new(Arc::new(transport), DebugLog::new());

        let (len, url) = fetcher
            .fetch_until(&urls(&["https://a", "https://b"]), |f| {
                f.text.contains('|').then(|| f.text.len())
            })
            .await
            .unwrap();

        assert_eq!(url, "https://b");
        assert_eq!(len, 9);
    }
}
