/// `reqwest`-backed transport.
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use super::{FetchError, Transport};
use crate::config::HttpConfig;

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client from the `http` config section.
    ///
    /// `timeout_secs = 0` leaves the client without a request timeout.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder.build().context("HTTP client build failed")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_from_default_config() {
        assert!(HttpTransport::new(&HttpConfig::default()).is_ok());
    }

    #[test]
    fn test_builds_without_timeout() {
        let config = HttpConfig {
            timeout_secs: 0,
            ..HttpConfig::default()
        };
        assert!(HttpTransport::new(&config).is_ok());
    }
}
