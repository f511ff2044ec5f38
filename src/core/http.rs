//! Outbound HTTP client shared by completion providers.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::CompletionError;

/// Transport settings for the outbound client.
///
/// Left at the defaults, the client relies entirely on reqwest's own
/// behavior: no overall timeout and reqwest's connection pool.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Total time for the single attempt. `None` keeps transport defaults.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, CompletionError> {
        let default_ua = format!("chat-relay/{}", env!("CARGO_PKG_VERSION"));
        let ua = config.user_agent.as_deref().unwrap_or(&default_ua);

        let mut builder = reqwest::Client::builder().user_agent(ua);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            CompletionError::ProviderConfiguration(format!("Failed to build reqwest client: {e}"))
        })?;

        Ok(Self { client })
    }

    /// POST `body` as JSON exactly once and read the whole reply.
    ///
    /// A non-2xx status is logged but not an error; only transport failures
    /// are. The body is returned whatever the status.
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Bytes, CompletionError>
    where
        Req: Serialize,
    {
        let payload = serde_json::to_vec(body).map_err(CompletionError::Serialization)?;

        let mut req_builder = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);

        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder
            .send()
            .await
            .map_err(|e| CompletionError::Transport {
                message: "Failed to complete request".to_string(),
                source: e,
            })?;

        let status = res.status();
        if status.is_success() {
            debug!(status = %status, "HTTP request successful");
        } else {
            warn!(status = %status, "API returned error status");
        }

        res.bytes().await.map_err(|e| CompletionError::Transport {
            message: "Failed to read response body".to_string(),
            source: e,
        })
    }
}
