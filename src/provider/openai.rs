use async_trait::async_trait;
use tracing::warn;

use super::constants::openai as defaults;
use crate::completions::{CompletionRequest, DEFAULT_MAX_TOKENS, parse_completion};
use crate::core::{CompletionError, CompletionProvider, HttpClient, HttpClientConfig};

/// Everything the OpenAI client needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub endpoint: String,
    pub max_tokens: u32,
    pub http_config: HttpClientConfig,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: defaults::API_BASE.to_string(),
            endpoint: defaults::COMPLETIONS_ENDPOINT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            http_config: HttpClientConfig::default(),
        }
    }

    /// Read `OPENAI_API_KEY` and the optional `OPENAI_BASE_URL`.
    ///
    /// A missing key is not fatal: requests go out with an empty bearer
    /// token and fail upstream.
    pub fn from_env() -> Self {
        let api_key = std::env::var(defaults::API_KEY_ENV_VAR).unwrap_or_else(|_| {
            warn!(
                env_var = defaults::API_KEY_ENV_VAR,
                "API key not set, completion requests will not be authorized"
            );
            String::new()
        });

        let config = Self::new(api_key);
        match std::env::var(defaults::BASE_URL_ENV_VAR) {
            Ok(base_url) if !base_url.is_empty() => config.with_base_url(base_url),
            _ => config,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_http_config(mut self, http_config: HttpClientConfig) -> Self {
        self.http_config = http_config;
        self
    }

    pub fn completions_url(&self) -> String {
        format!("{}{}", self.base_url, self.endpoint)
    }

    fn auth_header(&self) -> (String, String) {
        (
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key),
        )
    }
}

pub struct OpenAiClient {
    config: OpenAiConfig,
    http: HttpClient,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, CompletionError> {
        let http = HttpClient::new(config.http_config.clone())?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    #[tracing::instrument(
        name = "openai_complete",
        skip(self, prompt),
        fields(prompt_len = prompt.len(), max_tokens = self.config.max_tokens),
        err
    )]
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = CompletionRequest::new(prompt, self.config.max_tokens);
        let url = self.config.completions_url();
        let headers = [self.config.auth_header()];

        let body = self.http.post_json(&url, &headers, &request).await?;

        parse_completion(&body)
    }
}
