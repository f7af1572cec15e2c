use std::fmt;
use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use bure_core::{BureError, Runnable};

use crate::{SearchRequest, SearchResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

#[derive(Clone)]
pub struct TavilyClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
}

impl fmt::Debug for TavilyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TavilyClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl TavilyClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, BureError> {
        Self::builder().api_key(api_key).build()
    }

    pub fn builder() -> TavilyClientBuilder {
        TavilyClientBuilder::default()
    }
}

#[derive(Default, Clone)]
pub struct TavilyClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl fmt::Debug for TavilyClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_some() {
            "<redacted>"
        } else {
            "<none>"
        };

        f.debug_struct("TavilyClientBuilder")
            .field("base_url", &self.base_url)
            .field("api_key", &api_key)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TavilyClientBuilder {
    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.base_url = Some(value.into());
        self
    }

    pub fn api_key(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.api_key = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
        self
    }

    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = Some(value);
        self
    }

    pub fn build(self) -> Result<TavilyClient, BureError> {
        let api_key = self
            .api_key
            .ok_or_else(|| BureError::InvalidConfig("tavily api_key is required".to_string()))?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if base_url.trim().is_empty() {
            return Err(BureError::InvalidConfig(
                "tavily base_url is empty".to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(self.timeout.unwrap_or(Duration::from_secs(30)))
            .build()
            .map_err(|err| BureError::Search(err.to_string()))?;

        Ok(TavilyClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: SecretString::new(api_key),
        })
    }
}

#[derive(Debug, Serialize)]
struct TavilySearchBody<'a> {
    query: &'a str,
    max_results: u32,
    include_answer: bool,
}

#[async_trait::async_trait]
impl Runnable<SearchRequest, SearchResponse> for TavilyClient {
    async fn invoke(&self, input: SearchRequest) -> Result<SearchResponse, BureError> {
        let body = TavilySearchBody {
            query: &input.query,
            max_results: input.max_results,
            include_answer: input.include_answer,
        };

        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|err| BureError::Search(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BureError::Search(format!("{status}: {body}")));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|err| BureError::Search(err.to_string()))?;

        tracing::debug!(
            query = %input.query,
            results = parsed.results.len(),
            has_answer = parsed.answer_text().is_some(),
            "tavily search completed"
        );
        Ok(parsed)
    }
}
