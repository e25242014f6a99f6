//! Tavily web search client

use std::env;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{SearchPort, SearchResult};
use crate::assistant::error::AdapterError;
use crate::config::SearchSettings;

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// Client for the Tavily search API
pub struct TavilySearchClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TavilySearchClient {
    /// Create a client from search settings, reading the API key from the
    /// configured environment variable (default `TAVILY_API_KEY`)
    pub fn from_settings(settings: &SearchSettings) -> Result<Self, AdapterError> {
        let env_var = settings.api_key_env.as_deref().unwrap_or("TAVILY_API_KEY");
        let api_key = env::var(env_var).map_err(|_| {
            AdapterError::Authentication(format!("Environment variable {} not set", env_var))
        })?;

        let base_url = settings
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        })
    }

    /// Create a client with an explicit key and base URL (used by tests)
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SearchPort for TavilySearchClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, AdapterError> {
        let body = json!({
            "api_key": self.api_key,
            "query": query,
            "search_depth": "basic",
            "max_results": max_results,
        });

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AdapterError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let search_response: TavilyResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(format!("Failed to parse response: {}", e)))?;

        Ok(search_response.results)
    }
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}
