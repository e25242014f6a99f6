//! Firecrawl page-scraping client

use std::env;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{ScrapePort, ScrapedDocument};
use crate::assistant::error::AdapterError;
use crate::config::ScrapeSettings;

const DEFAULT_BASE_URL: &str = "https://api.firecrawl.dev";

/// Client for the Firecrawl scrape API
pub struct FirecrawlScrapeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FirecrawlScrapeClient {
    /// Create a client from scrape settings, reading the API key from the
    /// configured environment variable (default `FIRECRAWL_API_KEY`)
    pub fn from_settings(settings: &ScrapeSettings) -> Result<Self, AdapterError> {
        let env_var = settings
            .api_key_env
            .as_deref()
            .unwrap_or("FIRECRAWL_API_KEY");
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
impl ScrapePort for FirecrawlScrapeClient {
    async fn scrape(&self, url: &str) -> Result<ScrapedDocument, AdapterError> {
        let body = json!({
            "url": url,
            "formats": ["markdown", "html"],
        });

        let response = self
            .client
            .post(format!("{}/v1/scrape", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
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

        let scrape_response: FirecrawlResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(format!("Failed to parse response: {}", e)))?;

        if !scrape_response.success {
            return Err(AdapterError::Api {
                status: status.as_u16(),
                message: scrape_response
                    .error
                    .unwrap_or_else(|| "scrape reported failure".to_string()),
            });
        }

        let data = scrape_response.data.ok_or_else(|| {
            AdapterError::Parse("Scrape response missing data field".to_string())
        })?;

        Ok(ScrapedDocument {
            markdown: data.markdown.unwrap_or_default(),
            html: data.html,
        })
    }
}

#[derive(Debug, Deserialize)]
struct FirecrawlResponse {
    #[serde(default)]
    success: bool,
    data: Option<FirecrawlData>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FirecrawlData {
    markdown: Option<String>,
    html: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_markdown_document() {
        let parsed: FirecrawlResponse = serde_json::from_str(
            r##"{"success": true, "data": {"markdown": "# Product", "html": "<h1>Product</h1>"}}"##,
        )
        .unwrap();
        assert!(parsed.success);
        let data = parsed.data.unwrap();
        assert_eq!(data.markdown.as_deref(), Some("# Product"));
    }

    #[test]
    fn response_carries_error_message() {
        let parsed: FirecrawlResponse =
            serde_json::from_str(r#"{"success": false, "error": "blocked"}"#).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error.as_deref(), Some("blocked"));
    }
}
