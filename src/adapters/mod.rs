//! External integrations: search, scraping, and the HTTP API surface

pub mod api_handler;
pub mod scrape_client;
pub mod search_client;

pub use scrape_client::FirecrawlScrapeClient;
pub use search_client::TavilySearchClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::assistant::error::AdapterError;

/// One record from a web search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    /// Text/content extract for the result
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Port for the web search API boundary
#[async_trait]
pub trait SearchPort: Send + Sync {
    /// Run a free-text search, capped at `max_results` records
    async fn search(&self, query: &str, max_results: usize)
        -> Result<Vec<SearchResult>, AdapterError>;
}

/// Structured document returned by the scrape API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedDocument {
    /// Markdown rendering of the page text
    pub markdown: String,
    /// Raw HTML, when the scraper returns it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

/// Port for the page-scraping API boundary
#[async_trait]
pub trait ScrapePort: Send + Sync {
    /// Fetch and extract a page by URL
    async fn scrape(&self, url: &str) -> Result<ScrapedDocument, AdapterError>;
}
