//! Conversation controller
//!
//! Wires user input through the session store to the model client and back:
//! Idle → AwaitingModelResponse → Idle, one user-initiated step at a time.
//! Also hosts the price-match shortcut, which injects scraped page content
//! as a synthetic user turn and runs the normal submit step.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::adapters::ScrapePort;
use crate::assistant::domain::{ChatOutcome, Message, ToolDefinition};
use crate::assistant::error::{AssistantError, AssistantResult};
use crate::assistant::llm::{ChatRequest, ModelClient};
use crate::assistant::memory::SessionStore;
use crate::assistant::tools::ToolRegistry;

/// Fixed system instruction describing the available tools
const SYSTEM_PROMPT: &str = "You are Cartmate's price matching assistant.

When analyzing product information, use these tools:
1. get_price_match_policy - Check which competitors are allowed for price matching
2. search_competitor_prices - Search for the product at competitor retailers

Extract product details from the provided content, then search for competitor prices and provide clear recommendations.";

/// Scraped page content is cut to this many characters before injection
const SCRAPE_SNIPPET_CHARS: usize = 1000;

/// Orchestrates conversations between sessions, the model client, and tools
pub struct ChatController {
    client: Arc<dyn ModelClient>,
    store: Arc<dyn SessionStore>,
    registry: Arc<ToolRegistry>,
    scraper: Arc<dyn ScrapePort>,
    tool_definitions: Vec<ToolDefinition>,
    model: RwLock<String>,
    max_tokens: u32,
}

impl ChatController {
    /// Create a controller. The registry and clients are constructed once at
    /// process start and reused across all calls.
    pub fn new(
        client: Arc<dyn ModelClient>,
        store: Arc<dyn SessionStore>,
        registry: Arc<ToolRegistry>,
        scraper: Arc<dyn ScrapePort>,
        tool_definitions: Vec<ToolDefinition>,
        model: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            client,
            store,
            registry,
            scraper,
            tool_definitions,
            model: RwLock::new(model.into()),
            max_tokens,
        }
    }

    /// Submit one user message for a session.
    ///
    /// Appends the user turn, replays the full history to the model, and
    /// appends the assistant turn: the model's text on success, or
    /// `"Error: <message>"` on failure. Each submit grows the session by
    /// exactly two turns and makes exactly one network attempt.
    pub async fn submit(
        &self,
        session_id: &str,
        user_text: impl Into<String>,
    ) -> AssistantResult<ChatOutcome> {
        self.store.get_or_create(session_id).await?;
        self.store
            .append(session_id, Message::user(user_text))
            .await?;

        let session = self
            .store
            .load(session_id)
            .await?
            .ok_or_else(|| AssistantError::SessionNotFound(session_id.to_string()))?;

        let model = self.model.read().await.clone();
        let request = ChatRequest {
            messages: session.messages,
            system: SYSTEM_PROMPT.to_string(),
            model: model.clone(),
            max_tokens: self.max_tokens,
            tools: self.tool_definitions.clone(),
        };

        match self.client.complete(request).await {
            Ok(reply) => {
                self.store
                    .append(session_id, Message::assistant(&reply.content))
                    .await?;
                Ok(ChatOutcome::success(
                    reply.content,
                    session_id,
                    model,
                    reply.usage,
                ))
            }
            Err(e) => {
                tracing::error!("Model call failed for session {}: {}", session_id, e);
                let message = e.to_string();
                self.store
                    .append(session_id, Message::assistant(format!("Error: {}", message)))
                    .await?;
                Ok(ChatOutcome::failure(session_id, message))
            }
        }
    }

    /// Price-match shortcut: scrape a product page, truncate the extracted
    /// markdown, and submit it as a synthetic user turn.
    ///
    /// An empty URL is rejected before any external call. Truncation is a
    /// fixed character count, not token-aware; it can cut mid-word.
    pub async fn price_match(
        &self,
        session_id: &str,
        product_url: &str,
    ) -> AssistantResult<ChatOutcome> {
        if product_url.trim().is_empty() {
            return Err(AssistantError::Validation(
                "Product URL must not be empty".to_string(),
            ));
        }

        let document = self.scraper.scrape(product_url).await?;
        let snippet = truncate_chars(&document.markdown, SCRAPE_SNIPPET_CHARS);

        let prompt = format!(
            "Can you analyze this product for price matching? I found this information from {}:\n\n{}...",
            product_url, snippet
        );

        self.submit(session_id, prompt).await
    }

    /// Dispatch a model-requested tool call through the registry
    pub async fn execute_tool(&self, name: &str, args: serde_json::Value) -> serde_json::Value {
        self.registry.dispatch(name, args).await
    }

    /// Names of all registered tools
    pub fn list_tools(&self) -> Vec<String> {
        self.registry.list()
    }

    /// Tool definitions loaded from the schema document
    pub fn tool_definitions(&self) -> &[ToolDefinition] {
        &self.tool_definitions
    }

    /// Swap the model used for subsequent calls. Takes effect on the next
    /// call only; no validation beyond what the API itself enforces.
    pub async fn update_model(&self, model: impl Into<String>) {
        *self.model.write().await = model.into();
    }

    /// Model currently selected for the next call
    pub async fn current_model(&self) -> String {
        self.model.read().await.clone()
    }

    /// Session store accessor for the API layer
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Friendly conversation starter for a fresh chat
    pub fn conversation_starter(&self) -> &'static str {
        "Hi! I'm Cartmate, your intelligent shopping assistant. I can help you with product questions, \
         shopping comparisons, and store policy information. Paste a product link to check competitor \
         prices, or just ask away."
    }
}

/// Cut a string to at most `max_chars` characters, on a char boundary
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::adapters::{ScrapedDocument, SearchPort, SearchResult};
    use crate::assistant::domain::{Role, TokenUsage};
    use crate::assistant::error::{AdapterError, ModelError, ModelResult};
    use crate::assistant::llm::ModelReply;
    use crate::assistant::memory::InMemoryStore;

    /// Scripted model client that records every request it receives
    struct ScriptedClient {
        fail_with: Option<String>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedClient {
        fn succeeding() -> Self {
            Self {
                fail_with: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn last_request(&self) -> ChatRequest {
            self.requests.lock().unwrap().last().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: ChatRequest) -> ModelResult<ModelReply> {
            self.requests.lock().unwrap().push(request);
            match &self.fail_with {
                Some(message) => Err(ModelError::Network(message.clone())),
                None => Ok(ModelReply {
                    content: "scripted reply".to_string(),
                    usage: TokenUsage {
                        input_tokens: 12,
                        output_tokens: 3,
                    },
                }),
            }
        }
    }

    /// Scraper stub returning fixed markdown and counting calls
    struct StubScraper {
        markdown: String,
        calls: Mutex<usize>,
    }

    impl StubScraper {
        fn new(markdown: impl Into<String>) -> Self {
            Self {
                markdown: markdown.into(),
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl ScrapePort for StubScraper {
        async fn scrape(&self, _url: &str) -> Result<ScrapedDocument, AdapterError> {
            *self.calls.lock().unwrap() += 1;
            Ok(ScrapedDocument {
                markdown: self.markdown.clone(),
                html: None,
            })
        }
    }

    struct NoopSearch;

    #[async_trait]
    impl SearchPort for NoopSearch {
        async fn search(
            &self,
            _query: &str,
            _max_results: usize,
        ) -> Result<Vec<SearchResult>, AdapterError> {
            Ok(Vec::new())
        }
    }

    fn controller_with(
        client: Arc<ScriptedClient>,
        scraper: Arc<StubScraper>,
    ) -> ChatController {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(
                crate::assistant::tools::CompetitorPriceSearchTool::new(
                    Arc::new(NoopSearch),
                    vec!["Target".to_string()],
                    5,
                ),
            ))
            .unwrap();

        ChatController::new(
            client,
            Arc::new(InMemoryStore::new()),
            Arc::new(registry),
            scraper,
            Vec::new(),
            "claude-3-7-sonnet-latest",
            1024,
        )
    }

    #[tokio::test]
    async fn submit_grows_session_by_two_and_replays_history() {
        let client = Arc::new(ScriptedClient::succeeding());
        let controller = controller_with(client.clone(), Arc::new(StubScraper::new("")));

        let outcome = controller.submit("s-1", "hello").await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.content, "scripted reply");
        assert_eq!(outcome.usage.unwrap().input_tokens, 12);

        let session = controller.store().load("s-1").await.unwrap().unwrap();
        assert_eq!(session.message_count(), 2);
        assert_eq!(session.messages[0].role, Role::User);
        assert_eq!(session.messages[1].role, Role::Assistant);

        // The history submitted to the model is exactly the prior history
        // plus the new user turn, in order.
        let request = client.last_request();
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].content, "hello");
        assert!(request.system.contains("get_price_match_policy"));
    }

    #[tokio::test]
    async fn failing_model_call_appends_error_turn() {
        let client = Arc::new(ScriptedClient::failing("connection reset"));
        let controller = controller_with(client, Arc::new(StubScraper::new("")));

        let outcome = controller.submit("s-1", "hello").await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("Network error: connection reset"));

        let session = controller.store().load("s-1").await.unwrap().unwrap();
        assert_eq!(session.message_count(), 2);
        assert_eq!(
            session.messages[1].content,
            "Error: Network error: connection reset"
        );
    }

    #[tokio::test]
    async fn repeated_submits_are_append_only() {
        let client = Arc::new(ScriptedClient::succeeding());
        let controller = controller_with(client.clone(), Arc::new(StubScraper::new("")));

        controller.submit("s-1", "first").await.unwrap();
        let after_first = controller.store().load("s-1").await.unwrap().unwrap();
        assert_eq!(after_first.message_count(), 2);

        controller.submit("s-1", "second").await.unwrap();
        let after_second = controller.store().load("s-1").await.unwrap().unwrap();
        assert_eq!(after_second.message_count(), 4);

        // First two turns are unchanged
        for (a, b) in after_first
            .messages
            .iter()
            .zip(after_second.messages.iter())
        {
            assert_eq!(a.content, b.content);
            assert_eq!(a.role, b.role);
        }

        // The second call replayed the first exchange plus the new turn
        let request = client.last_request();
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0].content, "first");
        assert_eq!(request.messages[1].content, "scripted reply");
        assert_eq!(request.messages[2].content, "second");
    }

    #[tokio::test]
    async fn price_match_rejects_empty_url_before_scraping() {
        let client = Arc::new(ScriptedClient::succeeding());
        let scraper = Arc::new(StubScraper::new("content"));
        let controller = controller_with(client, scraper.clone());

        let err = controller.price_match("s-1", "   ").await.unwrap_err();
        assert!(matches!(err, AssistantError::Validation(_)));
        assert_eq!(*scraper.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn price_match_truncates_scraped_content() {
        let client = Arc::new(ScriptedClient::succeeding());
        let long_page = "x".repeat(2500);
        let controller = controller_with(client.clone(), Arc::new(StubScraper::new(long_page)));

        let outcome = controller
            .price_match("s-1", "https://example.com/product")
            .await
            .unwrap();
        assert!(outcome.success);

        let request = client.last_request();
        let synthetic = &request.messages[0].content;
        assert!(synthetic.starts_with("Can you analyze this product for price matching?"));
        assert!(synthetic.contains("https://example.com/product"));

        let expected_snippet = format!("{}...", "x".repeat(1000));
        assert!(synthetic.ends_with(&expected_snippet));
        assert!(!synthetic.contains(&"x".repeat(1001)));
    }

    #[tokio::test]
    async fn short_scrapes_are_passed_through_whole() {
        let client = Arc::new(ScriptedClient::succeeding());
        let controller =
            controller_with(client.clone(), Arc::new(StubScraper::new("tiny page")));

        controller
            .price_match("s-1", "https://example.com/p")
            .await
            .unwrap();

        let request = client.last_request();
        assert!(request.messages[0].content.ends_with("tiny page..."));
    }

    #[tokio::test]
    async fn model_update_takes_effect_on_next_call() {
        let client = Arc::new(ScriptedClient::succeeding());
        let controller = controller_with(client.clone(), Arc::new(StubScraper::new("")));

        controller.submit("s-1", "one").await.unwrap();
        assert_eq!(client.last_request().model, "claude-3-7-sonnet-latest");

        controller.update_model("claude-3-5-haiku-latest").await;
        controller.submit("s-1", "two").await.unwrap();
        assert_eq!(client.last_request().model, "claude-3-5-haiku-latest");
    }

    #[tokio::test]
    async fn execute_tool_goes_through_the_registry() {
        let client = Arc::new(ScriptedClient::succeeding());
        let controller = controller_with(client, Arc::new(StubScraper::new("")));

        let value = controller
            .execute_tool("search_competitor_prices", serde_json::json!({"product_name": "TV"}))
            .await;
        assert!(value.get("results").is_some());

        let missing = controller
            .execute_tool("nope", serde_json::json!({}))
            .await;
        assert_eq!(missing["error"], "Unknown tool: nope");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
        assert_eq!(truncate_chars("", 10), "");
    }
}
