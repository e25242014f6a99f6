//! Model client for the hosted LLM API
//!
//! One call type: submit the full conversation history plus a fixed system
//! instruction, get back generated text and usage counters, or a structured
//! failure. The client performs exactly one network attempt per call; there
//! is no retry and no streaming.

mod anthropic;

pub use anthropic::AnthropicClient;

use async_trait::async_trait;

use crate::assistant::domain::{Message, TokenUsage, ToolDefinition};
use crate::assistant::error::ModelResult;

/// Trait for model API clients
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Provider name (for logging)
    fn name(&self) -> &str;

    /// Submit a conversation and return the model's reply.
    ///
    /// Any transport error, timeout, or malformed API response comes back as
    /// a `ModelError`; a raw transport error never escapes this boundary.
    async fn complete(&self, request: ChatRequest) -> ModelResult<ModelReply>;
}

/// One request to the model API
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Ordered conversation history (user/assistant turns)
    pub messages: Vec<Message>,
    /// Fixed system instruction
    pub system: String,
    /// Model identifier, passed through as-is
    pub model: String,
    /// Output token cap
    pub max_tokens: u32,
    /// Tool definitions advertised to the model
    pub tools: Vec<ToolDefinition>,
}

/// The model's reply to one request
#[derive(Debug, Clone)]
pub struct ModelReply {
    /// Generated text
    pub content: String,
    /// Token usage counters
    pub usage: TokenUsage,
}
