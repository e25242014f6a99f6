//! Chat outcome types

use serde::{Deserialize, Serialize};

/// Token usage counters reported by the model API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the submitted conversation
    pub input_tokens: u32,
    /// Tokens generated in the response
    pub output_tokens: u32,
}

/// Tagged outcome of one model call on behalf of a session.
///
/// Exactly one of the two shapes is produced per call: a success carries the
/// generated content plus usage counters and the model identifier; a failure
/// carries a human-readable fallback content and the error message. Callers
/// never see a raw transport error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatOutcome {
    /// Whether the model call succeeded
    pub success: bool,
    /// Generated text on success, fallback text on failure
    pub content: String,
    /// Session this outcome belongs to
    pub session_id: String,
    /// Model that produced the response (success only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Token usage (success only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// Error message (failure only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatOutcome {
    /// Build a success outcome
    pub fn success(
        content: impl Into<String>,
        session_id: impl Into<String>,
        model: impl Into<String>,
        usage: TokenUsage,
    ) -> Self {
        Self {
            success: true,
            content: content.into(),
            session_id: session_id.into(),
            model: Some(model.into()),
            usage: Some(usage),
            error: None,
        }
    }

    /// Build a failure outcome with the standard apology fallback content
    pub fn failure(session_id: impl Into<String>, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            success: false,
            content: format!("I apologize, but I encountered an error: {}", error),
            session_id: session_id.into(),
            model: None,
            usage: None,
            error: Some(error),
        }
    }
}
