//! Message and conversation types

use serde::{Deserialize, Serialize};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction (supplied per call, never stored in a session)
    System,
    /// User message
    User,
    /// Assistant (model) message
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A message in a conversation. Immutable once appended to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Message content (text)
    pub content: String,
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A conversation session containing message history.
///
/// The history is append-only: it is never reordered, pruned, or windowed,
/// because it is replayed verbatim to the model on every turn. Unbounded
/// growth over a session's lifetime is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSession {
    /// Unique session identifier
    pub session_id: String,
    /// Message history, in insertion order
    pub messages: Vec<Message>,
    /// Session creation timestamp (Unix epoch milliseconds)
    pub created_at: u64,
    /// Last update timestamp (Unix epoch milliseconds)
    pub updated_at: u64,
}

impl ConversationSession {
    /// Create a new conversation session
    pub fn new(session_id: String) -> Self {
        let now = epoch_millis();

        Self {
            session_id,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a session with a freshly generated identifier
    pub fn with_generated_id() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    /// Append a message to the session
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.updated_at = epoch_millis();
    }

    /// Get the number of messages
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Get a preview of the last message
    pub fn last_message_preview(&self, max_len: usize) -> Option<String> {
        self.messages.last().map(|m| {
            if m.content.chars().count() > max_len {
                format!("{}...", m.content.chars().take(max_len).collect::<String>())
            } else {
                m.content.clone()
            }
        })
    }

    /// Convert to a session summary
    pub fn to_summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.session_id.clone(),
            message_count: self.messages.len(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            last_message_preview: self.last_message_preview(100),
        }
    }
}

/// Lightweight view of a session for listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub message_count: usize,
    pub created_at: u64,
    pub updated_at: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message_preview: Option<String>,
}

fn epoch_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
