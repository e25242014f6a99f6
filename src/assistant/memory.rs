//! Session storage
//!
//! Sessions live for the process lifetime only; there is no persistence
//! guarantee beyond that. Histories are never trimmed or windowed.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::assistant::domain::{ConversationSession, Message, SessionSummary};
use crate::assistant::error::{AssistantError, AssistantResult};

/// Trait for session storage backends
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Save a session
    async fn save(&self, session: &ConversationSession) -> AssistantResult<()>;

    /// Load a session by ID
    async fn load(&self, session_id: &str) -> AssistantResult<Option<ConversationSession>>;

    /// Delete a session
    async fn delete(&self, session_id: &str) -> AssistantResult<()>;

    /// List session summaries, most recently updated first
    async fn list(&self, limit: usize, offset: usize) -> AssistantResult<Vec<SessionSummary>>;

    /// Append a message to an existing session
    async fn append(&self, session_id: &str, message: Message) -> AssistantResult<()>;

    /// Get a session, creating an empty one if it does not exist
    async fn get_or_create(&self, session_id: &str) -> AssistantResult<ConversationSession> {
        if let Some(session) = self.load(session_id).await? {
            Ok(session)
        } else {
            let session = ConversationSession::new(session_id.to_string());
            self.save(&session).await?;
            Ok(session)
        }
    }
}

/// In-memory session store
pub struct InMemoryStore {
    sessions: Arc<RwLock<HashMap<String, ConversationSession>>>,
}

impl InMemoryStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn save(&self, session: &ConversationSession) -> AssistantResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.session_id.clone(), session.clone());
        Ok(())
    }

    async fn load(&self, session_id: &str) -> AssistantResult<Option<ConversationSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned())
    }

    async fn delete(&self, session_id: &str) -> AssistantResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
        Ok(())
    }

    async fn list(&self, limit: usize, offset: usize) -> AssistantResult<Vec<SessionSummary>> {
        let sessions = self.sessions.read().await;

        let mut summaries: Vec<SessionSummary> =
            sessions.values().map(|s| s.to_summary()).collect();

        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(summaries.into_iter().skip(offset).take(limit).collect())
    }

    async fn append(&self, session_id: &str, message: Message) -> AssistantResult<()> {
        let mut sessions = self.sessions.write().await;

        if let Some(session) = sessions.get_mut(session_id) {
            session.add_message(message);
            Ok(())
        } else {
            Err(AssistantError::SessionNotFound(session_id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_or_create_round_trips() {
        let store = InMemoryStore::new();

        let created = store.get_or_create("s-1").await.unwrap();
        assert!(created.messages.is_empty());

        store.append("s-1", Message::user("hello")).await.unwrap();
        let loaded = store.load("s-1").await.unwrap().unwrap();
        assert_eq!(loaded.message_count(), 1);
    }

    #[tokio::test]
    async fn append_to_unknown_session_fails() {
        let store = InMemoryStore::new();
        let err = store
            .append("nope", Message::user("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, AssistantError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn history_is_never_trimmed() {
        let store = InMemoryStore::new();
        store.get_or_create("s-1").await.unwrap();

        for i in 0..500 {
            store
                .append("s-1", Message::user(format!("message {}", i)))
                .await
                .unwrap();
        }

        let session = store.load("s-1").await.unwrap().unwrap();
        assert_eq!(session.message_count(), 500);
        assert_eq!(session.messages[0].content, "message 0");
    }

    #[tokio::test]
    async fn delete_removes_session() {
        let store = InMemoryStore::new();
        store.get_or_create("s-1").await.unwrap();
        store.delete("s-1").await.unwrap();
        assert!(store.load("s-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_orders_by_recency() {
        let store = InMemoryStore::new();
        store.get_or_create("old").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store.get_or_create("new").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store.append("old", Message::user("bump")).await.unwrap();

        let summaries = store.list(10, 0).await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].session_id, "old");
    }
}
