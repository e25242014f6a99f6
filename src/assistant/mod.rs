//! Conversational assistant core
//!
//! - `domain/` - Messages, sessions, outcomes, tool definitions
//! - `llm/` - Model client (Anthropic messages API)
//! - `tools/` - Tool registry and the two built-in tool handlers
//! - `memory` - Session storage
//! - `controller` - Conversation orchestration and the price-match shortcut

pub mod controller;
pub mod domain;
pub mod error;
pub mod llm;
pub mod memory;
pub mod tools;

pub use controller::ChatController;
pub use domain::*;
pub use error::*;
