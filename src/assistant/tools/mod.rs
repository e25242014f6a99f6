//! Tool registry and handlers
//!
//! The registry is the seam between the model's function-calling protocol
//! (a tool name plus JSON arguments) and ordinary typed handlers. Dispatch
//! never lets a tool failure escape: unknown names and handler errors both
//! come back as structured error values, so a bad tool call can never crash
//! the surrounding chat loop.

mod policy;
mod search;

pub use policy::PriceMatchPolicyTool;
pub use search::CompetitorPriceSearchTool;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::assistant::error::ToolError;

/// Uniform contract for tool handlers.
///
/// A handler takes a single structured-argument value and returns a result
/// value or a `ToolError`. Argument validation is the handler's job; the
/// registry only validates the name at registration time.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Name the handler is dispatched under
    fn name(&self) -> &str;

    /// Invoke the handler with JSON arguments
    async fn call(&self, args: Value) -> Result<Value, ToolError>;
}

/// Name-keyed lookup of tool handlers.
///
/// Constructed once at startup and passed explicitly to whatever needs to
/// dispatch tools; there is no process-wide instance.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a handler under its name, overwriting any previous entry.
    ///
    /// Rejects handlers with an empty name; this is the only validation
    /// performed at registration time.
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) -> Result<(), ToolError> {
        let name = handler.name().to_string();
        if name.trim().is_empty() {
            return Err(ToolError::InvalidRegistration(
                "tool name must not be empty".to_string(),
            ));
        }
        self.tools.insert(name, handler);
        Ok(())
    }

    /// Dispatch a tool call by name.
    ///
    /// Always returns a value: an unknown name or a handler error is wrapped
    /// into `{"error": ...}` rather than propagated.
    pub async fn dispatch(&self, name: &str, args: Value) -> Value {
        let handler = match self.tools.get(name) {
            Some(handler) => handler,
            None => {
                tracing::warn!("Dispatch of unknown tool: {}", name);
                return json!({ "error": format!("Unknown tool: {}", name) });
            }
        };

        match handler.call(args).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Tool '{}' failed: {}", name, e);
                json!({ "error": format!("Tool execution failed: {}", e) })
            }
        }
    }

    /// All registered tool names, order not significant
    pub fn list(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Whether a tool is registered under the given name
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }
}
