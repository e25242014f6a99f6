//! Tool definition types and schema document loading

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Definition of a tool the model may request during a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (unique key in the registry)
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON Schema defining the tool's parameters
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Shape of the tool schema document on disk
#[derive(Debug, Deserialize)]
struct ToolSchemaDocument {
    #[serde(default)]
    tools: Vec<ToolDefinition>,
}

/// Load tool definitions from a schema document.
///
/// An absent file degrades to "no tools available" rather than failing
/// startup; a present but malformed file is a hard error so a broken
/// deployment is noticed.
pub fn load_tool_definitions(path: impl AsRef<Path>) -> anyhow::Result<Vec<ToolDefinition>> {
    let path = path.as_ref();

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(
                "Tool schema document {} not found, no tools available",
                path.display()
            );
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let document: ToolSchemaDocument = serde_json::from_str(&raw)?;
    Ok(document.tools)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_schema_document_yields_no_tools() {
        let dir = tempfile::TempDir::new().unwrap();
        let tools = load_tool_definitions(dir.path().join("tools.json")).unwrap();
        assert!(tools.is_empty());
    }

    #[test]
    fn loads_tool_definitions() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tools.json");
        std::fs::write(
            &path,
            json!({
                "tools": [{
                    "name": "get_price_match_policy",
                    "description": "Fetch the price-match policy",
                    "input_schema": {"type": "object"}
                }]
            })
            .to_string(),
        )
        .unwrap();

        let tools = load_tool_definitions(&path).unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "get_price_match_policy");
    }

    #[test]
    fn malformed_schema_document_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tools.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(load_tool_definitions(&path).is_err());
    }
}
