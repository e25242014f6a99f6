//! Price-match policy lookup tool

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::ToolHandler;
use crate::assistant::error::ToolError;

/// Returns the retailer's price-match policy from the local policy document.
///
/// On any failure (missing file, malformed JSON, absent `policies.price_match`
/// path) the hardcoded default policy is returned instead. The fallback
/// ignores the `retailer` argument: the same default comes back for every
/// retailer asked about. Whether that is a single universal policy or a
/// missing per-retailer lookup is undecided upstream, so the behavior is kept
/// as-is rather than silently fixed.
pub struct PriceMatchPolicyTool {
    policy_path: PathBuf,
}

impl PriceMatchPolicyTool {
    /// Create the tool pointing at a policy document
    pub fn new(policy_path: impl Into<PathBuf>) -> Self {
        Self {
            policy_path: policy_path.into(),
        }
    }

    /// Read `policies.price_match` from the document, if everything is shaped right
    fn load_document_policy(&self) -> Option<Value> {
        let raw = std::fs::read_to_string(&self.policy_path).ok()?;
        let document: Value = serde_json::from_str(&raw).ok()?;
        document
            .get("policies")
            .and_then(|p| p.get("price_match"))
            .cloned()
    }

    /// The hardcoded default policy used whenever the document is unusable
    fn default_policy() -> Value {
        json!({
            "title": "Price Match Guarantee",
            "content": "We'll match the price of identical items found at major competitors.",
            "details": {
                "time_limit": "Must be requested at time of purchase",
                "conditions": [
                    "Item must be identical (same model, brand, specifications)",
                    "Competitor must be authorized retailer"
                ],
                "exceptions": [
                    "Marketplace sellers",
                    "Clearance or limited-time offers"
                ]
            }
        })
    }
}

#[async_trait]
impl ToolHandler for PriceMatchPolicyTool {
    fn name(&self) -> &str {
        "get_price_match_policy"
    }

    async fn call(&self, args: Value) -> Result<Value, ToolError> {
        let _retailer = args
            .get("retailer")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments("retailer is required".to_string()))?;

        Ok(self
            .load_document_policy()
            .unwrap_or_else(Self::default_policy))
    }
}
