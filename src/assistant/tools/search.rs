//! Competitor price search tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::ToolHandler;
use crate::adapters::SearchPort;
use crate::assistant::error::ToolError;

/// Searches for a product's price at a set of competitor retailers.
///
/// One result set is collected per retailer attempted, so the output length
/// always equals the number of retailers. A retailer whose search errors
/// contributes an empty result set and is additionally recorded in
/// `failed_retailers`, so callers can tell "no results" apart from "search
/// errored".
pub struct CompetitorPriceSearchTool {
    search: Arc<dyn SearchPort>,
    default_retailers: Vec<String>,
    max_results: usize,
}

impl CompetitorPriceSearchTool {
    /// Create the tool with a search port and retailer defaults
    pub fn new(search: Arc<dyn SearchPort>, default_retailers: Vec<String>, max_results: usize) -> Self {
        Self {
            search,
            default_retailers,
            max_results,
        }
    }

    /// Build the per-retailer query: `[brand] product_name retailer`
    fn build_query(product_name: &str, retailer: &str, brand: Option<&str>) -> String {
        match brand {
            Some(brand) => format!("{} {} {}", brand, product_name, retailer),
            None => format!("{} {}", product_name, retailer),
        }
    }
}

#[async_trait]
impl ToolHandler for CompetitorPriceSearchTool {
    fn name(&self) -> &str {
        "search_competitor_prices"
    }

    async fn call(&self, args: Value) -> Result<Value, ToolError> {
        let product_name = args
            .get("product_name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                ToolError::InvalidArguments("product_name is required".to_string())
            })?;

        let retailers: Vec<String> = match args.get("retailers") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            Some(_) => {
                return Err(ToolError::InvalidArguments(
                    "retailers must be an array of strings".to_string(),
                ))
            }
            None => self.default_retailers.clone(),
        };

        let brand = args.get("brand").and_then(|v| v.as_str());

        let mut results: Vec<Vec<crate::adapters::SearchResult>> = Vec::with_capacity(retailers.len());
        let mut failed_retailers: Vec<String> = Vec::new();

        for retailer in &retailers {
            let query = Self::build_query(product_name, retailer, brand);
            match self.search.search(&query, self.max_results).await {
                Ok(records) => results.push(records),
                Err(e) => {
                    tracing::warn!("Price search for retailer '{}' failed: {}", retailer, e);
                    results.push(Vec::new());
                    failed_retailers.push(retailer.clone());
                }
            }
        }

        Ok(json!({
            "results": results,
            "failed_retailers": failed_retailers,
        }))
    }
}
