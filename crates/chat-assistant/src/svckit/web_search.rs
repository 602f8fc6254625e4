//! Web Search Tool
//!
//! Lets the main agent look up current information on the web.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema,
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::search::SearchClient;

/// Upper bound on hits a single call may request
const MAX_RESULTS_CAP: usize = 20;

/// Tool for querying a web search backend
pub struct WebSearchTool {
    client: Arc<dyn SearchClient>,
    default_max_results: usize,
}

impl WebSearchTool {
    pub const NAME: &'static str = "web_search";

    pub fn new(client: Arc<dyn SearchClient>, default_max_results: usize) -> Self {
        Self {
            client,
            default_max_results,
        }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Search the web for current information. Returns ranked results with titles, URLs and snippets.".into(),
            parameters: vec![
                ParameterSchema::string("query", "What to search for"),
                ParameterSchema {
                    name: "max_results".into(),
                    param_type: "number".into(),
                    description: format!("Maximum number of results (default: {})", self.default_max_results),
                    required: false,
                    enum_values: None,
                },
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let query = call.str_arg("query").unwrap_or_default().trim();
        if query.is_empty() {
            return Ok(ToolResult::failure(Self::NAME, "Query must not be empty"));
        }

        let max_results = call
            .arguments
            .get("max_results")
            .and_then(serde_json::Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n > 0)
            .unwrap_or(self.default_max_results)
            .min(MAX_RESULTS_CAP);

        let hits = match self.client.search(query, max_results).await {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(backend = self.client.name(), error = %e, "Web search failed");
                return Ok(ToolResult::failure(Self::NAME, format!("Search failed: {e}")));
            }
        };

        if hits.is_empty() {
            return Ok(ToolResult::success(Self::NAME, format!("No results found for '{query}'.")));
        }

        let mut output = format!("Search results for '{query}':\n");
        for (rank, hit) in hits.iter().enumerate() {
            let _ = writeln!(output, "{}. {} ({})", rank + 1, hit.title, hit.url);
            if !hit.snippet.is_empty() {
                let _ = writeln!(output, "   {}", hit.snippet);
            }
        }

        Ok(ToolResult::success(Self::NAME, output.trim_end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{DisabledSearch, MockSearchClient, SearchHit};

    #[tokio::test]
    async fn test_formats_ranked_hits() {
        let tool = WebSearchTool::new(Arc::new(MockSearchClient::new()), 5);
        let call = ToolCall::new("web_search")
            .with_arg("query", "climate change")
            .with_arg("max_results", 2);

        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);
        assert!(result.output.starts_with("Search results for 'climate change':"));
        assert!(result.output.contains("1. Result 1 for climate change (https://example.com/1)"));
        assert!(result.output.contains("2. Result 2"));
        assert!(!result.output.contains("3. Result 3"));
    }

    #[tokio::test]
    async fn test_requested_count_is_capped() {
        let hits = (1..=30)
            .map(|rank| SearchHit {
                title: format!("Hit {rank}"),
                url: format!("https://example.com/{rank}"),
                snippet: String::new(),
                score: None,
            })
            .collect();
        let tool = WebSearchTool::new(Arc::new(MockSearchClient::with_hits(hits)), 5);
        let call = ToolCall::new("web_search")
            .with_arg("query", "everything")
            .with_arg("max_results", 1000);

        let result = tool.execute(&call).await.unwrap();
        assert!(result.output.contains("20. Hit 20"));
        assert!(!result.output.contains("21. Hit 21"));
    }

    #[tokio::test]
    async fn test_empty_results() {
        let tool = WebSearchTool::new(Arc::new(MockSearchClient::with_hits(Vec::new())), 5);
        let call = ToolCall::new("web_search").with_arg("query", "nothing");

        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);
        assert_eq!(result.output, "No results found for 'nothing'.");
    }

    #[tokio::test]
    async fn test_backend_failure_is_reported() {
        let tool = WebSearchTool::new(Arc::new(DisabledSearch), 5);
        let call = ToolCall::new("web_search").with_arg("query", "news");

        let result = tool.execute(&call).await.unwrap();
        assert!(!result.success);
        assert!(result.output.contains("TAVILY_API_KEY"));
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let tool = WebSearchTool::new(Arc::new(MockSearchClient::new()), 5);
        let result = tool.execute(&ToolCall::new("web_search").with_arg("query", "  ")).await.unwrap();
        assert!(!result.success);
    }
}
