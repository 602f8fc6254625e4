//! Web Search Integration
//!
//! Abstractions and implementations for live web search backends.

mod mock;
mod tavily;

pub use mock::MockSearchClient;
pub use tavily::TavilyClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AssistantError, Result};

/// A single ranked search result
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Search client trait (Strategy pattern)
///
/// Implement this for each search backend: Tavily, Brave, `SearxNG`, etc.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Run a query and return up to `max_results` ranked hits
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>>;

    /// Backend name
    fn name(&self) -> &str;
}

/// Placeholder used when no search credentials are configured
pub struct DisabledSearch;

#[async_trait]
impl SearchClient for DisabledSearch {
    async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<SearchHit>> {
        Err(AssistantError::Config(
            "web search is not configured (set TAVILY_API_KEY)".into(),
        ))
    }

    fn name(&self) -> &str {
        "Disabled"
    }
}
