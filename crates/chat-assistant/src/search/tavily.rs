//! Tavily Search Client
//!
//! Calls the Tavily search API and maps its results to [`SearchHit`]s.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{SearchClient, SearchHit};
use crate::error::{AssistantError, Result};

const DEFAULT_ENDPOINT: &str = "https://api.tavily.com/search";

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'static str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    title: String,
    url: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    score: Option<f64>,
}

impl From<TavilyResult> for SearchHit {
    fn from(r: TavilyResult) -> Self {
        Self {
            title: r.title,
            url: r.url,
            snippet: r.content,
            score: r.score,
        }
    }
}

/// Tavily API client
pub struct TavilyClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl TavilyClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.into(),
        })
    }

    /// Create from `TAVILY_API_KEY`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("TAVILY_API_KEY")
            .map_err(|_| AssistantError::Config("TAVILY_API_KEY is not set".into()))?;
        Self::new(api_key)
    }

    fn parse_response(body: &str) -> Result<Vec<SearchHit>> {
        let response: SearchResponse = serde_json::from_str(body)?;
        Ok(response.results.into_iter().map(SearchHit::from).collect())
    }
}

#[async_trait]
impl SearchClient for TavilyClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        tracing::debug!(query, max_results, "Tavily search");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&SearchRequest {
                query,
                max_results,
                search_depth: "basic",
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AssistantError::Search(format!("{status}: {body}")));
        }

        Self::parse_response(&body)
    }

    fn name(&self) -> &str {
        "Tavily"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "query": "rust 2024 edition",
            "results": [
                {"title": "Rust 2024", "url": "https://blog.rust-lang.org", "content": "The 2024 edition...", "score": 0.92},
                {"title": "Edition guide", "url": "https://doc.rust-lang.org/edition-guide"}
            ]
        }"#;

        let hits = TavilyClient::parse_response(body).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].snippet, "The 2024 edition...");
        assert_eq!(hits[0].score, Some(0.92));
        assert!(hits[1].snippet.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            TavilyClient::parse_response("<html>"),
            Err(AssistantError::Serialization(_))
        ));
    }

    #[test]
    fn test_request_shape() {
        let json = serde_json::to_value(SearchRequest {
            query: "weather",
            max_results: 5,
            search_depth: "basic",
        })
        .unwrap();
        assert_eq!(json["query"], "weather");
        assert_eq!(json["max_results"], 5);
    }
}
