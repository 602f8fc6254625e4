//! Mock Search Client
//!
//! For testing and demo purposes. Returns deterministic hits.

use async_trait::async_trait;

use super::{SearchClient, SearchHit};
use crate::error::Result;

/// Mock search client with canned or generated hits
#[derive(Default)]
pub struct MockSearchClient {
    hits: Option<Vec<SearchHit>>,
}

impl MockSearchClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always return these hits, regardless of the query
    pub const fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self { hits: Some(hits) }
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        let hits = match &self.hits {
            Some(hits) => hits.iter().take(max_results).cloned().collect(),
            None => (1..=max_results.min(3))
                .map(|rank| SearchHit {
                    title: format!("Result {rank} for {query}"),
                    url: format!("https://example.com/{rank}"),
                    snippet: format!("Snippet {rank} about {query}."),
                    score: None,
                })
                .collect(),
        };
        Ok(hits)
    }

    fn name(&self) -> &str {
        "MockSearch"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generated_hits_are_capped() {
        let client = MockSearchClient::new();
        let hits = client.search("rust", 2).await.unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Result 1 for rust");
    }

    #[tokio::test]
    async fn test_canned_hits() {
        let client = MockSearchClient::with_hits(Vec::new());
        assert!(client.search("anything", 5).await.unwrap().is_empty());
    }
}
