//! # agent-runtime
//!
//! LLM provider backends for the chat assistant.
//!
//! ## Providers
//!
//! - **Anthropic**: Messages API over HTTPS
//! - **Ollama** (feature `ollama`, default): Local LLM inference via Ollama
//! - **Mock**: scripted replies, re-exported from `agent-core`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::{ProviderKind, build_provider};
//!
//! let provider = build_provider(ProviderKind::from_env())?;
//! ```

pub mod anthropic;

#[cfg(feature = "ollama")]
pub mod ollama;

use std::sync::Arc;

pub use anthropic::{AnthropicConfig, AnthropicProvider};
#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};

// Re-export core types for convenience
pub use agent_core::{AgentError, LlmProvider, MockProvider, Result};

/// Which backend to talk to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    Anthropic,
    Ollama,
    Mock,
}

impl ProviderKind {
    /// Parse a provider name; unknown names fall back to Anthropic
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "ollama" => Self::Ollama,
            "mock" => Self::Mock,
            _ => Self::Anthropic,
        }
    }

    /// Read `LLM_PROVIDER` (default: anthropic)
    pub fn from_env() -> Self {
        std::env::var("LLM_PROVIDER")
            .map(|v| Self::parse(&v))
            .unwrap_or(Self::Anthropic)
    }
}

/// Construct the configured provider from environment settings
pub fn build_provider(kind: ProviderKind) -> Result<Arc<dyn LlmProvider>> {
    match kind {
        ProviderKind::Anthropic => Ok(Arc::new(AnthropicProvider::from_env()?)),
        #[cfg(feature = "ollama")]
        ProviderKind::Ollama => Ok(Arc::new(OllamaProvider::from_env())),
        #[cfg(not(feature = "ollama"))]
        ProviderKind::Ollama => Err(AgentError::Config(
            "Ollama support requires the `ollama` feature".into(),
        )),
        ProviderKind::Mock => Ok(Arc::new(MockProvider::new())),
    }
}
