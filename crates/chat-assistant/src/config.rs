//! Assistant Configuration
//!
//! Explicit settings handed to every chatbot instance. Nothing here is
//! process-global, so tests can build isolated instances freely.

use std::str::FromStr;

use agent_core::memory::DEFAULT_MEMORY_TOKEN_LIMIT;
use agent_core::provider::{DEFAULT_MODEL, GenerationOptions};
use serde::{Deserialize, Serialize};

use crate::routing::AgentKind;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Model identifier shared by all agents
    pub model: String,

    /// Token cap per completion
    pub max_tokens: u32,

    pub main_temperature: f32,
    pub research_temperature: f32,
    pub technical_temperature: f32,
    pub creative_temperature: f32,

    /// Conversation memory budget (estimated tokens)
    pub memory_token_limit: u32,

    /// Reasoning loop bound per turn
    pub max_iterations: usize,

    /// Hits returned by the web search tool when the model doesn't ask for a count
    pub search_max_results: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            max_tokens: 2048,
            main_temperature: 0.2,
            research_temperature: 0.1,
            technical_temperature: 0.1,
            creative_temperature: 0.7,
            memory_token_limit: DEFAULT_MEMORY_TOKEN_LIMIT,
            max_iterations: 10,
            search_max_results: 5,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl AssistantConfig {
    /// Read settings from the environment; unset or malformed values keep their defaults.
    ///
    /// `model` is the active provider's default model.
    pub fn from_env(model: impl Into<String>) -> Self {
        let defaults = Self::default();

        Self {
            model: model.into(),
            max_tokens: env_or("MAX_TOKENS", defaults.max_tokens),
            main_temperature: env_or("DEFAULT_TEMPERATURE", defaults.main_temperature),
            research_temperature: env_or("RESEARCH_TEMPERATURE", defaults.research_temperature),
            technical_temperature: env_or("TECHNICAL_TEMPERATURE", defaults.technical_temperature),
            creative_temperature: env_or("CREATIVE_TEMPERATURE", defaults.creative_temperature),
            memory_token_limit: env_or("MEMORY_TOKEN_LIMIT", defaults.memory_token_limit),
            max_iterations: env_or("AGENT_MAX_ITERATIONS", defaults.max_iterations),
            search_max_results: env_or("SEARCH_MAX_RESULTS", defaults.search_max_results),
        }
    }

    pub const fn temperature_for(&self, kind: AgentKind) -> f32 {
        match kind {
            AgentKind::Main => self.main_temperature,
            AgentKind::Research => self.research_temperature,
            AgentKind::Technical => self.technical_temperature,
            AgentKind::Creative => self.creative_temperature,
        }
    }

    /// Generation options for one agent role
    pub fn generation_for(&self, kind: AgentKind) -> GenerationOptions {
        GenerationOptions {
            model: self.model.clone(),
            temperature: self.temperature_for(kind),
            max_tokens: self.max_tokens,
            ..Default::default()
        }
    }
}
