//! Application State

use std::sync::Arc;

use agent_core::{LlmProvider, SessionStore};
use chat_assistant::{AssistantConfig, ChatbotApi, SearchClient};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// LLM provider (Anthropic, Ollama or Mock)
    pub provider: Arc<dyn LlmProvider>,

    /// Web search backend handed to every new conversation
    pub search: Arc<dyn SearchClient>,

    /// Assistant settings shared by all sessions
    pub config: Arc<AssistantConfig>,

    /// One chatbot per conversation
    pub sessions: Arc<SessionStore<ChatbotApi>>,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        search: Arc<dyn SearchClient>,
        config: AssistantConfig,
    ) -> Self {
        Self {
            provider,
            search,
            config: Arc::new(config),
            sessions: Arc::new(SessionStore::new()),
        }
    }

    /// Fresh chatbot wired to the shared provider and search client
    pub fn new_chatbot(&self) -> ChatbotApi {
        ChatbotApi::new(self.config.clone(), self.provider.clone(), self.search.clone())
    }
}
