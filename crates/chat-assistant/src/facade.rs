//! API Facade
//!
//! Wraps a [`Chatbot`] and turns every outcome into a serializable envelope.

use std::sync::Arc;

use agent_core::LlmProvider;
use serde::{Deserialize, Serialize};

use crate::config::AssistantConfig;
use crate::orchestrator::Chatbot;
use crate::routing::AgentKind;
use crate::search::SearchClient;

const PROCESSING_ERROR_MESSAGE: &str = "I encountered an error while processing your request.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Reply to one user message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub status: Status,
    pub message: String,
    pub used_internet_search: bool,
    pub agent_used: AgentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetAck {
    pub status: Status,
    pub message: String,
}

/// Envelope-producing front for one conversation
pub struct ChatbotApi {
    config: Arc<AssistantConfig>,
    provider: Arc<dyn LlmProvider>,
    search: Arc<dyn SearchClient>,
    chatbot: Chatbot,
}

impl ChatbotApi {
    pub fn new(
        config: Arc<AssistantConfig>,
        provider: Arc<dyn LlmProvider>,
        search: Arc<dyn SearchClient>,
    ) -> Self {
        let chatbot = Chatbot::new(&config, provider.clone(), search.clone());
        Self {
            config,
            provider,
            search,
            chatbot,
        }
    }

    /// Process a message; never fails
    pub async fn handle(&mut self, message: &str) -> ResponseEnvelope {
        let outcome = self.chatbot.process(message).await;
        let state = self.chatbot.state();

        match outcome {
            Ok(reply) => ResponseEnvelope {
                status: Status::Success,
                message: reply,
                used_internet_search: state.needs_internet_search,
                agent_used: state.last_responder,
                error: None,
            },
            Err(e) => {
                tracing::error!(error = %e, "Error processing message");
                ResponseEnvelope {
                    status: Status::Error,
                    message: PROCESSING_ERROR_MESSAGE.into(),
                    used_internet_search: state.needs_internet_search,
                    agent_used: state.last_responder,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Discard memory, state and agents and start over
    pub fn reset(&mut self) -> ResetAck {
        self.chatbot = Chatbot::new(&self.config, self.provider.clone(), self.search.clone());
        tracing::info!("Chatbot reset");

        ResetAck {
            status: Status::Success,
            message: "Chatbot reset successfully".into(),
        }
    }

    pub const fn chatbot(&self) -> &Chatbot {
        &self.chatbot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::MockSearchClient;
    use agent_core::MockProvider;

    fn api(provider: &Arc<MockProvider>) -> ChatbotApi {
        ChatbotApi::new(
            Arc::new(AssistantConfig::default()),
            provider.clone(),
            Arc::new(MockSearchClient::new()),
        )
    }

    #[tokio::test]
    async fn test_success_envelope() {
        let provider = Arc::new(MockProvider::with_replies(["It is sunny."]));
        let mut api = api(&provider);

        let envelope = api.handle("What's the weather like in New York today?").await;
        assert_eq!(envelope.status, Status::Success);
        assert_eq!(envelope.message, "It is sunny.");
        assert!(envelope.used_internet_search);
        assert_eq!(envelope.agent_used, AgentKind::Main);

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["agent_used"], "main");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_main_failure_becomes_error_envelope() {
        let provider = Arc::new(MockProvider::new());
        provider.push_error("invalid x-api-key").await;
        let mut api = api(&provider);

        let envelope = api.handle("Hello there").await;
        assert_eq!(envelope.status, Status::Error);
        assert_eq!(envelope.message, "I encountered an error while processing your request.");
        assert!(envelope.error.unwrap().contains("invalid x-api-key"));
    }

    #[tokio::test]
    async fn test_specialist_failure_is_a_success() {
        let provider = Arc::new(MockProvider::new());
        provider.push_error("timeout").await;
        let mut api = api(&provider);

        let envelope = api.handle("Write a short story about a robot").await;
        assert_eq!(envelope.status, Status::Success);
        assert!(envelope.message.contains("creative agent encountered an error"));
        assert_eq!(envelope.agent_used, AgentKind::Creative);
        assert!(envelope.error.is_none());

        let next = api.handle("Hello there").await;
        assert_eq!(next.agent_used, AgentKind::Main);
        assert_eq!(next.message, "Mock response to: Hello there");
    }

    #[tokio::test]
    async fn test_reset_forgets_history() {
        let provider = Arc::new(MockProvider::new());
        let mut api = api(&provider);

        api.handle("My favourite colour is teal").await;
        assert_eq!(api.chatbot().memory().len(), 2);

        let ack = api.reset();
        assert_eq!(ack.status, Status::Success);
        assert_eq!(ack.message, "Chatbot reset successfully");
        assert!(api.chatbot().memory().is_empty());
        assert_eq!(api.chatbot().state(), &crate::ConversationState::default());

        api.handle("Hi again").await;
        let request = provider.last_request().await.unwrap();
        assert!(!request.messages.iter().any(|m| m.content.contains("teal")));
    }

    #[tokio::test]
    async fn test_web_search_tool_round() {
        let provider = Arc::new(MockProvider::with_replies([
            r#"{"tool": "web_search", "arguments": {"query": "climate change news"}}"#,
            "Top story: emissions fell.",
        ]));
        let mut api = api(&provider);

        let envelope = api.handle("What's the latest news about climate change?").await;
        assert_eq!(envelope.message, "Top story: emissions fell.");
        assert!(envelope.used_internet_search);

        let request = provider.last_request().await.unwrap();
        let tool_turn = &request.messages.last().unwrap().content;
        assert!(tool_turn.contains("[Tool 'web_search' returned]"));
        assert!(tool_turn.contains("Result 1 for climate change news"));
    }

    #[tokio::test]
    async fn test_delegation_tool_round() {
        let provider = Arc::new(MockProvider::with_replies([
            r#"```tool
{"tool": "delegate_to_specialized_agent", "arguments": {"task": "Summarise quantum computing", "agent_type": "research"}}
```"#,
            "Quantum computers use qubits.",
            "The research specialist says quantum computers use qubits.",
        ]));
        let mut api = api(&provider);

        let envelope = api.handle("Tell me about quantum computing").await;
        assert_eq!(envelope.status, Status::Success);
        assert_eq!(envelope.message, "The research specialist says quantum computers use qubits.");
        assert_eq!(envelope.agent_used, AgentKind::Main);

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 3);
        assert!(requests[1].system_prompt().unwrap().contains("research specialist"));
        assert_eq!(requests[1].messages.len(), 2);
    }
}
