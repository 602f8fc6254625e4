//! Mock LLM Provider
//!
//! For testing and demo purposes. Replays scripted replies in order and
//! records every request it receives.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{AgentError, Result};
use crate::message::{Message, Role};
use crate::provider::{Completion, GenerationOptions, LlmProvider, ModelInfo};

/// A request captured by [`MockProvider`]
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub options: GenerationOptions,
}

impl RecordedRequest {
    /// System prompt of the request, if any
    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
    }
}

/// Scripted provider; falls back to echoing the last user turn
#[derive(Default)]
pub struct MockProvider {
    script: Mutex<VecDeque<std::result::Result<String, String>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a queue of successful replies
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub async fn push_reply(&self, reply: impl Into<String>) {
        self.script.lock().await.push_back(Ok(reply.into()));
    }

    /// Queue a provider failure
    pub async fn push_error(&self, error: impl Into<String>) {
        self.script.lock().await.push_back(Err(error.into()));
    }

    /// All requests seen so far
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().await.last().cloned()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    fn default_model(&self) -> &str {
        "mock"
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        self.requests.lock().await.push(RecordedRequest {
            messages: messages.to_vec(),
            options: options.clone(),
        });

        match self.script.lock().await.pop_front() {
            Some(Ok(reply)) => Ok(Completion::text(reply, &options.model)),
            Some(Err(error)) => Err(AgentError::Provider(error)),
            None => {
                let last_user = messages
                    .iter()
                    .rev()
                    .find(|m| m.role == Role::User)
                    .map_or("", |m| m.content.as_str());
                Ok(Completion::text(format!("Mock response to: {last_user}"), &options.model))
            }
        }
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        Ok(vec![ModelInfo {
            id: "mock".into(),
            name: "Mock".into(),
        }])
    }
}
