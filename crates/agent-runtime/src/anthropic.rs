//! Anthropic LLM Provider
//!
//! Implementation of `LlmProvider` for the Anthropic Messages API.

use std::time::Duration;

use agent_core::{
    error::{AgentError, Result},
    message::{Message, Role},
    provider::{Completion, DEFAULT_MODEL, FinishReason, GenerationOptions, LlmProvider, ModelInfo, TokenUsage},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// Anthropic provider configuration
#[derive(Clone, Debug)]
pub struct AnthropicConfig {
    /// API key (`x-api-key`)
    pub api_key: String,

    /// API base URL
    pub base_url: String,

    /// Model used when agents don't pick one
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            timeout_secs: 120,
        }
    }

    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| AgentError::Config("ANTHROPIC_API_KEY is not set".into()))?;
        let base_url = std::env::var("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let model = std::env::var("ANTHROPIC_MODEL_NAME")
            .unwrap_or_else(|_| DEFAULT_MODEL.into());

        Ok(Self {
            base_url,
            model,
            ..Self::new(api_key)
        })
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<WireMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop_sequences: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    model: String,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    data: Vec<WireModel>,
}

#[derive(Debug, Deserialize)]
struct WireModel {
    id: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Anthropic LLM provider
pub struct AnthropicProvider {
    client: reqwest::Client,
    config: AnthropicConfig,
}

impl AnthropicProvider {
    pub fn from_config(config: AnthropicConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(AnthropicConfig::from_env()?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Convert agent messages to a Messages API request
    fn build_request(messages: &[Message], options: &GenerationOptions) -> MessagesRequest {
        let system: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect();

        let mut wire: Vec<WireMessage> = Vec::new();
        for message in messages.iter().filter(|m| m.role != Role::System) {
            let role = match message.role {
                Role::Assistant => "assistant",
                // Tools appear as user context
                Role::User | Role::Tool | Role::System => "user",
            };

            // Consecutive turns from the same side are merged
            match wire.last_mut() {
                Some(last) if last.role == role => {
                    last.content.push_str("\n\n");
                    last.content.push_str(&message.content);
                }
                _ => wire.push(WireMessage {
                    role,
                    content: message.content.clone(),
                }),
            }
        }

        MessagesRequest {
            model: options.model.clone(),
            max_tokens: options.max_tokens,
            system: (!system.is_empty()).then(|| system.join("\n\n")),
            messages: wire,
            temperature: options.temperature,
            top_p: options.top_p,
            stop_sequences: options.stop_sequences.clone(),
        }
    }

    /// Convert a Messages API response to an agent completion
    fn convert_completion(response: MessagesResponse) -> Completion {
        let content = response
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        let finish_reason = response.stop_reason.as_deref().and_then(|reason| match reason {
            "end_turn" | "stop_sequence" => Some(FinishReason::Stop),
            "max_tokens" => Some(FinishReason::Length),
            "tool_use" => Some(FinishReason::ToolUse),
            "refusal" => Some(FinishReason::ContentFilter),
            _ => None,
        });

        Completion {
            content,
            model: response.model,
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.input_tokens,
                completion_tokens: u.output_tokens,
                total_tokens: u.input_tokens + u.output_tokens,
            }),
            finish_reason,
        }
    }

    /// Map a non-success HTTP status to an agent error
    fn map_status(status: StatusCode, body: &str) -> AgentError {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map_or_else(|_| body.to_string(), |e| e.error.message);

        match status.as_u16() {
            401 | 403 => AgentError::Auth(message),
            429 => AgentError::RateLimited(message),
            500..=599 => AgentError::ProviderUnavailable(format!("{status}: {message}")),
            _ => AgentError::Provider(format!("{status}: {message}")),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String> {
        let response = request
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .send()
            .await
            .map_err(|e| AgentError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AgentError::Provider(e.to_string()))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(Self::map_status(status, &body))
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "Anthropic"
    }

    fn default_model(&self) -> &str {
        &self.config.model
    }

    async fn health_check(&self) -> Result<bool> {
        match self.list_models().await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("Anthropic health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let request = Self::build_request(messages, options);
        tracing::debug!(model = %request.model, turns = request.messages.len(), "Anthropic request");

        let body = self
            .send(self.client.post(self.endpoint("/v1/messages")).json(&request))
            .await?;

        let response: MessagesResponse =
            serde_json::from_str(&body).map_err(|e| AgentError::Parse(e.to_string()))?;

        Ok(Self::convert_completion(response))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let body = self.send(self.client.get(self.endpoint("/v1/models"))).await?;
        let models: ModelList =
            serde_json::from_str(&body).map_err(|e| AgentError::Parse(e.to_string()))?;

        Ok(models
            .data
            .into_iter()
            .map(|m| ModelInfo {
                name: m.display_name.unwrap_or_else(|| m.id.clone()),
                id: m.id,
            })
            .collect())
    }
}
