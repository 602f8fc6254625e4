//! Reasoning Loop
//!
//! Implements the ReAct (Reason + Act) pattern for agent behavior.
//! The agent observes, thinks, acts (via tools), and responds.

use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::memory::MemoryBuffer;
use crate::message::Message;
use crate::provider::{GenerationOptions, LlmProvider};
use crate::tool::{Tool, ToolCall, ToolRegistry, ToolResult};

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Agent name, used in logs
    pub name: String,

    /// System prompt
    pub system_prompt: String,

    /// Maximum reasoning iterations before giving up
    pub max_iterations: usize,

    /// Generation options
    pub generation: GenerationOptions,

    /// Whether to append tool descriptions to system prompt
    pub inject_tool_descriptions: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "assistant".into(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            max_iterations: 10,
            generation: GenerationOptions::default(),
            inject_tool_descriptions: true,
        }
    }
}

const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a helpful AI assistant.

When you need to use a tool, respond with a JSON block in this exact format:
```tool
{"tool": "tool_name", "arguments": {"arg1": "value1"}}
```

After receiving tool results, synthesize them into a helpful response.
If you can answer directly without tools, do so.
Be concise and accurate."#;

/// An LLM persona bound to a system prompt, generation options and tools
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
}

impl Agent {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tools: Arc<ToolRegistry>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            tools,
            config,
        }
    }

    /// Build the full system prompt including tool descriptions
    fn build_system_prompt(&self) -> String {
        let mut prompt = self.config.system_prompt.clone();

        if self.config.inject_tool_descriptions && !self.tools.is_empty() {
            prompt.push_str("\n\n");
            prompt.push_str(&self.tools.generate_prompt_section());
        }

        prompt
    }

    /// Answer `query` with `memory` as prior context.
    ///
    /// On success the query and the final reply are appended to `memory`.
    pub async fn run(&self, memory: &mut MemoryBuffer, query: &str) -> Result<String> {
        let mut transcript = Vec::with_capacity(memory.len() + 2);
        transcript.push(Message::system(self.build_system_prompt()));
        transcript.extend(memory.messages().iter().cloned());
        transcript.push(Message::user(query));

        let reply = self.reason(transcript).await?;
        memory.record_exchange(query, reply.clone());
        Ok(reply)
    }

    /// Answer a single question with no prior context
    pub async fn ask(&self, question: &str) -> Result<String> {
        let transcript = vec![
            Message::system(self.build_system_prompt()),
            Message::user(question),
        ];
        self.reason(transcript).await
    }

    async fn reason(&self, mut transcript: Vec<Message>) -> Result<String> {
        let mut iterations = 0;

        loop {
            iterations += 1;

            if iterations > self.config.max_iterations {
                return Err(AgentError::MaxIterations(self.config.max_iterations));
            }

            let completion = self
                .provider
                .complete(&transcript, &self.config.generation)
                .await?;

            let content = completion.content;
            transcript.push(Message::assistant(&content));

            if !self.tools.is_empty() {
                if let Some(tool_call) = parse_tool_call(&content) {
                    tracing::debug!(agent = %self.config.name, tool = %tool_call.name, "Executing tool");

                    let result = self.execute_tool(&tool_call).await;
                    transcript.push(Message::tool(format_tool_result(&result), tool_call.id.clone()));
                    continue;
                }
            }

            return Ok(content);
        }
    }

    /// Execute a tool call; failures are reported back to the model
    async fn execute_tool(&self, call: &ToolCall) -> ToolResult {
        match self.tools.execute(call).await {
            Ok(mut result) => {
                result.id.clone_from(&call.id);
                result
            }
            Err(e) => {
                tracing::warn!(tool = %call.name, error = %e, "Tool call failed");
                ToolResult {
                    name: call.name.clone(),
                    id: call.id.clone(),
                    success: false,
                    output: format!("Error: {e}"),
                }
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Parse a tool call from an LLM response
pub fn parse_tool_call(content: &str) -> Option<ToolCall> {
    let tool_start = "```tool";
    let tool_end = "```";

    if let Some(start_idx) = content.find(tool_start) {
        let after_marker = &content[start_idx + tool_start.len()..];
        if let Some(end_idx) = after_marker.find(tool_end) {
            let json_str = after_marker[..end_idx].trim();

            if let Ok(call) = serde_json::from_str::<ToolCall>(json_str) {
                return Some(with_call_id(call));
            }
        }
    }

    // Fallback: a reply that is nothing but a JSON object with a "tool" key
    parse_inline_tool_call(content).map(with_call_id)
}

fn parse_inline_tool_call(content: &str) -> Option<ToolCall> {
    let body = content.trim();

    if !(body.starts_with('{') && body.ends_with('}') && body.contains(r#""tool""#)) {
        return None;
    }

    serde_json::from_str::<ToolCall>(body).ok()
}

fn with_call_id(mut call: ToolCall) -> ToolCall {
    if call.id.is_none() {
        call.id = Some(uuid::Uuid::new_v4().to_string());
    }
    call
}

fn format_tool_result(result: &ToolResult) -> String {
    if result.success {
        format!("[Tool '{}' returned]\n{}", result.name, result.output)
    } else {
        format!("[Tool '{}' failed]\n{}", result.name, result.output)
    }
}

/// Builder for Agent configuration
pub struct AgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    tools: ToolRegistry,
    config: AgentConfig,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tools: ToolRegistry::new(),
            config: AgentConfig::default(),
        }
    }

    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    #[must_use]
    pub fn tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.register(tool);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    #[must_use]
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    #[must_use]
    pub const fn temperature(mut self, temp: f32) -> Self {
        self.config.generation.temperature = temp;
        self
    }

    #[must_use]
    pub const fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::Config("Provider is required".into()))?;

        Ok(Agent::new(provider, Arc::new(self.tools), self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;
    use crate::mock::MockProvider;
    use crate::tool::CalculatorTool;

    #[test]
    fn test_parse_fenced_tool_call() {
        let content = r#"Let me check that for you.
```tool
{"tool": "calculator", "arguments": {"expression": "2 + 2"}}
```"#;

        let call = parse_tool_call(content).unwrap();
        assert_eq!(call.name, "calculator");
        assert_eq!(call.str_arg("expression"), Some("2 + 2"));
        assert!(call.id.is_some());
    }

    #[test]
    fn test_parse_inline_tool_call() {
        let call = parse_tool_call("  {\"tool\": \"web_search\", \"arguments\": {\"query\": \"rust\"}}\n").unwrap();
        assert_eq!(call.name, "web_search");
        assert!(parse_tool_call("No tools needed, the answer is 4.").is_none());
    }

    #[test]
    fn test_prose_mentioning_tool_json_is_an_answer() {
        let answer = r#"To call a tool, reply with {"tool": "calculator", "arguments": {"expression": "1 + 1"}} on its own."#;
        assert!(parse_tool_call(answer).is_none());
    }

    #[tokio::test]
    async fn test_tool_loop_feeds_result_back() {
        let provider = Arc::new(MockProvider::with_replies([
            "```tool\n{\"tool\": \"calculator\", \"arguments\": {\"expression\": \"235 * 18.7\"}}\n```",
            "235 * 18.7 is 4394.5",
        ]));
        let agent = AgentBuilder::new()
            .provider(provider.clone())
            .tool(CalculatorTool)
            .build()
            .unwrap();

        let mut memory = MemoryBuffer::default();
        let reply = agent.run(&mut memory, "Calculate 235 * 18.7").await.unwrap();
        assert_eq!(reply, "235 * 18.7 is 4394.5");

        let second = provider.last_request().await.unwrap();
        let tool_turn = second.messages.last().unwrap();
        assert_eq!(tool_turn.role, Role::Tool);
        assert!(tool_turn.content.contains("Result: 4394.5"));
        assert!(second.system_prompt().unwrap().contains("### calculator"));

        // Only the exchange itself lands in memory
        assert_eq!(memory.len(), 2);
        assert_eq!(memory.messages()[0].content, "Calculate 235 * 18.7");
        assert_eq!(memory.messages()[1].content, reply);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_reported_to_model() {
        let provider = Arc::new(MockProvider::with_replies([
            r#"{"tool": "shell", "arguments": {"cmd": "ls"}}"#,
            "I cannot do that.",
        ]));
        let agent = AgentBuilder::new()
            .provider(provider.clone())
            .tool(CalculatorTool)
            .build()
            .unwrap();

        assert_eq!(agent.ask("list files").await.unwrap(), "I cannot do that.");
        let last = provider.last_request().await.unwrap();
        assert!(last.messages.last().unwrap().content.contains("Tool not found: shell"));
    }

    #[tokio::test]
    async fn test_max_iterations() {
        let looping = "```tool\n{\"tool\": \"calculator\", \"arguments\": {\"expression\": \"1\"}}\n```";
        let provider = Arc::new(MockProvider::with_replies([looping, looping, looping]));
        let agent = AgentBuilder::new()
            .provider(provider)
            .tool(CalculatorTool)
            .max_iterations(2)
            .build()
            .unwrap();

        let result = agent.ask("loop forever").await;
        assert!(matches!(result, Err(AgentError::MaxIterations(2))));
    }

    #[tokio::test]
    async fn test_agent_without_tools_returns_raw_reply() {
        let reply = r#"Here is JSON: {"tool": "calculator"}"#;
        let provider = Arc::new(MockProvider::with_replies([reply]));
        let agent = AgentBuilder::new().provider(provider).build().unwrap();

        assert_eq!(agent.ask("show json").await.unwrap(), reply);
    }

    #[tokio::test]
    async fn test_provider_error_leaves_memory_untouched() {
        let provider = Arc::new(MockProvider::new());
        provider.push_error("overloaded").await;
        let agent = AgentBuilder::new().provider(provider).build().unwrap();

        let mut memory = MemoryBuffer::default();
        assert!(agent.run(&mut memory, "hello").await.is_err());
        assert!(memory.is_empty());
    }

    #[tokio::test]
    async fn test_builder_settings_reach_provider() {
        let provider = Arc::new(MockProvider::new());
        let agent = AgentBuilder::new()
            .provider(provider.clone())
            .name("poet")
            .system_prompt("You write haiku.")
            .temperature(0.9)
            .build()
            .unwrap();

        assert_eq!(agent.name(), "poet");
        assert_eq!(agent.ask("autumn").await.unwrap(), "Mock response to: autumn");

        let request = provider.last_request().await.unwrap();
        assert_eq!(request.system_prompt(), Some("You write haiku."));
        assert!((request.options.temperature - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_builder_requires_provider() {
        assert!(matches!(AgentBuilder::new().build(), Err(AgentError::Config(_))));
    }
}
