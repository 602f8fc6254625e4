//! Delegation Tool
//!
//! Hands a sub-task to one of the specialist agents and returns its answer.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema,
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::agents::Specialists;
use crate::routing::AgentKind;

/// Tool for delegating a task to a specialist agent
pub struct DelegateTool {
    specialists: Arc<Specialists>,
}

impl DelegateTool {
    pub const NAME: &'static str = "delegate_to_specialized_agent";

    pub const fn new(specialists: Arc<Specialists>) -> Self {
        Self { specialists }
    }

    fn available() -> String {
        AgentKind::SPECIALISTS
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[async_trait]
impl Tool for DelegateTool {
    fn schema(&self) -> ToolSchema {
        let mut agent_type = ParameterSchema::string("agent_type", "Which specialist should handle the task");
        agent_type.enum_values = Some(
            AgentKind::SPECIALISTS
                .iter()
                .map(|k| serde_json::Value::from(k.as_str()))
                .collect(),
        );

        ToolSchema {
            name: Self::NAME.into(),
            description: "Delegate a task to a specialized agent: research for in-depth analysis, technical for explanations and code, creative for stories and content.".into(),
            parameters: vec![
                ParameterSchema::string("task", "The task, stated fully enough to be handled without the conversation"),
                agent_type,
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let task = call.str_arg("task").unwrap_or_default().trim();
        let requested = call.str_arg("agent_type").unwrap_or_default();

        let Some((kind, agent)) = requested
            .parse::<AgentKind>()
            .ok()
            .and_then(|kind| self.specialists.get(kind).map(|agent| (kind, agent)))
        else {
            return Ok(ToolResult::failure(
                Self::NAME,
                format!(
                    "Agent type '{requested}' not found. Available agents: {}",
                    Self::available()
                ),
            ));
        };

        if task.is_empty() {
            return Ok(ToolResult::failure(Self::NAME, "Task must not be empty"));
        }

        tracing::info!(agent = %kind, "Delegating sub-task to specialist");

        let output = match agent.ask(task).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!(agent = %kind, error = %e, "Specialist failed");
                format!("The {kind} agent encountered an error: {e}")
            }
        };

        Ok(ToolResult::success(Self::NAME, output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssistantConfig;
    use agent_core::MockProvider;

    fn tool_with(provider: Arc<MockProvider>) -> DelegateTool {
        let specialists = Specialists::new(&AssistantConfig::default(), provider);
        DelegateTool::new(Arc::new(specialists))
    }

    #[tokio::test]
    async fn test_delegates_in_fresh_context() {
        let provider = Arc::new(MockProvider::with_replies(["Once upon a time..."]));
        let tool = tool_with(provider.clone());
        let call = ToolCall::new(DelegateTool::NAME)
            .with_arg("task", "Write a poem about rust")
            .with_arg("agent_type", "creative");

        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);
        assert_eq!(result.output, "Once upon a time...");

        let request = provider.last_request().await.unwrap();
        assert_eq!(request.messages.len(), 2);
        assert!(request.system_prompt().unwrap().contains("creative content specialist"));
        assert!((request.options.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_unknown_agent_lists_choices() {
        let tool = tool_with(Arc::new(MockProvider::new()));
        let call = ToolCall::new(DelegateTool::NAME)
            .with_arg("task", "anything")
            .with_arg("agent_type", "poet");

        let result = tool.execute(&call).await.unwrap();
        assert!(!result.success);
        assert_eq!(
            result.output,
            "Agent type 'poet' not found. Available agents: research, technical, creative"
        );

        // main is not a delegation target
        let call = ToolCall::new(DelegateTool::NAME)
            .with_arg("task", "anything")
            .with_arg("agent_type", "main");
        assert!(!tool.execute(&call).await.unwrap().success);
    }

    #[tokio::test]
    async fn test_specialist_failure_is_absorbed() {
        let provider = Arc::new(MockProvider::new());
        provider.push_error("overloaded").await;
        let tool = tool_with(provider);
        let call = ToolCall::new(DelegateTool::NAME)
            .with_arg("task", "Explain closures")
            .with_arg("agent_type", "technical");

        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);
        assert!(result.output.starts_with("The technical agent encountered an error:"));
        assert!(result.output.contains("overloaded"));
    }
}
