//! Agent Pool
//!
//! The main agent plus the three specialists, all sharing one provider.

use std::sync::Arc;

use agent_core::{Agent, AgentConfig, CalculatorTool, LlmProvider, ToolRegistry};

use crate::config::AssistantConfig;
use crate::routing::AgentKind;
use crate::search::SearchClient;
use crate::svckit::{DelegateTool, WebSearchTool};
use crate::{CREATIVE_AGENT_PROMPT, MAIN_AGENT_PROMPT, RESEARCH_AGENT_PROMPT, TECHNICAL_AGENT_PROMPT};

const fn prompt_for(kind: AgentKind) -> &'static str {
    match kind {
        AgentKind::Main => MAIN_AGENT_PROMPT,
        AgentKind::Research => RESEARCH_AGENT_PROMPT,
        AgentKind::Technical => TECHNICAL_AGENT_PROMPT,
        AgentKind::Creative => CREATIVE_AGENT_PROMPT,
    }
}

fn agent_config(config: &AssistantConfig, kind: AgentKind) -> AgentConfig {
    AgentConfig {
        name: kind.as_str().into(),
        system_prompt: prompt_for(kind).into(),
        max_iterations: config.max_iterations,
        generation: config.generation_for(kind),
        inject_tool_descriptions: true,
    }
}

/// Tool-less specialist agents
pub struct Specialists {
    research: Arc<Agent>,
    technical: Arc<Agent>,
    creative: Arc<Agent>,
}

impl Specialists {
    pub fn new(config: &AssistantConfig, provider: Arc<dyn LlmProvider>) -> Self {
        let tools = Arc::new(ToolRegistry::new());
        let build = |kind| {
            Arc::new(Agent::new(
                provider.clone(),
                tools.clone(),
                agent_config(config, kind),
            ))
        };

        Self {
            research: build(AgentKind::Research),
            technical: build(AgentKind::Technical),
            creative: build(AgentKind::Creative),
        }
    }

    /// Specialist for `kind`; `None` for the main agent
    pub const fn get(&self, kind: AgentKind) -> Option<&Arc<Agent>> {
        match kind {
            AgentKind::Main => None,
            AgentKind::Research => Some(&self.research),
            AgentKind::Technical => Some(&self.technical),
            AgentKind::Creative => Some(&self.creative),
        }
    }
}

/// Every agent a chatbot instance can hand a turn to
pub struct AgentPool {
    main: Agent,
    specialists: Arc<Specialists>,
}

impl AgentPool {
    pub fn new(
        config: &AssistantConfig,
        provider: Arc<dyn LlmProvider>,
        search: Arc<dyn SearchClient>,
    ) -> Self {
        let specialists = Arc::new(Specialists::new(config, provider.clone()));

        let mut tools = ToolRegistry::new();
        tools.register(CalculatorTool);
        tools.register(WebSearchTool::new(search, config.search_max_results));
        tools.register(DelegateTool::new(specialists.clone()));

        let main = Agent::new(
            provider,
            Arc::new(tools),
            agent_config(config, AgentKind::Main),
        );

        Self { main, specialists }
    }

    pub const fn main(&self) -> &Agent {
        &self.main
    }

    pub fn get(&self, kind: AgentKind) -> &Agent {
        self.specialists.get(kind).map_or(&self.main, |agent| agent.as_ref())
    }
}
