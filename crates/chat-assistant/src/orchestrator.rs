//! Conversation Orchestrator
//!
//! Owns the memory and state of one conversation and decides which agent
//! answers each query.

use std::sync::Arc;

use agent_core::{LlmProvider, MemoryBuffer};
use serde::{Deserialize, Serialize};

use crate::agents::AgentPool;
use crate::config::AssistantConfig;
use crate::error::Result;
use crate::routing::{AgentKind, needs_internet_search, route_query};
use crate::search::SearchClient;

/// Per-conversation routing state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    /// Advisory flag from the most recent query
    pub needs_internet_search: bool,

    /// Most recent query text
    pub last_topic: Option<String>,

    /// Agent currently handling a turn; back to main once a delegated turn ends
    pub current_agent: AgentKind,

    /// Agent that produced the most recent reply
    pub last_responder: AgentKind,
}

/// One conversation: memory, state and the agents that serve it
pub struct Chatbot {
    memory: MemoryBuffer,
    agents: AgentPool,
    state: ConversationState,
}

impl Chatbot {
    pub fn new(
        config: &AssistantConfig,
        provider: Arc<dyn LlmProvider>,
        search: Arc<dyn SearchClient>,
    ) -> Self {
        Self {
            memory: MemoryBuffer::new(config.memory_token_limit),
            agents: AgentPool::new(config, provider, search),
            state: ConversationState::default(),
        }
    }

    /// Answer one query.
    ///
    /// Specialist failures come back as reply text; main agent failures are
    /// returned as errors.
    pub async fn process(&mut self, query: &str) -> Result<String> {
        tracing::info!(query, "Processing query");

        self.state.needs_internet_search = needs_internet_search(query);
        self.state.last_topic = Some(query.to_string());

        let kind = route_query(query);
        tracing::debug!(
            agent = %kind,
            needs_internet_search = self.state.needs_internet_search,
            "Routed query"
        );

        if kind.is_specialist() {
            return Ok(self.delegate(kind, query).await);
        }

        self.state.current_agent = AgentKind::Main;
        self.state.last_responder = AgentKind::Main;

        let reply = self.agents.main().run(&mut self.memory, query).await?;
        tracing::debug!(chars = reply.len(), "Main agent replied");
        Ok(reply)
    }

    async fn delegate(&mut self, kind: AgentKind, query: &str) -> String {
        tracing::info!(agent = %kind, "Delegating to specialist");
        self.state.current_agent = kind;
        self.state.last_responder = kind;

        let reply = match self.agents.get(kind).run(&mut self.memory, query).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(agent = %kind, error = %e, "Specialist agent failed");
                format!("The {kind} agent encountered an error: {e}")
            }
        };

        self.state.current_agent = AgentKind::Main;
        reply
    }

    pub const fn state(&self) -> &ConversationState {
        &self.state
    }

    pub const fn memory(&self) -> &MemoryBuffer {
        &self.memory
    }
}
