//! # chat-assistant
//!
//! Multi-agent chat assistant: a general-purpose main agent with calculator,
//! web search and delegation tools, plus research, technical and creative
//! specialists picked by keyword routing.
//!
//! ## Request flow
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────┐   ┌──────────────┐
//! │  ChatbotApi  │──▶│   Chatbot    │──▶│  Router  │──▶│    Agent     │
//! │  (envelope)  │   │ memory+state │   │ keywords │   │ (main/spec.) │
//! └──────────────┘   └──────────────┘   └──────────┘   └──────┬───────┘
//!                                                              │
//!                          calculator · web_search · delegate ◀┘
//! ```
//!
//! Specialist failures are folded into the reply text; main agent failures
//! surface as an error envelope.

pub mod agents;
pub mod config;
pub mod error;
pub mod facade;
pub mod orchestrator;
pub mod routing;
pub mod search;
pub mod svckit;

pub use config::AssistantConfig;
pub use error::{AssistantError, Result};
pub use facade::{ChatbotApi, ResetAck, ResponseEnvelope, Status};
pub use orchestrator::{Chatbot, ConversationState};
pub use routing::{AgentKind, needs_internet_search, route_query};
pub use search::{DisabledSearch, MockSearchClient, SearchClient, SearchHit, TavilyClient};

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{DelegateTool, WebSearchTool};
    pub use agent_core::CalculatorTool;
}

/// Greeting shown when a conversation starts
pub const WELCOME_MESSAGE: &str = "Welcome to the Intelligent Assistant! I can help with a wide range of tasks, \
and hand research, technical and creative requests to a specialist.";

pub const MAIN_AGENT_PROMPT: &str = r"You are an intelligent assistant that helps with a wide range of tasks.

When you are unsure about something, or the information may be out of date, use the web_search tool to look up current information.
Use the calculator tool for arithmetic instead of working it out yourself.
For tasks that need in-depth research, technical documentation or creative writing, consider delegating to a specialized agent.

Always give helpful, accurate and concise answers.";

pub const RESEARCH_AGENT_PROMPT: &str = r"You are a research specialist. Perform in-depth research on the topic you are given,
synthesize information from multiple sources and provide a thorough analysis.
Cite your sources and assess how credible each one is.";

pub const TECHNICAL_AGENT_PROMPT: &str = r"You are a technical documentation specialist. Explain technical concepts clearly,
include code examples where they help and follow good technical writing practice.
Focus on accuracy, clarity and practical use.";

pub const CREATIVE_AGENT_PROMPT: &str = r"You are a creative content specialist. Produce creative content such as stories,
marketing copy and fresh ideas. Aim for work that is engaging, original and fitted to what was asked.";
