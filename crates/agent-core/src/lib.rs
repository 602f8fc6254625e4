//! # agent-core
//!
//! Core agent logic with provider-agnostic LLM abstraction, extensible tool
//! system and bounded conversation memory.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Agent                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  Reasoning  │  │    Tools    │  │   LlmProvider       │  │
//! │  │    Loop     │──│   Registry  │──│   (Strategy)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! │         │                                                    │
//! │  ┌─────────────┐                                             │
//! │  │MemoryBuffer │  rolling history, token-capped              │
//! │  └─────────────┘                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait enables swapping between Anthropic, Ollama,
//! or any other provider without changing agent logic.

pub mod calculator;
pub mod error;
pub mod memory;
pub mod message;
pub mod mock;
pub mod provider;
pub mod reasoning;
pub mod session;
pub mod tool;

pub use error::{AgentError, Result};
pub use memory::MemoryBuffer;
pub use message::{Message, Role};
pub use mock::MockProvider;
pub use provider::{Completion, GenerationOptions, LlmProvider, ModelInfo};
pub use reasoning::{Agent, AgentBuilder, AgentConfig};
pub use session::{Session, SessionId, SessionStore};
pub use tool::{CalculatorTool, ParameterSchema, Tool, ToolCall, ToolRegistry, ToolResult, ToolSchema};
