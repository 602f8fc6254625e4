//! Service Kit - Agent Tools
//!
//! Tools the main agent can call besides the calculator from `agent_core`.

mod delegate;
mod web_search;

pub use delegate::DelegateTool;
pub use web_search::WebSearchTool;
