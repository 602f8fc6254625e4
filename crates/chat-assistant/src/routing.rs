//! Query Routing
//!
//! Keyword rules that pick an agent for a query and flag queries that
//! probably need live information. Matching is case-insensitive and works on
//! substrings, so "searching" counts as "search".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Agent identifiers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    #[default]
    Main,
    Research,
    Technical,
    Creative,
}

impl AgentKind {
    pub const ALL: [Self; 4] = [Self::Main, Self::Research, Self::Technical, Self::Creative];
    pub const SPECIALISTS: [Self; 3] = [Self::Research, Self::Technical, Self::Creative];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Research => "research",
            Self::Technical => "technical",
            Self::Creative => "creative",
        }
    }

    /// Human-facing name shown next to a reply
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Main => "Main Assistant",
            Self::Research => "Research Specialist",
            Self::Technical => "Technical Documentation Specialist",
            Self::Creative => "Creative Content Specialist",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Main => "General-purpose questions and tasks",
            Self::Research => "In-depth research and information synthesis",
            Self::Technical => "Technical explanations and documentation",
            Self::Creative => "Creative writing and content generation",
        }
    }

    pub const fn is_specialist(self) -> bool {
        !matches!(self, Self::Main)
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown agent name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAgent(pub String);

impl fmt::Display for UnknownAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown agent type '{}'", self.0)
    }
}

impl std::error::Error for UnknownAgent {}

impl FromStr for AgentKind {
    type Err = UnknownAgent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" => Ok(Self::Main),
            "research" => Ok(Self::Research),
            "technical" => Ok(Self::Technical),
            "creative" => Ok(Self::Creative),
            _ => Err(UnknownAgent(s.to_string())),
        }
    }
}

const RESEARCH_KEYWORDS: &[&str] = &["research", "analyze", "investigate", "find", "search"];
const TECHNICAL_KEYWORDS: &[&str] = &["code", "program", "function", "technical", "explain"];
const CREATIVE_KEYWORDS: &[&str] = &["create", "write", "imagine", "story", "creative"];

const CURRENT_INFO_KEYWORDS: &[&str] = &[
    "latest", "recent", "current", "today", "news",
    "update", "happening", "now", "weather", "forecast",
    "price", "stock", "market", "event", "release",
];
const QUESTION_INDICATORS: &[&str] = &["what is", "who is", "when is", "where is", "how to", "why is"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Pick the agent for a query; research, then technical, then creative win in that order
pub fn route_query(query: &str) -> AgentKind {
    let query = query.to_lowercase();

    if contains_any(&query, RESEARCH_KEYWORDS) {
        AgentKind::Research
    } else if contains_any(&query, TECHNICAL_KEYWORDS) {
        AgentKind::Technical
    } else if contains_any(&query, CREATIVE_KEYWORDS) {
        AgentKind::Creative
    } else {
        AgentKind::Main
    }
}

/// Whether a query likely needs live information. Advisory only.
pub fn needs_internet_search(query: &str) -> bool {
    let query = query.to_lowercase();
    contains_any(&query, CURRENT_INFO_KEYWORDS) || contains_any(&query, QUESTION_INDICATORS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_keyword_set_routes() {
        assert_eq!(route_query("Please investigate the outage"), AgentKind::Research);
        assert_eq!(route_query("Explain how TCP works"), AgentKind::Technical);
        assert_eq!(route_query("Write a short story about a robot"), AgentKind::Creative);
        assert_eq!(route_query("Hello there"), AgentKind::Main);
    }

    #[test]
    fn test_research_wins_ties() {
        assert_eq!(route_query("Research this code"), AgentKind::Research);
        assert_eq!(route_query("search for a story"), AgentKind::Research);
        assert_eq!(route_query("explain how to write a function"), AgentKind::Technical);
    }

    #[test]
    fn test_routing_is_case_insensitive() {
        assert_eq!(route_query("ANALYZE THIS"), AgentKind::Research);
        assert_eq!(route_query("Imagine A World"), AgentKind::Creative);
    }

    #[test]
    fn test_unmatched_queries_go_to_main() {
        assert_eq!(route_query("What's the latest news about climate change?"), AgentKind::Main);
        assert_eq!(route_query("Calculate 235 * 18.7"), AgentKind::Main);
        assert_eq!(route_query(""), AgentKind::Main);
    }

    #[test]
    fn test_search_need_detection() {
        assert!(needs_internet_search("LATEST news"));
        assert!(needs_internet_search("latest news"));
        assert!(needs_internet_search("What is the capital of Peru?"));
        assert!(needs_internet_search("how to bake bread"));
        assert!(needs_internet_search("What's the weather like in New York today?"));
        assert!(!needs_internet_search("Write a short story about a robot"));
        assert!(!needs_internet_search("Calculate 235 * 18.7"));
    }

    #[test]
    fn test_agent_kind_parsing_and_names() {
        assert_eq!("Creative".parse::<AgentKind>(), Ok(AgentKind::Creative));
        assert_eq!(" research ".parse::<AgentKind>(), Ok(AgentKind::Research));
        assert!("poet".parse::<AgentKind>().is_err());
        assert_eq!(AgentKind::default(), AgentKind::Main);
        assert_eq!(AgentKind::Technical.to_string(), "technical");
        assert_eq!(AgentKind::Creative.display_name(), "Creative Content Specialist");
        assert!(AgentKind::SPECIALISTS.iter().all(|k| k.is_specialist()));
        assert_eq!(serde_json::to_string(&AgentKind::Main).unwrap(), "\"main\"");
    }
}
