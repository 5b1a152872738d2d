//! LLM client abstraction for the reasoning node.
//!
//! `ReasoningNode` depends on a callable that returns assistant text and optional
//! tool calls; this module defines the trait, a scripted mock and (feature
//! `openai`) an OpenAI-compatible client.

mod mock;

/// Tool choice mode for chat completions: when tools are present, controls whether
/// the model may choose (auto), must not use (none), or must use (required).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ToolChoiceMode {
    /// Model can pick between message or tool calls. Default when tools are present.
    #[default]
    Auto,
    /// Model will not call any tool.
    None,
    /// Model must call one or more tools.
    Required,
}

impl std::str::FromStr for ToolChoiceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "none" => Ok(Self::None),
            "required" => Ok(Self::Required),
            _ => Err(format!(
                "unknown tool_choice: {} (use auto, none, or required)",
                s
            )),
        }
    }
}

#[cfg(feature = "openai")]
mod openai;

pub use mock::MockLlm;

#[cfg(feature = "openai")]
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::GraphError;
use crate::message::Message;
use crate::state::ToolCall;

/// Response from an LLM completion: assistant message text and optional tool calls.
///
/// A tool call with an empty `id` is given a generated id by `ReasoningNode`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LlmResponse {
    /// Assistant message content (plain text). Usually empty when tools are requested.
    pub content: String,
    /// Tool calls from this turn; empty means the model answered.
    pub tool_calls: Vec<ToolCall>,
}

impl LlmResponse {
    /// Final answer, no tool calls.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    /// Tool-call-only turn (empty content).
    pub fn with_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: String::new(),
            tool_calls,
        }
    }
}

/// LLM client: given the conversation and an optional system instruction, returns
/// assistant text and optional tool calls.
///
/// Unreachable backends should return `GraphError::BackendUnavailable` so the run
/// fails with the thread left at its last checkpoint.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn invoke(
        &self,
        messages: &[Message],
        system_prompt: Option<&str>,
    ) -> Result<LlmResponse, GraphError>;
}
