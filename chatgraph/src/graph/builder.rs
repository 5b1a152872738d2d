//! Builder for [`ChatGraph`].

use std::sync::Arc;

use crate::llm::LlmClient;
use crate::memory::{Checkpointer, MemorySaver};
use crate::nodes::{ReasoningNode, ToolNode};
use crate::state::ConversationState;
use crate::tool_source::ToolSource;

use super::{BuildError, ChatGraph, ExecutorConfig, Node};

/// Assembles the reasoning node, tool node, checkpointer and limits.
///
/// `with_llm` / `with_tool_source` wrap the collaborators in the stock nodes;
/// `with_reasoning_node` / `with_tool_node` plug in custom ones. Without a
/// checkpointer the graph gets a fresh in-memory `MemorySaver`.
///
/// ```rust,ignore
/// let graph = ChatGraphBuilder::new()
///     .with_llm(Arc::new(MockLlm::with_no_tool_calls("4")))
///     .with_tool_source(Arc::new(MockToolSource::search_example()))
///     .build()?;
/// ```
#[derive(Default)]
pub struct ChatGraphBuilder {
    reasoning: Option<Arc<dyn Node>>,
    tools: Option<Arc<dyn Node>>,
    checkpointer: Option<Arc<dyn Checkpointer<ConversationState>>>,
    config: ExecutorConfig,
}

impl ChatGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_llm(self, llm: Arc<dyn LlmClient>) -> Self {
        self.with_reasoning_node(Arc::new(ReasoningNode::new(llm)))
    }

    pub fn with_tool_source(self, tools: Arc<dyn ToolSource>) -> Self {
        self.with_tool_node(Arc::new(ToolNode::new(tools)))
    }

    pub fn with_reasoning_node(mut self, node: Arc<dyn Node>) -> Self {
        self.reasoning = Some(node);
        self
    }

    pub fn with_tool_node(mut self, node: Arc<dyn Node>) -> Self {
        self.tools = Some(node);
        self
    }

    pub fn with_checkpointer(mut self, checkpointer: Arc<dyn Checkpointer<ConversationState>>) -> Self {
        self.checkpointer = Some(checkpointer);
        self
    }

    pub fn with_config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<ChatGraph, BuildError> {
        let reasoning = self.reasoning.ok_or(BuildError::MissingReasoningNode)?;
        let tools = self.tools.ok_or(BuildError::MissingToolNode)?;
        let checkpointer = self
            .checkpointer
            .unwrap_or_else(|| Arc::new(MemorySaver::<ConversationState>::new()));
        Ok(ChatGraph {
            reasoning,
            tools,
            checkpointer,
            config: self.config,
        })
    }
}
