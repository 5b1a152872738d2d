//! Reasoning node: conversation in, one assistant message out.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::GraphError;
use crate::graph::{Node, RunContext};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::{ConversationState, ToolCall};

/// Node id of the reasoning node.
pub const REASONING_NODE_ID: &str = "reasoning";

/// Calls the LLM with the whole conversation and the run's system prompt.
///
/// Produces exactly one assistant message. When the model requests tools the
/// message carries the tool calls and empty content; tool calls without an id get
/// a generated `call_<uuid>` id so results can be correlated.
pub struct ReasoningNode {
    llm: Arc<dyn LlmClient>,
}

impl ReasoningNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

fn ensure_call_id(mut call: ToolCall) -> ToolCall {
    if call.id.trim().is_empty() {
        call.id = format!("call_{}", uuid::Uuid::new_v4().simple());
    }
    call
}

#[async_trait]
impl Node for ReasoningNode {
    fn id(&self) -> &str {
        REASONING_NODE_ID
    }

    async fn run(&self, state: &ConversationState, ctx: &RunContext) -> Result<Vec<Message>, GraphError> {
        let response = self
            .llm
            .invoke(&state.messages, ctx.system_prompt.as_deref())
            .await?;

        if response.tool_calls.is_empty() {
            debug!(thread_id = %ctx.thread_id, len = response.content.len(), "model answered");
            return Ok(vec![Message::assistant(response.content)]);
        }

        let calls: Vec<ToolCall> = response.tool_calls.into_iter().map(ensure_call_id).collect();
        debug!(
            thread_id = %ctx.thread_id,
            tools = ?calls.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            "model requested tools"
        );
        Ok(vec![Message::assistant_with_tool_calls("", calls)])
    }
}
