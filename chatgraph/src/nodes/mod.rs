//! The two nodes of the conversation graph.
//!
//! - [`ReasoningNode`]: calls the language model and appends one assistant message.
//! - [`ToolNode`]: runs the pending tool calls and appends one result per call.

mod reasoning_node;
mod tool_node;

pub use reasoning_node::{ReasoningNode, REASONING_NODE_ID};
pub use tool_node::{
    ErrorHandlerFn, ToolNode, DEFAULT_EXECUTION_ERROR_TEMPLATE, TOOL_NODE_ID,
};

/// System instruction used when the caller does not supply one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant. \
Answer from your own knowledge when you can. \
Use the search tool only when the question needs current or external information, \
and summarize what the tool returned in your answer.";
