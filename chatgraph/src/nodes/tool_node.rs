//! Tool node: run the pending tool calls, append one result per call.
//!
//! Calls are dispatched concurrently and collected in call order. A failing call
//! is recorded as a tool-result message built from an error template; only a
//! transport failure (backend unreachable) fails the run.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::error::GraphError;
use crate::graph::{Node, RunContext};
use crate::message::Message;
use crate::state::{ConversationState, ToolCall};
use crate::tool_source::{ToolSource, ToolSourceError};

/// Node id of the tool node.
pub const TOOL_NODE_ID: &str = "tools";

/// Content of a tool-result message for a failed call.
pub const DEFAULT_EXECUTION_ERROR_TEMPLATE: &str =
    "Error executing tool '{tool_name}' with kwargs {tool_kwargs} with error:\n {error}\n Please fix the error and try again.";

/// Builds the tool-result content for a failed call from the error, tool name and arguments.
pub type ErrorHandlerFn =
    Arc<dyn Fn(&ToolSourceError, &str, &Value) -> String + Send + Sync + 'static>;

/// Truncates a string for logging, appending "..." if longer than max_len.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_len).collect::<String>())
    }
}

fn default_error_message(error: &ToolSourceError, tool_name: &str, tool_args: &Value) -> String {
    DEFAULT_EXECUTION_ERROR_TEMPLATE
        .replace("{tool_name}", tool_name)
        .replace("{tool_kwargs}", &tool_args.to_string())
        .replace("{error}", &error.to_string())
}

/// Executes the tool calls of the latest assistant message.
pub struct ToolNode {
    tools: Arc<dyn ToolSource>,
    error_handler: Option<ErrorHandlerFn>,
}

impl ToolNode {
    pub fn new(tools: Arc<dyn ToolSource>) -> Self {
        Self {
            tools,
            error_handler: None,
        }
    }

    /// Replaces the default error template.
    ///
    /// ```rust,ignore
    /// let node = ToolNode::new(tools)
    ///     .with_error_handler(Arc::new(|e, name, _args| format!("{} failed: {}", name, e)));
    /// ```
    pub fn with_error_handler(mut self, handler: ErrorHandlerFn) -> Self {
        self.error_handler = Some(handler);
        self
    }

    fn error_message(&self, error: &ToolSourceError, tool_name: &str, tool_args: &Value) -> String {
        match &self.error_handler {
            Some(handler) => handler(error, tool_name, tool_args),
            None => default_error_message(error, tool_name, tool_args),
        }
    }

    async fn call_one(&self, call: &ToolCall) -> Result<Message, GraphError> {
        debug!(tool = %call.name, id = %call.id, args = ?call.arguments, "calling tool");
        match self.tools.call_tool(&call.name, call.arguments.clone()).await {
            Ok(content) => {
                trace!(
                    tool = %call.name,
                    result_len = content.text.len(),
                    result_preview = %truncate_for_log(&content.text, 200),
                    "tool returned"
                );
                Ok(Message::tool_result(&call.id, &call.name, content.text))
            }
            Err(ToolSourceError::Transport(reason)) => {
                warn!(tool = %call.name, %reason, "tool backend unavailable");
                Err(GraphError::BackendUnavailable(format!(
                    "tool '{}': {}",
                    call.name, reason
                )))
            }
            Err(e) => {
                warn!(tool = %call.name, error = %e, "tool call failed");
                let text = self.error_message(&e, &call.name, &call.arguments);
                Ok(Message::tool_result(&call.id, &call.name, text))
            }
        }
    }
}

#[async_trait]
impl Node for ToolNode {
    fn id(&self) -> &str {
        TOOL_NODE_ID
    }

    async fn run(&self, state: &ConversationState, _ctx: &RunContext) -> Result<Vec<Message>, GraphError> {
        let calls = state.last().map(|m| m.tool_calls()).unwrap_or_default();
        join_all(calls.iter().map(|call| self.call_one(call)))
            .await
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Origin;
    use crate::tool_source::{ToolCallContent, ToolSpec};
    use serde_json::json;
    use std::time::Duration;

    /// Echoes the tool name after sleeping `delay_ms` from the arguments.
    struct SlowEcho;

    #[async_trait]
    impl ToolSource for SlowEcho {
        async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
            Ok(vec![])
        }

        async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolCallContent, ToolSourceError> {
            let ms = arguments["delay_ms"].as_u64().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(ms)).await;
            match name {
                "broken" => Err(ToolSourceError::Execution("boom".into())),
                "offline" => Err(ToolSourceError::Transport("connection refused".into())),
                _ => Ok(ToolCallContent {
                    text: format!("{} done", name),
                }),
            }
        }
    }

    fn state_with_calls(calls: Vec<ToolCall>) -> ConversationState {
        ConversationState::default().merge([
            Message::user("go"),
            Message::assistant_with_tool_calls("", calls),
        ])
    }

    /// **Scenario**: results come back in call order even when the first call is slowest.
    #[tokio::test]
    async fn results_in_call_order() {
        let node = ToolNode::new(Arc::new(SlowEcho));
        let state = state_with_calls(vec![
            ToolCall::new("c1", "first", json!({"delay_ms": 40})),
            ToolCall::new("c2", "second", json!({"delay_ms": 0})),
            ToolCall::new("c3", "third", json!({"delay_ms": 10})),
        ]);
        let out = node.run(&state, &RunContext::default()).await.unwrap();
        let ids: Vec<_> = out.iter().map(|m| m.tool_call_id().unwrap()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
        assert_eq!(out[0].content(), "first done");
        assert!(out.iter().all(|m| m.origin() == Origin::ToolResult));
    }

    /// **Scenario**: a failed call becomes an error result; the other call still succeeds.
    #[tokio::test]
    async fn failure_captured_inline() {
        let node = ToolNode::new(Arc::new(SlowEcho));
        let state = state_with_calls(vec![
            ToolCall::new("c1", "broken", json!({})),
            ToolCall::new("c2", "fine", json!({})),
        ]);
        let out = node.run(&state, &RunContext::default()).await.unwrap();
        assert_eq!(out.len(), 2);
        assert!(out[0].content().contains("Error executing tool 'broken'"));
        assert!(out[0].content().contains("boom"));
        assert_eq!(out[0].name(), Some("broken"));
        assert_eq!(out[1].content(), "fine done");
    }

    /// **Scenario**: a custom handler formats failure content.
    #[tokio::test]
    async fn custom_error_handler() {
        let node = ToolNode::new(Arc::new(SlowEcho))
            .with_error_handler(Arc::new(|e, name, _| format!("{} failed: {}", name, e)));
        let state = state_with_calls(vec![ToolCall::new("c1", "broken", json!({}))]);
        let out = node.run(&state, &RunContext::default()).await.unwrap();
        assert_eq!(out[0].content(), "broken failed: tool execution failed: boom");
    }

    /// **Scenario**: a transport failure fails the step as BackendUnavailable.
    #[tokio::test]
    async fn transport_failure_is_backend_unavailable() {
        let node = ToolNode::new(Arc::new(SlowEcho));
        let state = state_with_calls(vec![ToolCall::new("c1", "offline", json!({}))]);
        match node.run(&state, &RunContext::default()).await {
            Err(GraphError::BackendUnavailable(m)) => assert!(m.contains("offline")),
            other => panic!("expected BackendUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn truncate_for_log_appends_ellipsis() {
        assert_eq!(truncate_for_log("abc", 5), "abc");
        assert_eq!(truncate_for_log("abcdef", 3), "abc...");
    }
}
