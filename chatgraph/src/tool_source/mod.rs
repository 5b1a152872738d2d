//! Tool source: what the tool node calls to list and execute tools.
//!
//! `ToolNode` holds an `Arc<dyn ToolSource>` and calls `call_tool(name, arguments)`
//! once per pending tool call. [`ToolRegistry`](crate::tools::ToolRegistry) is the
//! name-keyed implementation; [`MockToolSource`] returns a fixed result.

mod mock;

pub use mock::MockToolSource;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Tool description handed to the LLM (name, description, JSON schema of arguments).
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Value,
}

/// Text returned by a successful tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallContent {
    pub text: String,
}

/// Error from listing or calling a tool.
///
/// `Transport` means the tool's backend could not be reached and fails the run;
/// every other variant is recorded as a tool-result message.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("tool execution failed: {0}")]
    Execution(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Source of callable tools.
#[async_trait]
pub trait ToolSource: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError>;

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolCallContent, ToolSourceError>;
}
