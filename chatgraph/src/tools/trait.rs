//! A single named tool.

use async_trait::async_trait;
use serde_json::Value;

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};

/// One callable tool. Registered in a [`ToolRegistry`](super::ToolRegistry) under `name()`.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    /// Spec handed to the LLM; `spec().name` must equal `name()`.
    fn spec(&self) -> ToolSpec;

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError>;
}
