//! Tool backed by a synchronous closure.

use async_trait::async_trait;
use serde_json::Value;

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};

use super::Tool;

type ToolFn = dyn Fn(Value) -> Result<String, ToolSourceError> + Send + Sync;

/// Wraps a closure as a [`Tool`]. Handy for small local capabilities and tests.
pub struct FnTool {
    spec: ToolSpec,
    f: Box<ToolFn>,
}

impl FnTool {
    pub fn new<F>(spec: ToolSpec, f: F) -> Self
    where
        F: Fn(Value) -> Result<String, ToolSourceError> + Send + Sync + 'static,
    {
        Self { spec, f: Box::new(f) }
    }
}

#[async_trait]
impl Tool for FnTool {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn spec(&self) -> ToolSpec {
        self.spec.clone()
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        (self.f)(args).map(|text| ToolCallContent { text })
    }
}
