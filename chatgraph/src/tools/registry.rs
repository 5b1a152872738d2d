//! Name-keyed tool registry implementing `ToolSource`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::tool_source::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};

use super::Tool;

/// Registry of tools by name. `call_tool` on an unknown name returns `NotFound`.
///
/// Tools are listed in name order so the spec handed to the LLM is stable.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool under its name, replacing any tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> &mut Self {
        self.tools.insert(tool.name().to_string(), tool);
        self
    }

    /// Builder-style `register`.
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[async_trait]
impl ToolSource for ToolRegistry {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(self.tools.values().map(|t| t.spec()).collect())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolCallContent, ToolSourceError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolSourceError::NotFound(name.to_string()))?;
        tool.call(arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::FnTool;
    use serde_json::json;

    fn echo_tool(name: &str) -> Arc<dyn Tool> {
        Arc::new(FnTool::new(
            ToolSpec {
                name: name.to_string(),
                description: None,
                input_schema: json!({"type": "object"}),
            },
            |args| Ok(args.to_string()),
        ))
    }

    /// **Scenario**: registered tools are listed by name and dispatched by name.
    #[tokio::test]
    async fn registry_lists_and_dispatches() {
        let reg = ToolRegistry::new()
            .with_tool(echo_tool("b_tool"))
            .with_tool(echo_tool("a_tool"));
        let names: Vec<String> = reg
            .list_tools()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["a_tool", "b_tool"]);
        let r = reg.call_tool("a_tool", json!({"x": 1})).await.unwrap();
        assert_eq!(r.text, "{\"x\":1}");
    }

    /// **Scenario**: unknown tool name returns NotFound.
    #[tokio::test]
    async fn registry_unknown_tool_not_found() {
        let reg = ToolRegistry::new();
        assert!(reg.is_empty());
        match reg.call_tool("missing", json!({})).await {
            Err(ToolSourceError::NotFound(n)) => assert_eq!(n, "missing"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
