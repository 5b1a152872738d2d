//! Mock ToolSource for tests and offline runs.
//!
//! Returns a fixed tool list and a fixed call result; no network required.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};

/// Mock tool source: fixed tool list and fixed call result.
///
/// `call_tool` returns `call_result` for any listed tool and `NotFound` for
/// names that are not listed.
pub struct MockToolSource {
    tools: Vec<ToolSpec>,
    call_result: String,
    delay: Option<Duration>,
}

impl MockToolSource {
    /// One tool named `search` that returns a canned snippet.
    pub fn search_example() -> Self {
        Self {
            tools: vec![ToolSpec {
                name: "search".to_string(),
                description: Some("Search the web for current information.".to_string()),
                input_schema: json!({
                    "type": "object",
                    "properties": { "query": { "type": "string" } },
                    "required": ["query"]
                }),
            }],
            call_result: "No results.".to_string(),
            delay: None,
        }
    }

    pub fn new(tools: Vec<ToolSpec>, call_result: String) -> Self {
        Self {
            tools,
            call_result,
            delay: None,
        }
    }

    /// Set the text returned by call_tool (builder style).
    pub fn with_call_result(mut self, text: impl Into<String>) -> Self {
        self.call_result = text.into();
        self
    }

    /// Sleeps for `delay` before each call returns.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl Default for MockToolSource {
    fn default() -> Self {
        Self::search_example()
    }
}

#[async_trait]
impl ToolSource for MockToolSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(self.tools.clone())
    }

    async fn call_tool(&self, name: &str, _arguments: Value) -> Result<ToolCallContent, ToolSourceError> {
        if !self.tools.iter().any(|t| t.name == name) {
            return Err(ToolSourceError::NotFound(name.to_string()));
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(ToolCallContent {
            text: self.call_result.clone(),
        })
    }
}
