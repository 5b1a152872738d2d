//! Tavily web search tool (feature `tavily`).
//!
//! Posts the query to the Tavily search API and returns the top results as a JSON
//! array of `{title, url, content}` objects, which the reasoning node reads as
//! the tool result.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};

use super::Tool;

/// Tool name exposed to the LLM.
pub const TOOL_TAVILY_SEARCH: &str = "tavily_search_results_json";

const DEFAULT_ENDPOINT: &str = "https://api.tavily.com/search";
const DEFAULT_MAX_RESULTS: usize = 2;

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct SearchHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

/// Web search through the Tavily API.
///
/// Connection failures are `Transport` errors (backend unavailable); a non-success
/// HTTP status is an `Execution` error and ends up as a tool-result message.
pub struct TavilySearchTool {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    max_results: usize,
}

impl TavilySearchTool {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_key)
    }

    /// Custom client for timeouts, proxies, etc.
    pub fn with_client(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

fn format_hits(hits: &[SearchHit]) -> Result<String, ToolSourceError> {
    serde_json::to_string(hits).map_err(|e| ToolSourceError::Execution(e.to_string()))
}

#[async_trait]
impl Tool for TavilySearchTool {
    fn name(&self) -> &str {
        TOOL_TAVILY_SEARCH
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_TAVILY_SEARCH.to_string(),
            description: Some(
                "A search engine optimized for comprehensive, accurate, and trusted results. \
                 Useful for answering questions about current events. Input should be a search query."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "search query to look up" }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| ToolSourceError::InvalidInput("missing query".to_string()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&SearchRequest {
                query,
                max_results: self.max_results,
            })
            .send()
            .await
            .map_err(|e| ToolSourceError::Transport(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ToolSourceError::Execution(format!(
                "search failed with status: {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ToolSourceError::Execution(format!("failed to read response: {}", e)))?;

        let hits: Vec<SearchHit> = body.results.into_iter().take(self.max_results).collect();
        Ok(ToolCallContent {
            text: format_hits(&hits)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: spec name matches the tool name and requires `query`.
    #[test]
    fn spec_matches_name() {
        let tool = TavilySearchTool::new("key");
        let spec = tool.spec();
        assert_eq!(spec.name, tool.name());
        assert_eq!(spec.input_schema["required"][0], "query");
    }

    /// **Scenario**: missing query is InvalidInput without any network call.
    #[tokio::test]
    async fn missing_query_is_invalid_input() {
        let tool = TavilySearchTool::new("key").with_endpoint("http://127.0.0.1:9/none");
        match tool.call(json!({})).await {
            Err(ToolSourceError::InvalidInput(m)) => assert!(m.contains("query")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    /// **Scenario**: hits are rendered as a JSON array with title/url/content.
    #[test]
    fn format_hits_renders_json_array() {
        let hits = vec![SearchHit {
            title: "T".into(),
            url: "https://e.x".into(),
            content: "C".into(),
        }];
        let text = format_hits(&hits).unwrap();
        let v: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v[0]["url"], "https://e.x");
    }
}
