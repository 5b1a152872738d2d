//! Shared setup: a scripted model that answers arithmetic and searches on request.

use std::sync::Arc;

use chatgraph::{
    ChatGraphBuilder, ChatRunner, Checkpointer, ConversationState, ExecutorConfig, LlmResponse,
    MemorySaver, Message, MockLlm, MockToolSource, Origin, ToolCall,
};
use serde_json::json;

pub const SEARCH_RESULT: &str = r#"[{"title":"X","url":"https://x.example","content":"X is a letter."}]"#;

/// Answers "2+2" with 4; asks the `search` tool when the user says "search ...";
/// summarizes the tool result once it arrives.
pub fn scripted_llm() -> MockLlm {
    MockLlm::from_fn(|messages: &[Message], _system: Option<&str>| {
        let last = match messages.last() {
            Some(m) => m,
            None => return LlmResponse::text("Hello!"),
        };
        match last.origin() {
            Origin::ToolResult => LlmResponse::text(format!("From the web: {}", last.content())),
            _ if last.content().starts_with("search ") => {
                let query = last.content().trim_start_matches("search ").to_string();
                LlmResponse::with_tool_calls(vec![ToolCall::new("", "search", json!({ "query": query }))])
            }
            _ if last.content().contains("2+2") => LlmResponse::text("2+2 = 4"),
            _ => LlmResponse::text(format!("You said: {}", last.content())),
        }
    })
}

pub fn runner_with(llm: MockLlm, checkpointer: Arc<dyn Checkpointer<ConversationState>>) -> ChatRunner {
    let graph = ChatGraphBuilder::new()
        .with_llm(Arc::new(llm))
        .with_tool_source(Arc::new(
            MockToolSource::search_example().with_call_result(SEARCH_RESULT),
        ))
        .with_checkpointer(checkpointer)
        .with_config(ExecutorConfig::default())
        .build()
        .expect("graph builds");
    ChatRunner::new(graph)
}

pub fn runner() -> ChatRunner {
    runner_with(scripted_llm(), Arc::new(MemorySaver::<ConversationState>::new()))
}
