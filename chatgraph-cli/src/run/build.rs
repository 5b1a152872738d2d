//! Builds the runner: model, tools, history store and limits from [`RunConfig`].

use std::sync::Arc;

use chatgraph::{
    ChatGraphBuilder, ChatRunner, Checkpointer, ConversationState, LlmClient, LlmResponse,
    MemorySaver, Message, MockLlm, MockToolSource, Origin, ToolCall, ToolRegistry, ToolSource,
    DEFAULT_SYSTEM_PROMPT,
};

use crate::config::{Error, RunConfig};

/// Scripted model for `--mock`: searches when asked to, otherwise echoes.
pub fn offline_llm() -> MockLlm {
    MockLlm::from_fn(|messages: &[Message], _system: Option<&str>| {
        let Some(last) = messages.last() else {
            return LlmResponse::text("Hello!");
        };
        match last.origin() {
            Origin::ToolResult => LlmResponse::text(format!("Search says: {}", last.content())),
            _ => match last.content().strip_prefix("search ") {
                Some(query) => LlmResponse::with_tool_calls(vec![ToolCall::new(
                    "",
                    "search",
                    serde_json::json!({ "query": query }),
                )]),
                None => LlmResponse::text(format!("(offline) you said: {}", last.content())),
            },
        }
    })
}

fn build_tools(config: &RunConfig) -> Arc<dyn ToolSource> {
    if config.mock {
        return Arc::new(MockToolSource::search_example().with_call_result(
            r#"[{"title":"offline","url":"about:blank","content":"no network in mock mode"}]"#,
        ));
    }
    let mut registry = ToolRegistry::new();
    register_search(&mut registry, config);
    Arc::new(registry)
}

#[cfg(feature = "tavily")]
fn register_search(registry: &mut ToolRegistry, config: &RunConfig) {
    match &config.tavily_api_key {
        Some(key) => {
            registry.register(Arc::new(chatgraph::TavilySearchTool::new(key.clone())));
        }
        None => tracing::warn!("TAVILY_API_KEY is not set; the model has no search tool"),
    }
}

#[cfg(not(feature = "tavily"))]
fn register_search(_registry: &mut ToolRegistry, _config: &RunConfig) {}

#[cfg(feature = "openai")]
async fn build_llm(config: &RunConfig, tools: &dyn ToolSource) -> Result<Arc<dyn LlmClient>, Error> {
    use async_openai::config::OpenAIConfig;
    use chatgraph::ChatOpenAI;

    if config.mock {
        return Ok(Arc::new(offline_llm()));
    }
    let api_key = config
        .api_key
        .as_deref()
        .ok_or("OPENAI_API_KEY is not set; configure it in .env or pass --mock")?;
    let mut openai = OpenAIConfig::new().with_api_key(api_key);
    if let Some(base) = &config.api_base {
        openai = openai.with_api_base(base);
    }
    let mut llm = ChatOpenAI::with_config(openai, &config.model).with_tools(tools.list_tools().await?);
    if let Some(t) = config.temperature {
        llm = llm.with_temperature(t);
    }
    if let Some(mode) = config.tool_choice {
        llm = llm.with_tool_choice(mode);
    }
    Ok(Arc::new(llm))
}

#[cfg(not(feature = "openai"))]
async fn build_llm(config: &RunConfig, _tools: &dyn ToolSource) -> Result<Arc<dyn LlmClient>, Error> {
    if config.mock {
        return Ok(Arc::new(offline_llm()));
    }
    Err("built without the `openai` feature; run with --mock".into())
}

fn build_checkpointer(config: &RunConfig) -> Result<Arc<dyn Checkpointer<ConversationState>>, Error> {
    match &config.db_path {
        #[cfg(feature = "sqlite")]
        Some(path) => {
            let saver = chatgraph::SqliteSaver::new(path, Arc::new(chatgraph::JsonSerializer))?;
            Ok(Arc::new(saver))
        }
        #[cfg(not(feature = "sqlite"))]
        Some(path) => {
            tracing::warn!(%path, "built without `sqlite`; history kept in memory");
            Ok(Arc::new(MemorySaver::<ConversationState>::new()))
        }
        None => Ok(Arc::new(MemorySaver::<ConversationState>::new())),
    }
}

/// Builds the runner described by `config`.
///
/// Fails when no model backend is available (missing key, or built without
/// `openai` and not in mock mode) or the history file cannot be opened.
pub async fn build_runner(config: &RunConfig) -> Result<ChatRunner, Error> {
    let tools = build_tools(config);
    let llm = build_llm(config, tools.as_ref()).await?;
    let graph = ChatGraphBuilder::new()
        .with_llm(llm)
        .with_tool_source(tools)
        .with_checkpointer(build_checkpointer(config)?)
        .with_config(config.executor_config())
        .build()?;
    let prompt = config
        .system_prompt
        .clone()
        .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());
    Ok(ChatRunner::new(graph).with_default_system_prompt(prompt))
}
