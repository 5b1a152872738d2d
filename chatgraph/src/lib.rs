//! # chatgraph
//!
//! A conversational execution graph: each user turn flows through a reasoning
//! node (a language model) that may request tools, a tool node that runs them, and
//! back, until the model answers. Conversation state is append-only and is
//! checkpointed per thread after every step, so a thread can be resumed, shown as
//! a transcript, or reset.
//!
//! ## Main Modules
//!
//! - [`runner`]: `ChatRunner`: `handle_turn`, `get_transcript`, `reset`, `reset_all`.
//! - [`graph`]: `ChatGraph` executor, `ChatGraphBuilder`, router, `Node` trait, limits.
//! - [`nodes`]: `ReasoningNode` and `ToolNode`.
//! - [`llm`]: `LlmClient` trait, `MockLlm`, and `ChatOpenAI` behind `openai`.
//! - [`tool_source`] / [`tools`]: tool specs, `ToolRegistry`, Tavily search behind `tavily`.
//! - [`memory`]: `Checkpointer` trait, `MemorySaver`, `SqliteSaver` behind `sqlite`.
//! - [`transcript`]: projection of state into `user-message` / `bot-message` entries.
//!
//! ## Features
//!
//! - `sqlite` (default): file-backed checkpointer.
//! - `openai`: OpenAI-compatible chat via `async-openai`.
//! - `tavily`: Tavily web search tool via `reqwest`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chatgraph::{ChatGraphBuilder, ChatRunner, MockLlm, MockToolSource};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = ChatGraphBuilder::new()
//!     .with_llm(Arc::new(MockLlm::with_no_tool_calls("4")))
//!     .with_tool_source(Arc::new(MockToolSource::search_example()))
//!     .build()?;
//! let runner = ChatRunner::new(graph);
//! let reply = runner.handle_turn("1", "2+2?", None).await?;
//! assert_eq!(reply, "4");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod graph;
pub mod llm;
pub mod memory;
pub mod message;
pub mod nodes;
pub mod runner;
pub mod state;
pub mod stream;
pub mod tool_source;
pub mod tools;
pub mod transcript;

pub use error::GraphError;
pub use graph::{
    BuildError, ChatGraph, ChatGraphBuilder, ExecutorConfig, Node, Route, RunContext, RunOptions,
    RunOutcome, ABORTED_TOOL_RESULT, DEFAULT_MAX_ROUND_TRIPS,
};
#[cfg(feature = "openai")]
pub use llm::ChatOpenAI;
pub use llm::{LlmClient, LlmResponse, MockLlm, ToolChoiceMode};
pub use memory::{
    Checkpoint, CheckpointError, CheckpointMetadata, CheckpointSource, Checkpointer,
    JsonSerializer, MemorySaver,
};
#[cfg(feature = "sqlite")]
pub use memory::SqliteSaver;
pub use message::{Message, Origin};
pub use nodes::{ReasoningNode, ToolNode, DEFAULT_SYSTEM_PROMPT};
pub use runner::ChatRunner;
pub use state::{ConversationState, ToolCall};
pub use stream::{StreamEvent, StreamMode};
pub use tool_source::{MockToolSource, ToolCallContent, ToolSource, ToolSourceError, ToolSpec};
#[cfg(feature = "tavily")]
pub use tools::TavilySearchTool;
pub use tools::{FnTool, Tool, ToolRegistry};
pub use transcript::{project, MessageClass, TranscriptEntry};
