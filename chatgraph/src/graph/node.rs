//! Node trait: one unit of execution in the conversation graph.

use async_trait::async_trait;

use crate::error::GraphError;
use crate::message::Message;
use crate::state::ConversationState;

use super::RunContext;

/// One step of the graph: reads the current state, returns the messages to merge.
///
/// A node never mutates the state it is given; the executor appends the returned
/// messages and persists the result. Implemented by `ReasoningNode` and `ToolNode`;
/// tests plug in their own nodes through `ChatGraphBuilder`.
#[async_trait]
pub trait Node: Send + Sync {
    /// Node id used in logs, stream events and timeout errors.
    fn id(&self) -> &str;

    async fn run(&self, state: &ConversationState, ctx: &RunContext) -> Result<Vec<Message>, GraphError>;
}
