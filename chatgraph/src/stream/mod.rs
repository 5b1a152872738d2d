//! Streaming types for graph runs.
//!
//! `ChatGraph::stream` emits these while the run progresses so a front end can
//! show "calling tool..." before the final answer arrives.

use crate::message::Message;
use crate::state::ConversationState;

/// Stream mode selector: which kinds of per-step events to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamMode {
    /// Emit the full state after each step is persisted.
    Values,
    /// Emit the messages each node produced, with the node id.
    Updates,
}

/// Event emitted while running a graph.
///
/// Every stream ends with exactly one `Completed` or `Failed`.
#[derive(Clone, Debug)]
pub enum StreamEvent {
    /// Full state snapshot after a step was persisted.
    Values(ConversationState),
    /// Messages produced by one node step.
    Updates {
        node_id: String,
        step: u64,
        messages: Vec<Message>,
    },
    /// The run reached DONE.
    Completed { reply: String },
    /// The run reached FAILED; the thread keeps its last checkpoint.
    Failed { error: String },
}

impl StreamEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed { .. } | StreamEvent::Failed { .. })
    }
}
