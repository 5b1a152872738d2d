//! Router: the single conditional branch of the graph.

use crate::message::Message;

/// Where to go after the reasoning node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The latest message has pending tool calls.
    Tools,
    /// The latest message is a final answer.
    End,
}

/// Decides the next step from the latest message alone: `Tools` iff it carries
/// pending tool calls. The tool node always returns to reasoning, so this is the
/// only decision point.
pub fn route(latest: &Message) -> Route {
    if latest.has_tool_calls() {
        Route::Tools
    } else {
        Route::End
    }
}
