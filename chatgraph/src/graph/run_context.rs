//! Per-run context passed into nodes.

use std::time::Duration;

/// Context of one user turn: which thread, which system instruction, which deadline.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub thread_id: String,
    /// System instruction for the reasoning node; not stored in the conversation.
    pub system_prompt: Option<String>,
    /// Deadline for each node invocation in this run; `None` means unbounded.
    pub node_timeout: Option<Duration>,
}
