//! Graph execution error types.
//!
//! Returned by `ChatGraph::invoke` and `ChatRunner::handle_turn`. Tool failures
//! are not represented here: the tool node records them inline as tool-result
//! messages so the reasoning node can react to them.

use std::time::Duration;

use thiserror::Error;

use crate::memory::CheckpointError;

/// Error surfaced to the caller of a run.
///
/// Except for `Validation` (rejected before any state is touched), every variant
/// leaves the thread resumable from its last persisted checkpoint.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Malformed or missing input (empty thread id, blank user text).
    #[error("invalid input: {0}")]
    Validation(String),

    /// Reasoning or tool backend could not be reached.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The reasoning node kept requesting tools past the configured bound.
    #[error("tool loop exceeded: more than {max_round_trips} tool round trips in one turn")]
    LoopExceeded { max_round_trips: usize },

    /// A node did not finish before its deadline.
    #[error("node '{node}' timed out after {after:?}")]
    Timeout { node: String, after: Duration },

    /// Loading or saving a checkpoint failed.
    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),

    /// Any other node failure (e.g. a malformed backend response).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
