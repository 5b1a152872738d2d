//! Logging helpers for graph execution.
//!
//! Structured `tracing` events for run start/finish, node steps, checkpoint
//! writes and routing decisions. Fields: `thread_id`, `node`, `step`.

use crate::error::GraphError;

use super::Route;

pub fn log_run_start(thread_id: &str, history_len: usize) {
    tracing::info!(thread_id, history_len, "starting graph run");
}

pub fn log_unanswered_calls(thread_id: &str, count: usize) {
    tracing::warn!(thread_id, count, "closing tool calls left unanswered by an aborted run");
}

pub fn log_run_complete(thread_id: &str, steps: u64, round_trips: usize) {
    tracing::info!(thread_id, steps, round_trips, "graph run complete");
}

pub fn log_run_error(thread_id: &str, error: &GraphError) {
    tracing::error!(thread_id, %error, "graph run failed");
}

pub fn log_node_start(thread_id: &str, node: &str, step: u64) {
    tracing::debug!(thread_id, node, step, "starting node");
}

pub fn log_node_complete(thread_id: &str, node: &str, step: u64, produced: usize) {
    tracing::debug!(thread_id, node, step, produced, "node complete");
}

pub fn log_checkpoint_saved(thread_id: &str, step: u64, messages: usize) {
    tracing::debug!(thread_id, step, messages, "checkpoint saved");
}

pub fn log_route(thread_id: &str, route: Route, round_trips: usize) {
    tracing::debug!(thread_id, ?route, round_trips, "routed");
}
