//! Chat runner: the external interface of the crate.
//!
//! Wraps a [`ChatGraph`] with input validation, a default system prompt and the
//! thread-level operations a front end needs: handle a turn, show the transcript,
//! start over.

use tokio_stream::wrappers::ReceiverStream;
use tracing::info;

use crate::error::GraphError;
use crate::graph::{ChatGraph, RunContext, RunOptions, RunOutcome};
use crate::memory::Checkpointer;
use crate::message::Message;
use crate::state::ConversationState;
use crate::stream::{StreamEvent, StreamMode};
use crate::transcript::{project, TranscriptEntry};

/// Runs user turns against per-thread checkpoints.
///
/// Callers must not issue overlapping turns for the same thread id; turns on
/// different threads may run concurrently.
#[derive(Clone)]
pub struct ChatRunner {
    graph: ChatGraph,
    default_system_prompt: Option<String>,
}

impl ChatRunner {
    pub fn new(graph: ChatGraph) -> Self {
        Self {
            graph,
            default_system_prompt: None,
        }
    }

    /// System prompt used when a turn does not supply one.
    pub fn with_default_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.set_default_system_prompt(prompt);
        self
    }

    /// Replaces the default system prompt for later turns. Stored threads are untouched.
    pub fn set_default_system_prompt(&mut self, prompt: impl Into<String>) {
        self.default_system_prompt = Some(prompt.into());
    }

    pub fn default_system_prompt(&self) -> Option<&str> {
        self.default_system_prompt.as_deref()
    }

    pub fn graph(&self) -> &ChatGraph {
        &self.graph
    }

    /// Runs one turn and returns the assistant's reply.
    pub async fn handle_turn(
        &self,
        thread_id: &str,
        user_text: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, GraphError> {
        let options = RunOptions {
            system_prompt: system_prompt.map(str::to_string),
            ..Default::default()
        };
        self.handle_turn_with_options(thread_id, user_text, options)
            .await
            .map(|outcome| outcome.reply)
    }

    /// Runs one turn with per-call options and returns the full outcome.
    pub async fn handle_turn_with_options(
        &self,
        thread_id: &str,
        user_text: &str,
        options: RunOptions,
    ) -> Result<RunOutcome, GraphError> {
        let ctx = self.prepare(thread_id, user_text, options)?;
        self.graph.invoke(Message::user(user_text), &ctx).await
    }

    /// Like `handle_turn_with_options`, but returns per-step events as they happen.
    pub fn stream_turn(
        &self,
        thread_id: &str,
        user_text: &str,
        options: RunOptions,
    ) -> Result<ReceiverStream<StreamEvent>, GraphError> {
        let ctx = self.prepare(thread_id, user_text, options)?;
        Ok(self
            .graph
            .stream(Message::user(user_text), ctx, [StreamMode::Updates]))
    }

    /// Display entries for the thread; empty for an unknown thread.
    pub async fn get_transcript(&self, thread_id: &str) -> Result<Vec<TranscriptEntry>, GraphError> {
        Ok(project(&self.get_state(thread_id).await?))
    }

    /// Full persisted state of the thread, tool traffic included.
    pub async fn get_state(&self, thread_id: &str) -> Result<ConversationState, GraphError> {
        validate_thread_id(thread_id)?;
        Ok(self.graph.checkpointer().load(thread_id).await?)
    }

    /// Forgets one thread; other threads are untouched.
    pub async fn reset(&self, thread_id: &str) -> Result<(), GraphError> {
        validate_thread_id(thread_id)?;
        self.graph.checkpointer().clear(thread_id).await?;
        info!(thread_id, "thread reset");
        Ok(())
    }

    /// Forgets every thread.
    pub async fn reset_all(&self) -> Result<(), GraphError> {
        self.graph.checkpointer().clear_all().await?;
        info!("all threads reset");
        Ok(())
    }

    fn prepare(&self, thread_id: &str, user_text: &str, options: RunOptions) -> Result<RunContext, GraphError> {
        validate_thread_id(thread_id)?;
        if user_text.trim().is_empty() {
            return Err(GraphError::Validation("message must not be empty".to_string()));
        }
        Ok(RunContext {
            thread_id: thread_id.to_string(),
            system_prompt: options
                .system_prompt
                .or_else(|| self.default_system_prompt.clone()),
            node_timeout: options.node_timeout,
        })
    }
}

fn validate_thread_id(thread_id: &str) -> Result<(), GraphError> {
    if thread_id.trim().is_empty() {
        return Err(GraphError::Validation("thread id must not be empty".to_string()));
    }
    Ok(())
}
