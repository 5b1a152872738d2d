//! Graph executor: the fixed reasoning/tool state machine.
//!
//! `START → REASONING → (TOOL → REASONING)* → DONE`, with `FAILED` reachable from
//! any step. The checkpoint is loaded once at START and saved after every
//! successful node step; a failing step persists nothing, so the thread stays at
//! its last good checkpoint.
//!
//! A run that fails between a tool request and its results (loop bound, tool
//! timeout, unreachable tool backend) leaves that request unanswered. The next
//! START closes each such call with an [`ABORTED_TOOL_RESULT`] message before the
//! new user message, so backends always see every call paired with a result.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::GraphError;
use crate::memory::{CheckpointSource, Checkpointer};
use crate::message::Message;
use crate::state::ConversationState;
use crate::stream::{StreamEvent, StreamMode};

use super::config::ExecutorConfig;
use super::logging::{
    log_checkpoint_saved, log_node_complete, log_node_start, log_route, log_run_complete,
    log_run_error, log_run_start, log_unanswered_calls,
};
use super::{route, Node, Route, RunContext};

/// Tool-result content recorded for calls a previous run never executed.
pub const ABORTED_TOOL_RESULT: &str = "not executed: run aborted";

/// Result of a run that reached DONE.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Content of the last assistant message.
    pub reply: String,
    /// Full state as persisted by the last step.
    pub state: ConversationState,
    /// Number of TOOL steps taken.
    pub round_trips: usize,
}

/// States of the executor. `Failed` carries the error that ends the run.
#[derive(Debug)]
enum Phase {
    Start(Message),
    Reasoning,
    Tool,
    Done,
    Failed(GraphError),
}

/// In-flight data of one run.
struct Run {
    state: ConversationState,
    step: u64,
    round_trips: usize,
}

/// Optional event sink for `stream`.
struct Sink<'a> {
    tx: &'a mpsc::Sender<StreamEvent>,
    modes: &'a HashSet<StreamMode>,
}

impl Sink<'_> {
    async fn step(&self, node_id: &str, step: u64, produced: &[Message], state: &ConversationState) {
        if self.modes.contains(&StreamMode::Updates) {
            let _ = self
                .tx
                .send(StreamEvent::Updates {
                    node_id: node_id.to_string(),
                    step,
                    messages: produced.to_vec(),
                })
                .await;
        }
        if self.modes.contains(&StreamMode::Values) {
            let _ = self.tx.send(StreamEvent::Values(state.clone())).await;
        }
    }
}

/// Assembled graph: reasoning node, tool node, checkpointer and limits.
///
/// Built by [`ChatGraphBuilder`](super::ChatGraphBuilder). Cheap to clone; clones
/// share nodes and checkpointer.
#[derive(Clone)]
pub struct ChatGraph {
    pub(super) reasoning: Arc<dyn Node>,
    pub(super) tools: Arc<dyn Node>,
    pub(super) checkpointer: Arc<dyn Checkpointer<ConversationState>>,
    pub(super) config: ExecutorConfig,
}

impl ChatGraph {
    /// Runs one user turn on `ctx.thread_id` and returns the final reply and state.
    ///
    /// Precondition: no other run is in flight for the same thread.
    pub async fn invoke(&self, user_message: Message, ctx: &RunContext) -> Result<RunOutcome, GraphError> {
        self.run_loop(user_message, ctx, None).await
    }

    /// Runs one user turn on a spawned task, emitting events for the selected modes.
    ///
    /// The stream always ends with `Completed` or `Failed`.
    pub fn stream(
        &self,
        user_message: Message,
        ctx: RunContext,
        stream_mode: impl Into<HashSet<StreamMode>>,
    ) -> ReceiverStream<StreamEvent> {
        let (tx, rx) = mpsc::channel(128);
        let graph = self.clone();
        let modes: HashSet<StreamMode> = stream_mode.into();

        tokio::spawn(async move {
            let sink = Sink { tx: &tx, modes: &modes };
            let terminal = match graph.run_loop(user_message, &ctx, Some(&sink)).await {
                Ok(outcome) => StreamEvent::Completed {
                    reply: outcome.reply,
                },
                Err(e) => StreamEvent::Failed {
                    error: e.to_string(),
                },
            };
            let _ = tx.send(terminal).await;
        });

        ReceiverStream::new(rx)
    }

    pub fn checkpointer(&self) -> &Arc<dyn Checkpointer<ConversationState>> {
        &self.checkpointer
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    async fn run_loop(
        &self,
        user_message: Message,
        ctx: &RunContext,
        sink: Option<&Sink<'_>>,
    ) -> Result<RunOutcome, GraphError> {
        let mut run = Run {
            state: ConversationState::default(),
            step: 0,
            round_trips: 0,
        };
        let mut phase = Phase::Start(user_message);

        loop {
            phase = match phase {
                Phase::Start(incoming) => self.start(&mut run, incoming, ctx).await,
                Phase::Reasoning => self.reasoning_step(&mut run, ctx, sink).await,
                Phase::Tool => self.tool_step(&mut run, ctx, sink).await,
                Phase::Done => {
                    log_run_complete(&ctx.thread_id, run.step, run.round_trips);
                    let reply = run.state.last_assistant_content().unwrap_or_default().to_string();
                    return Ok(RunOutcome {
                        reply,
                        state: run.state,
                        round_trips: run.round_trips,
                    });
                }
                Phase::Failed(e) => {
                    log_run_error(&ctx.thread_id, &e);
                    return Err(e);
                }
            }
            .unwrap_or_else(Phase::Failed);
        }
    }

    async fn start(&self, run: &mut Run, incoming: Message, ctx: &RunContext) -> Result<Phase, GraphError> {
        let loaded = self.checkpointer.load(&ctx.thread_id).await?;
        log_run_start(&ctx.thread_id, loaded.len());
        let closing: Vec<Message> = loaded
            .unanswered_tool_calls()
            .into_iter()
            .map(|tc| Message::tool_result(tc.id.clone(), tc.name.clone(), ABORTED_TOOL_RESULT))
            .collect();
        if !closing.is_empty() {
            log_unanswered_calls(&ctx.thread_id, closing.len());
        }
        run.state = loaded.merge(closing).merge([incoming]);
        Ok(Phase::Reasoning)
    }

    async fn reasoning_step(
        &self,
        run: &mut Run,
        ctx: &RunContext,
        sink: Option<&Sink<'_>>,
    ) -> Result<Phase, GraphError> {
        let produced = self.run_node(self.reasoning.as_ref(), run, ctx).await?;
        let latest = produced.last().cloned().ok_or_else(|| {
            GraphError::ExecutionFailed(format!(
                "node '{}' produced no message",
                self.reasoning.id()
            ))
        })?;
        self.commit(run, ctx, self.reasoning.id(), produced, sink).await?;

        let next = route(&latest);
        log_route(&ctx.thread_id, next, run.round_trips);
        Ok(match next {
            Route::End => Phase::Done,
            Route::Tools if run.round_trips >= self.config.max_round_trips => {
                Phase::Failed(GraphError::LoopExceeded {
                    max_round_trips: self.config.max_round_trips,
                })
            }
            Route::Tools => Phase::Tool,
        })
    }

    async fn tool_step(
        &self,
        run: &mut Run,
        ctx: &RunContext,
        sink: Option<&Sink<'_>>,
    ) -> Result<Phase, GraphError> {
        let pending = run.state.last().map(|m| m.tool_calls().len()).unwrap_or(0);
        let produced = self.run_node(self.tools.as_ref(), run, ctx).await?;
        if produced.len() != pending {
            return Err(GraphError::ExecutionFailed(format!(
                "node '{}' returned {} results for {} tool calls",
                self.tools.id(),
                produced.len(),
                pending
            )));
        }
        self.commit(run, ctx, self.tools.id(), produced, sink).await?;
        run.round_trips += 1;
        Ok(Phase::Reasoning)
    }

    /// Runs a node under the run's deadline. Does not touch `run.state`.
    async fn run_node(&self, node: &dyn Node, run: &Run, ctx: &RunContext) -> Result<Vec<Message>, GraphError> {
        log_node_start(&ctx.thread_id, node.id(), run.step);
        let deadline: Option<Duration> = ctx.node_timeout.or(self.config.node_timeout);
        let produced = match deadline {
            Some(after) => tokio::time::timeout(after, node.run(&run.state, ctx))
                .await
                .map_err(|_| GraphError::Timeout {
                    node: node.id().to_string(),
                    after,
                })??,
            None => node.run(&run.state, ctx).await?,
        };
        log_node_complete(&ctx.thread_id, node.id(), run.step, produced.len());
        Ok(produced)
    }

    /// Merges a node's output and persists it. `run.state` only changes once the
    /// checkpoint is written.
    async fn commit(
        &self,
        run: &mut Run,
        ctx: &RunContext,
        node_id: &str,
        produced: Vec<Message>,
        sink: Option<&Sink<'_>>,
    ) -> Result<(), GraphError> {
        let merged = run.state.clone().merge(produced.iter().cloned());
        self.checkpointer
            .save(&ctx.thread_id, merged.clone(), CheckpointSource::Loop, run.step)
            .await?;
        log_checkpoint_saved(&ctx.thread_id, run.step, merged.len());
        if let Some(sink) = sink {
            sink.step(node_id, run.step, &produced, &merged).await;
        }
        run.state = merged;
        run.step += 1;
        Ok(())
    }
}
