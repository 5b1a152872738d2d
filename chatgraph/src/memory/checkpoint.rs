//! Checkpoint and metadata types.
//!
//! A checkpoint is the latest persisted snapshot of one thread's state plus the
//! step that produced it.

use std::time::SystemTime;

/// Metadata for a single checkpoint (source, step, created_at).
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointMetadata {
    pub source: CheckpointSource,
    /// Executor step that produced the snapshot (0 for the first reasoning step of a turn).
    pub step: u64,
    pub created_at: Option<SystemTime>,
}

/// What wrote the checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointSource {
    /// Written while the executor was running a node (reasoning or tool step).
    Loop,
    /// Written directly through `Checkpointer::save` outside a run.
    Update,
}

impl CheckpointSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckpointSource::Loop => "loop",
            CheckpointSource::Update => "update",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "loop" => CheckpointSource::Loop,
            _ => CheckpointSource::Update,
        }
    }
}

/// One checkpoint: state snapshot + id/ts + metadata.
///
/// **Interaction**: Produced by the executor after each successful step; consumed
/// by `Checkpointer::put`, returned by `Checkpointer::get_tuple`.
#[derive(Debug, Clone)]
pub struct Checkpoint<S> {
    pub id: String,
    pub ts: String,
    pub state: S,
    pub metadata: CheckpointMetadata,
}

impl<S> Checkpoint<S> {
    /// Creates a checkpoint from the current state. Uses current time for id/ts.
    pub fn from_state(state: S, source: CheckpointSource, step: u64) -> Self {
        let now = SystemTime::now();
        let ts = format!(
            "{}",
            now.duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0)
        );
        let id = format!("{}-{}", ts, step);
        Self {
            id,
            ts,
            state,
            metadata: CheckpointMetadata {
                source,
                step,
                created_at: Some(now),
            },
        }
    }
}
