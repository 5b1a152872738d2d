//! Checkpointer trait and checkpoint error.
//!
//! A checkpointer maps a thread id to the latest snapshot of that thread's state.
//! Implementations: [`MemorySaver`](super::MemorySaver) and, with feature `sqlite`,
//! [`SqliteSaver`](super::SqliteSaver).

use async_trait::async_trait;
use thiserror::Error;

use super::checkpoint::{Checkpoint, CheckpointSource};

/// Error from a checkpointer operation.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// State could not be encoded or decoded.
    #[error("serialization: {0}")]
    Serialization(String),
    /// Backing storage failed (I/O, SQL, poisoned lock).
    #[error("storage: {0}")]
    Storage(String),
}

/// Per-thread checkpoint storage.
///
/// `put` must replace a thread's snapshot atomically with respect to concurrent
/// `put`/`get_tuple` on the same id (last writer wins). Unknown thread ids are
/// never an error: `get_tuple` returns `None` and `load` returns an empty state.
///
/// **Interaction**: Held as `Arc<dyn Checkpointer<S>>` by `ChatGraph` and `ChatRunner`.
#[async_trait]
pub trait Checkpointer<S>: Send + Sync
where
    S: Clone + Default + Send + Sync + 'static,
{
    /// Latest checkpoint for the thread, if any.
    async fn get_tuple(&self, thread_id: &str) -> Result<Option<Checkpoint<S>>, CheckpointError>;

    /// Replaces the thread's checkpoint.
    async fn put(&self, thread_id: &str, checkpoint: &Checkpoint<S>) -> Result<(), CheckpointError>;

    /// Discards the thread's state. A later `load` returns an empty state.
    async fn clear(&self, thread_id: &str) -> Result<(), CheckpointError>;

    /// Discards every thread's state.
    async fn clear_all(&self) -> Result<(), CheckpointError>;

    /// State of the latest checkpoint, or `S::default()` when the thread has none.
    async fn load(&self, thread_id: &str) -> Result<S, CheckpointError> {
        Ok(self
            .get_tuple(thread_id)
            .await?
            .map(|cp| cp.state)
            .unwrap_or_default())
    }

    /// Wraps `state` in a fresh checkpoint and stores it.
    async fn save(
        &self,
        thread_id: &str,
        state: S,
        source: CheckpointSource,
        step: u64,
    ) -> Result<(), CheckpointError> {
        let checkpoint = Checkpoint::from_state(state, source, step);
        self.put(thread_id, &checkpoint).await
    }
}
