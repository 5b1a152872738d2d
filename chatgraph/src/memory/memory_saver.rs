//! In-memory checkpointer for dev, tests and single-process use.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::checkpoint::Checkpoint;
use super::checkpointer::{CheckpointError, Checkpointer};

/// In-memory checkpointer: latest checkpoint per thread id.
///
/// The map lock is held only for the insert/clone itself; nothing awaits while
/// holding it, so collaborators running on other threads are never blocked by it.
pub struct MemorySaver<S> {
    inner: RwLock<HashMap<String, Checkpoint<S>>>,
}

impl<S> MemorySaver<S> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Number of threads that currently hold a checkpoint.
    pub fn thread_count(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }
}

impl<S> Default for MemorySaver<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E>(_: E) -> CheckpointError {
    CheckpointError::Storage("checkpoint lock poisoned".into())
}

#[async_trait]
impl<S> Checkpointer<S> for MemorySaver<S>
where
    S: Clone + Default + Send + Sync + 'static,
{
    async fn get_tuple(&self, thread_id: &str) -> Result<Option<Checkpoint<S>>, CheckpointError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(thread_id).cloned())
    }

    async fn put(&self, thread_id: &str, checkpoint: &Checkpoint<S>) -> Result<(), CheckpointError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(thread_id.to_string(), checkpoint.clone());
        Ok(())
    }

    async fn clear(&self, thread_id: &str) -> Result<(), CheckpointError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.remove(thread_id);
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), CheckpointError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.clear();
        Ok(())
    }
}
