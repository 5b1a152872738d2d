//! SQLite-backed checkpointer (feature `sqlite`).
//!
//! One row per thread. `put` is a single `INSERT OR REPLACE`, so a thread's
//! snapshot is replaced atomically. Blocking SQLite work runs on
//! `tokio::task::spawn_blocking`.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use super::checkpoint::{Checkpoint, CheckpointMetadata, CheckpointSource};
use super::checkpointer::{CheckpointError, Checkpointer};
use super::serializer::Serializer;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS checkpoints (
    thread_id     TEXT PRIMARY KEY,
    checkpoint_id TEXT NOT NULL,
    ts            TEXT NOT NULL,
    source        TEXT NOT NULL,
    step          INTEGER NOT NULL,
    created_at_ms INTEGER,
    state         BLOB NOT NULL
)";

/// Row as read from SQLite, before the state bytes are deserialized.
struct Row {
    id: String,
    ts: String,
    source: String,
    step: i64,
    created_at_ms: Option<i64>,
    state: Vec<u8>,
}

/// SQLite checkpointer: latest checkpoint per thread, state encoded by a [`Serializer`].
pub struct SqliteSaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    conn: Arc<Mutex<Connection>>,
    serializer: Arc<dyn Serializer<S>>,
}

fn storage<E: std::fmt::Display>(e: E) -> CheckpointError {
    CheckpointError::Storage(e.to_string())
}

impl<S> SqliteSaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Opens (or creates) the database file and ensures the table exists.
    pub fn new(path: impl AsRef<Path>, serializer: Arc<dyn Serializer<S>>) -> Result<Self, CheckpointError> {
        let conn = Connection::open(path).map_err(storage)?;
        Self::with_connection(conn, serializer)
    }

    /// In-memory database; state is lost when the saver is dropped.
    pub fn in_memory(serializer: Arc<dyn Serializer<S>>) -> Result<Self, CheckpointError> {
        let conn = Connection::open_in_memory().map_err(storage)?;
        Self::with_connection(conn, serializer)
    }

    fn with_connection(conn: Connection, serializer: Arc<dyn Serializer<S>>) -> Result<Self, CheckpointError> {
        conn.execute(CREATE_TABLE, []).map_err(storage)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            serializer,
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, CheckpointError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| CheckpointError::Storage("sqlite connection lock poisoned".into()))?;
            f(&guard).map_err(storage)
        })
        .await
        .map_err(storage)?
    }
}

#[async_trait]
impl<S> Checkpointer<S> for SqliteSaver<S>
where
    S: Clone + Default + Send + Sync + 'static,
{
    async fn get_tuple(&self, thread_id: &str) -> Result<Option<Checkpoint<S>>, CheckpointError> {
        let tid = thread_id.to_string();
        let row = self
            .with_conn(move |conn| {
                conn.query_row(
                    "SELECT checkpoint_id, ts, source, step, created_at_ms, state
                     FROM checkpoints WHERE thread_id = ?1",
                    params![tid],
                    |r| {
                        Ok(Row {
                            id: r.get(0)?,
                            ts: r.get(1)?,
                            source: r.get(2)?,
                            step: r.get(3)?,
                            created_at_ms: r.get(4)?,
                            state: r.get(5)?,
                        })
                    },
                )
                .optional()
            })
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let state = self.serializer.deserialize(&row.state)?;
        Ok(Some(Checkpoint {
            id: row.id,
            ts: row.ts,
            state,
            metadata: CheckpointMetadata {
                source: CheckpointSource::parse(&row.source),
                step: row.step.max(0) as u64,
                created_at: row
                    .created_at_ms
                    .map(|ms| SystemTime::UNIX_EPOCH + Duration::from_millis(ms.max(0) as u64)),
            },
        }))
    }

    async fn put(&self, thread_id: &str, checkpoint: &Checkpoint<S>) -> Result<(), CheckpointError> {
        let bytes = self.serializer.serialize(&checkpoint.state)?;
        let tid = thread_id.to_string();
        let id = checkpoint.id.clone();
        let ts = checkpoint.ts.clone();
        let source = checkpoint.metadata.source.as_str();
        let step = checkpoint.metadata.step as i64;
        let created_at_ms = checkpoint.metadata.created_at.and_then(|t| {
            t.duration_since(SystemTime::UNIX_EPOCH)
                .ok()
                .map(|d| d.as_millis() as i64)
        });
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO checkpoints
                 (thread_id, checkpoint_id, ts, source, step, created_at_ms, state)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![tid, id, ts, source, step, created_at_ms, bytes],
            )
            .map(|_| ())
        })
        .await
    }

    async fn clear(&self, thread_id: &str) -> Result<(), CheckpointError> {
        let tid = thread_id.to_string();
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM checkpoints WHERE thread_id = ?1", params![tid])
                .map(|_| ())
        })
        .await
    }

    async fn clear_all(&self) -> Result<(), CheckpointError> {
        self.with_conn(|conn| conn.execute("DELETE FROM checkpoints", []).map(|_| ()))
            .await
    }
}
