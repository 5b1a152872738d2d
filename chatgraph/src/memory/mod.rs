//! # Memory: per-thread checkpointing
//!
//! A [`Checkpointer`] maps a thread id to the latest snapshot of that thread's
//! conversation state. The executor loads it at the start of a turn and saves
//! after every successful step.
//!
//! ## Checkpointer Implementations
//!
//! | Type             | Persistence | Use case                    | Feature  |
//! |------------------|-------------|-----------------------------|----------|
//! | [`MemorySaver`]  | In-memory   | Dev, tests, single process  | none     |
//! | `SqliteSaver`    | SQLite file | Survives restarts           | `sqlite` |
//!
//! `SqliteSaver` stores state bytes produced by a [`Serializer`]; use
//! [`JsonSerializer`] for any `Serialize + DeserializeOwned` state.

mod checkpoint;
mod checkpointer;
mod memory_saver;
mod serializer;

#[cfg(feature = "sqlite")]
mod sqlite_saver;

pub use checkpoint::{Checkpoint, CheckpointMetadata, CheckpointSource};
pub use checkpointer::{CheckpointError, Checkpointer};
pub use memory_saver::MemorySaver;
pub use serializer::{JsonSerializer, Serializer};

#[cfg(feature = "sqlite")]
pub use sqlite_saver::SqliteSaver;
