//! SQLite-backed threads survive a new runner on the same file.

use std::sync::Arc;

use chatgraph::{ConversationState, JsonSerializer, SqliteSaver};

use crate::common::{runner_with, scripted_llm};

fn saver(path: &std::path::Path) -> Arc<SqliteSaver<ConversationState>> {
    Arc::new(SqliteSaver::new(path, Arc::new(JsonSerializer)).unwrap())
}

/// **Scenario**: a thread written by one runner is resumed by another.
#[tokio::test]
async fn thread_resumes_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.db");

    let first = runner_with(scripted_llm(), saver(&path));
    first.handle_turn("1", "search X", None).await.unwrap();
    let stored = first.get_state("1").await.unwrap();
    drop(first);

    let second = runner_with(scripted_llm(), saver(&path));
    assert_eq!(second.get_state("1").await.unwrap(), stored);
    second.handle_turn("1", "2+2?", None).await.unwrap();
    assert_eq!(second.get_transcript("1").await.unwrap().len(), 4);
}

/// **Scenario**: reset_all on the file store clears every thread.
#[tokio::test]
async fn reset_all_on_file() {
    let dir = tempfile::tempdir().unwrap();
    let r = runner_with(scripted_llm(), saver(&dir.path().join("chat.db")));
    r.handle_turn("1", "hello", None).await.unwrap();
    r.handle_turn("2", "hello", None).await.unwrap();
    r.reset_all().await.unwrap();
    assert!(r.get_state("1").await.unwrap().is_empty());
    assert!(r.get_state("2").await.unwrap().is_empty());
}
