//! reset / reset_all.

use crate::common::runner;

/// **Scenario**: reset_all empties every thread.
#[tokio::test]
async fn reset_all_empties_everything() {
    let r = runner();
    r.handle_turn("1", "hello", None).await.unwrap();
    r.handle_turn("2", "hello", None).await.unwrap();
    r.reset_all().await.unwrap();
    assert!(r.get_transcript("1").await.unwrap().is_empty());
    assert!(r.get_transcript("2").await.unwrap().is_empty());
}

/// **Scenario**: resetting one thread leaves the other intact.
#[tokio::test]
async fn reset_is_per_thread() {
    let r = runner();
    r.handle_turn("A", "hello", None).await.unwrap();
    r.handle_turn("B", "2+2?", None).await.unwrap();
    let b_before = r.get_state("B").await.unwrap();
    r.reset("A").await.unwrap();
    assert!(r.get_state("A").await.unwrap().is_empty());
    assert_eq!(r.get_state("B").await.unwrap(), b_before);
}

/// **Scenario**: a reset thread starts a fresh conversation.
#[tokio::test]
async fn reset_thread_starts_fresh() {
    let r = runner();
    r.handle_turn("1", "hello", None).await.unwrap();
    r.reset("1").await.unwrap();
    r.handle_turn("1", "again", None).await.unwrap();
    assert_eq!(r.get_state("1").await.unwrap().len(), 2);
}
