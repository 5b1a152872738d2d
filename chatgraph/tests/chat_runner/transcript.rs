//! Transcript of persisted threads.

use chatgraph::MessageClass;

use crate::common::runner;

/// **Scenario**: a search turn shows only the question and the answer.
#[tokio::test]
async fn search_turn_transcript_has_two_entries() {
    let r = runner();
    r.handle_turn("1", "search X", None).await.unwrap();
    let transcript = r.get_transcript("1").await.unwrap();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].class, MessageClass::UserMessage);
    assert_eq!(transcript[0].text, "search X");
    assert_eq!(transcript[1].class, MessageClass::BotMessage);
    assert!(transcript[1].text.starts_with("From the web"));
}

/// **Scenario**: an unknown thread has an empty transcript.
#[tokio::test]
async fn unknown_thread_empty_transcript() {
    assert!(runner().get_transcript("nobody").await.unwrap().is_empty());
}

/// **Scenario**: entries keep turn order across turns.
#[tokio::test]
async fn transcript_keeps_order() {
    let r = runner();
    r.handle_turn("1", "hello", None).await.unwrap();
    r.handle_turn("1", "2+2?", None).await.unwrap();
    let texts: Vec<String> = r
        .get_transcript("1")
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.text)
        .collect();
    assert_eq!(texts, vec!["hello", "You said: hello", "2+2?", "2+2 = 4"]);
}
