//! One-turn behavior: direct answers, tool round trips and failing runs.

use std::sync::Arc;
use std::time::Duration;

use chatgraph::{
    ChatGraphBuilder, ChatRunner, ConversationState, GraphError, LlmResponse, MemorySaver,
    Message, MessageClass, MockLlm, MockToolSource, Origin, RunOptions, ABORTED_TOOL_RESULT,
};
use serde_json::json;

use crate::common::{runner, SEARCH_RESULT};

/// **Scenario**: a question the model can answer needs no tool and stores two messages.
#[tokio::test]
async fn direct_answer() {
    let r = runner();
    let reply = r.handle_turn("1", "2+2?", None).await.unwrap();
    assert!(reply.contains('4'), "{}", reply);
    let state = r.get_state("1").await.unwrap();
    assert_eq!(state.len(), 2);
    let transcript = r.get_transcript("1").await.unwrap();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].class, MessageClass::UserMessage);
    assert_eq!(transcript[0].text, "2+2?");
    assert_eq!(transcript[1].class, MessageClass::BotMessage);
    assert!(transcript[1].text.contains('4'), "{}", transcript[1].text);
}

/// **Scenario**: "search X" stores user, tool request, tool result, answer.
#[tokio::test]
async fn search_round_trip() {
    let r = runner();
    let outcome = r
        .handle_turn_with_options("1", "search X", RunOptions::default())
        .await
        .unwrap();
    assert_eq!(outcome.round_trips, 1);
    let origins: Vec<Origin> = outcome.state.messages.iter().map(|m| m.origin()).collect();
    assert_eq!(
        origins,
        vec![Origin::User, Origin::Assistant, Origin::ToolResult, Origin::Assistant]
    );
    let request = &outcome.state.messages[1];
    assert_eq!(request.content(), "");
    assert_eq!(request.tool_calls()[0].name, "search");
    assert_eq!(request.tool_calls()[0].arguments, json!({"query": "X"}));
    assert_eq!(
        outcome.state.messages[2].tool_call_id(),
        Some(request.tool_calls()[0].id.as_str())
    );
    assert!(outcome.reply.contains(SEARCH_RESULT));
}

/// **Scenario**: turns on one thread accumulate; the prior history is kept as a prefix.
#[tokio::test]
async fn turns_accumulate() {
    let r = runner();
    r.handle_turn("1", "hello", None).await.unwrap();
    let first = r.get_state("1").await.unwrap();
    r.handle_turn("1", "search X", None).await.unwrap();
    let second = r.get_state("1").await.unwrap();
    assert_eq!(second.len(), first.len() + 4);
    assert_eq!(&second.messages[..first.len()], &first.messages[..]);
}

/// Answers "back" only when every tool call in the conversation has a result.
fn pairing_checked_llm() -> MockLlm {
    MockLlm::from_fn(|messages: &[Message], _system: Option<&str>| {
        let state = ConversationState {
            messages: messages.to_vec(),
        };
        if state.unanswered_tool_calls().is_empty() {
            LlmResponse::text("back")
        } else {
            LlmResponse::text("unpaired tool calls")
        }
    })
}

/// **Scenario**: an always-tool-calling model stops at the bound and the thread
/// stays usable afterwards; the abandoned request is closed before the next turn.
#[tokio::test]
async fn loop_bound_then_thread_still_usable() {
    let saver: Arc<MemorySaver<ConversationState>> = Arc::new(MemorySaver::new());
    let looping = ChatRunner::new(
        ChatGraphBuilder::new()
            .with_llm(Arc::new(MockLlm::always_tool_call("search", json!({"query": "x"}))))
            .with_tool_source(Arc::new(MockToolSource::search_example()))
            .with_checkpointer(saver.clone())
            .build()
            .unwrap(),
    );
    let err = looping.handle_turn("1", "loop forever", None).await.unwrap_err();
    assert!(err.to_string().contains("tool loop exceeded"));
    let stored = looping.get_state("1").await.unwrap();
    assert_eq!(stored.len(), 1 + 25 * 2 + 1);

    let answering = crate::common::runner_with(pairing_checked_llm(), saver);
    assert_eq!(answering.handle_turn("1", "hi", None).await.unwrap(), "back");
    let after = answering.get_state("1").await.unwrap();
    assert_eq!(after.len(), stored.len() + 3);
    assert_eq!(&after.messages[..stored.len()], &stored.messages[..]);
    let closing = &after.messages[stored.len()];
    assert_eq!(closing.origin(), Origin::ToolResult);
    assert_eq!(closing.content(), ABORTED_TOOL_RESULT);
    assert_eq!(after.messages[stored.len() + 1].content(), "hi");
}

/// **Scenario**: a tool step that times out leaves an open request; the next turn
/// closes it and answers normally.
#[tokio::test]
async fn tool_timeout_then_thread_still_usable() {
    let saver: Arc<MemorySaver<ConversationState>> = Arc::new(MemorySaver::new());
    let slow_tools = ChatRunner::new(
        ChatGraphBuilder::new()
            .with_llm(Arc::new(crate::common::scripted_llm()))
            .with_tool_source(Arc::new(
                MockToolSource::search_example().with_delay(Duration::from_millis(200)),
            ))
            .with_checkpointer(saver.clone())
            .build()
            .unwrap(),
    );
    let err = slow_tools
        .handle_turn_with_options(
            "1",
            "search X",
            RunOptions::default().with_node_timeout(Duration::from_millis(50)),
        )
        .await
        .unwrap_err();
    match err {
        GraphError::Timeout { node, .. } => assert_eq!(node, "tools"),
        other => panic!("expected Timeout, got {:?}", other),
    }
    let stored = slow_tools.get_state("1").await.unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.last().unwrap().has_tool_calls());

    let answering = crate::common::runner_with(pairing_checked_llm(), saver);
    assert_eq!(answering.handle_turn("1", "hi", None).await.unwrap(), "back");
    let transcript = answering.get_transcript("1").await.unwrap();
    let texts: Vec<&str> = transcript.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["search X", "hi", "back"]);
}

/// **Scenario**: a timed-out turn leaves the thread exactly as before.
#[tokio::test]
async fn timeout_leaves_thread_unchanged() {
    let saver: Arc<MemorySaver<ConversationState>> = Arc::new(MemorySaver::new());
    let fast = crate::common::runner_with(MockLlm::with_no_tool_calls("ok"), saver.clone());
    fast.handle_turn("1", "hello", None).await.unwrap();
    let before = fast.get_state("1").await.unwrap();

    let slow = crate::common::runner_with(
        MockLlm::with_no_tool_calls("late").with_delay(Duration::from_millis(200)),
        saver,
    );
    let err = slow
        .handle_turn_with_options(
            "1",
            "again",
            RunOptions::default().with_node_timeout(Duration::from_millis(20)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, GraphError::Timeout { .. }));
    assert_eq!(slow.get_state("1").await.unwrap(), before);
}

/// **Scenario**: concurrent turns on different threads do not interfere.
#[tokio::test]
async fn concurrent_threads_isolated() {
    let r = runner();
    let (a, b) = tokio::join!(
        r.handle_turn("a", "search A", None),
        r.handle_turn("b", "2+2?", None)
    );
    assert!(a.unwrap().contains("From the web"));
    assert!(b.unwrap().contains('4'));
    assert_eq!(r.get_state("a").await.unwrap().len(), 4);
    assert_eq!(r.get_state("b").await.unwrap().len(), 2);
}
