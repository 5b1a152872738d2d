//! Conversation state and its merge rule.
//!
//! `ConversationState` is the single state type flowing through the graph. It is
//! append-only: nodes return new messages and the executor merges them after the
//! existing ones, in arrival order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::message::{Message, Origin};

/// One tool-call request emitted by the reasoning node.
///
/// `id` correlates the call with its tool-result message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// Ordered message log of one thread.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub messages: Vec<Message>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `new_messages` after the existing ones. Never reorders or deduplicates.
    pub fn merge(mut self, new_messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(new_messages);
        self
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Content of the most recent assistant message, if any.
    pub fn last_assistant_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.origin() == Origin::Assistant)
            .map(Message::content)
    }

    /// Tool calls of the latest assistant request that have no tool result after them.
    ///
    /// Non-empty only when a run stopped between a tool request and its results.
    pub fn unanswered_tool_calls(&self) -> Vec<&ToolCall> {
        let Some(pos) = self
            .messages
            .iter()
            .rposition(|m| m.origin() == Origin::Assistant)
        else {
            return Vec::new();
        };
        let answered: Vec<&str> = self.messages[pos + 1..]
            .iter()
            .filter_map(Message::tool_call_id)
            .collect();
        self.messages[pos]
            .tool_calls()
            .iter()
            .filter(|tc| !answered.contains(&tc.id.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Free-function form of [`ConversationState::merge`].
pub fn merge(existing: ConversationState, new_messages: Vec<Message>) -> ConversationState {
    existing.merge(new_messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ConversationState {
        ConversationState {
            messages: vec![Message::user("a"), Message::assistant("b")],
        }
    }

    /// **Scenario**: merge length is the sum and the existing prefix is unchanged.
    #[test]
    fn merge_appends_and_keeps_prefix() {
        let s = sample();
        let before = s.messages.clone();
        let new = vec![Message::user("c"), Message::assistant("d"), Message::user("c")];
        let merged = merge(s, new.clone());
        assert_eq!(merged.len(), before.len() + new.len());
        assert_eq!(&merged.messages[..before.len()], &before[..]);
        assert_eq!(&merged.messages[before.len()..], &new[..]);
    }

    /// **Scenario**: merging duplicates keeps both copies (no dedup).
    #[test]
    fn merge_does_not_deduplicate() {
        let merged = ConversationState::new()
            .merge([Message::user("same")])
            .merge([Message::user("same")]);
        assert_eq!(merged.len(), 2);
    }

    /// **Scenario**: merging nothing is the identity.
    #[test]
    fn merge_empty_is_identity() {
        let s = sample();
        assert_eq!(s.clone().merge(Vec::new()), s);
    }

    /// **Scenario**: last_assistant_content skips trailing tool results.
    #[test]
    fn last_assistant_content_skips_tool_results() {
        let s = ConversationState::new().merge([
            Message::user("q"),
            Message::assistant_with_tool_calls("", vec![ToolCall::new("1", "t", json!({}))]),
            Message::tool_result("1", "t", "r"),
        ]);
        assert_eq!(s.last_assistant_content(), Some(""));
        assert!(ConversationState::new().last_assistant_content().is_none());
    }

    /// **Scenario**: only calls of the latest request without a matching result are unanswered.
    #[test]
    fn unanswered_tool_calls_after_aborted_request() {
        let request = Message::assistant_with_tool_calls(
            "",
            vec![
                ToolCall::new("1", "t", json!({})),
                ToolCall::new("2", "t", json!({})),
            ],
        );
        let open = ConversationState::new().merge([Message::user("q"), request.clone()]);
        let ids: Vec<&str> = open.unanswered_tool_calls().iter().map(|tc| tc.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        let partial = open.clone().merge([Message::tool_result("1", "t", "r")]);
        let ids: Vec<&str> = partial.unanswered_tool_calls().iter().map(|tc| tc.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);

        let closed = partial.merge([Message::tool_result("2", "t", "r"), Message::assistant("done")]);
        assert!(closed.unanswered_tool_calls().is_empty());
        assert!(sample().unanswered_tool_calls().is_empty());
    }
}
