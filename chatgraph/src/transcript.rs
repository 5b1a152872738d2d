//! Transcript projection: persisted conversation → display entries.
//!
//! Only what a person would see in a chat window survives: user messages and
//! assistant messages with text. Tool requests (empty assistant content) and tool
//! results are dropped. Order is preserved.

use serde::{Deserialize, Serialize};

use crate::message::{Message, Origin};
use crate::state::ConversationState;

/// Display class of a transcript entry; serializes as `user-message` / `bot-message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageClass {
    UserMessage,
    BotMessage,
}

impl MessageClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageClass::UserMessage => "user-message",
            MessageClass::BotMessage => "bot-message",
        }
    }
}

/// One line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub class: MessageClass,
    pub text: String,
}

fn classify(message: &Message) -> Option<MessageClass> {
    match message.origin() {
        Origin::User => Some(MessageClass::UserMessage),
        Origin::Assistant if !message.content().is_empty() => Some(MessageClass::BotMessage),
        Origin::Assistant | Origin::ToolResult => None,
    }
}

/// Projects the state into display entries. Pure and total.
pub fn project(state: &ConversationState) -> Vec<TranscriptEntry> {
    state
        .messages
        .iter()
        .filter_map(|m| {
            classify(m).map(|class| TranscriptEntry {
                class,
                text: m.content().to_string(),
            })
        })
        .collect()
}
