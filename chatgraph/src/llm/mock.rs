//! Scripted `LlmClient` for tests and offline runs.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::GraphError;
use crate::message::Message;
use crate::state::ToolCall;

use super::{LlmClient, LlmResponse};

type ResponderFn = dyn Fn(&[Message], Option<&str>) -> LlmResponse + Send + Sync;

enum Behavior {
    /// Same response on every call.
    Fixed(LlmResponse),
    /// Pops responses in order; repeats the last one when the queue runs dry.
    Script(Mutex<VecDeque<LlmResponse>>, LlmResponse),
    /// Computes the response from the conversation.
    Func(Arc<ResponderFn>),
    /// Always fails as an unreachable backend.
    Unavailable(String),
}

/// Mock LLM: fixed, scripted or computed responses, with an optional delay.
///
/// Records how many times it was invoked and the last system prompt it saw.
pub struct MockLlm {
    behavior: Behavior,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_system_prompt: Mutex<Option<String>>,
}

impl MockLlm {
    fn from_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            delay: None,
            calls: AtomicUsize::new(0),
            last_system_prompt: Mutex::new(None),
        }
    }

    /// Always answers `content` without tool calls.
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self::from_behavior(Behavior::Fixed(LlmResponse::text(content)))
    }

    /// Always requests the same tool; used to exercise the round-trip bound.
    pub fn always_tool_call(name: impl Into<String>, arguments: Value) -> Self {
        Self::from_behavior(Behavior::Fixed(LlmResponse::with_tool_calls(vec![
            ToolCall::new("", name, arguments),
        ])))
    }

    /// Returns `responses` in order, then keeps repeating the last one.
    pub fn with_responses(responses: Vec<LlmResponse>) -> Self {
        let mut queue: VecDeque<LlmResponse> = responses.into();
        let last = queue.back().cloned().unwrap_or_default();
        if queue.is_empty() {
            queue.push_back(last.clone());
        }
        Self::from_behavior(Behavior::Script(Mutex::new(queue), last))
    }

    /// Computes each response from the conversation and system prompt.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&[Message], Option<&str>) -> LlmResponse + Send + Sync + 'static,
    {
        Self::from_behavior(Behavior::Func(Arc::new(f)))
    }

    /// Fails every call with `GraphError::BackendUnavailable`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::from_behavior(Behavior::Unavailable(reason.into()))
    }

    /// Sleeps for `delay` before responding.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_system_prompt(&self) -> Option<String> {
        self.last_system_prompt
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(
        &self,
        messages: &[Message],
        system_prompt: Option<&str>,
    ) -> Result<LlmResponse, GraphError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_system_prompt.lock() {
            *guard = system_prompt.map(str::to_string);
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.behavior {
            Behavior::Fixed(r) => Ok(r.clone()),
            Behavior::Script(queue, last) => {
                let next = queue
                    .lock()
                    .map_err(|_| GraphError::ExecutionFailed("mock script lock poisoned".into()))?
                    .pop_front();
                Ok(next.unwrap_or_else(|| last.clone()))
            }
            Behavior::Func(f) => Ok(f(messages, system_prompt)),
            Behavior::Unavailable(reason) => Err(GraphError::BackendUnavailable(reason.clone())),
        }
    }
}
