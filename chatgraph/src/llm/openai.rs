//! OpenAI Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Requires `OPENAI_API_KEY` (or explicit config). Tools bound with `with_tools`
//! enable tool calling; the conversation is sent with assistant tool calls and
//! tool results correlated by call id, so the model sees the whole exchange.
//!
//! **Interaction**: Implements `LlmClient`; used by `ReasoningNode` like `MockLlm`.
//! Depends on `async_openai` (feature `openai`).

use async_trait::async_trait;
use serde_json::Value;

use crate::error::GraphError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::{Message, Origin};
use crate::state::ToolCall;
use crate::tool_source::ToolSpec;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionMessageToolCall, ChatCompletionMessageToolCalls,
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestToolMessageArgs,
        ChatCompletionRequestUserMessage, ChatCompletionTool, ChatCompletionToolChoiceOption,
        ChatCompletionTools, CreateChatCompletionRequestArgs, FunctionCall, FunctionObject,
        ToolChoiceOptions,
    },
    Client,
};

use super::ToolChoiceMode;

/// OpenAI Chat Completions client implementing `LlmClient`.
///
/// Uses `OPENAI_API_KEY` from the environment by default; or provide config via
/// `ChatOpenAI::with_config`. Set tools (e.g. from `ToolSource::list_tools()`) to
/// enable tool calls in the response.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    tools: Option<Vec<ToolSpec>>,
    temperature: Option<f32>,
    tool_choice: Option<ToolChoiceMode>,
}

fn build_error(e: impl std::fmt::Display) -> GraphError {
    GraphError::ExecutionFailed(format!("OpenAI request build failed: {}", e))
}

/// Transport failures mean the API could not be reached; anything else is a
/// request the API answered with an error.
fn api_error(e: OpenAIError) -> GraphError {
    match &e {
        OpenAIError::Reqwest(_) | OpenAIError::StreamError(_) => {
            GraphError::BackendUnavailable(format!("OpenAI API unreachable: {}", e))
        }
        _ => GraphError::ExecutionFailed(format!("OpenAI API error: {}", e)),
    }
}

/// Tool arguments travel as a JSON string on the wire.
fn arguments_to_wire(arguments: &Value) -> String {
    match arguments {
        Value::String(s) => s.clone(),
        Value::Null => "{}".to_string(),
        other => other.to_string(),
    }
}

fn arguments_from_wire(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Object(Default::default());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

impl ChatOpenAI {
    /// Build client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            tools: None,
            temperature: None,
            tool_choice: None,
        }
    }

    /// Build client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            tools: None,
            temperature: None,
            tool_choice: None,
        }
    }

    /// Set tools for this completion (enables tool_calls in response).
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set temperature (0-2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set tool choice mode (auto, none, required). Overrides API default when tools are present.
    pub fn with_tool_choice(mut self, mode: ToolChoiceMode) -> Self {
        self.tool_choice = Some(mode);
        self
    }

    /// Converts the conversation to request messages, system prompt first.
    fn messages_to_request(
        messages: &[Message],
        system_prompt: Option<&str>,
    ) -> Result<Vec<ChatCompletionRequestMessage>, GraphError> {
        let mut out = Vec::with_capacity(messages.len() + 1);
        if let Some(prompt) = system_prompt {
            out.push(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage::from(prompt),
            ));
        }
        for m in messages {
            let req = match m.origin() {
                Origin::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(m.content()),
                ),
                Origin::Assistant if m.has_tool_calls() => {
                    let calls: Vec<ChatCompletionMessageToolCalls> = m
                        .tool_calls()
                        .iter()
                        .map(|tc| {
                            ChatCompletionMessageToolCalls::Function(ChatCompletionMessageToolCall {
                                id: tc.id.clone(),
                                function: FunctionCall {
                                    name: tc.name.clone(),
                                    arguments: arguments_to_wire(&tc.arguments),
                                },
                            })
                        })
                        .collect();
                    let mut args = ChatCompletionRequestAssistantMessageArgs::default();
                    args.tool_calls(calls);
                    if !m.content().is_empty() {
                        args.content(m.content());
                    }
                    ChatCompletionRequestMessage::Assistant(args.build().map_err(build_error)?)
                }
                Origin::Assistant => ChatCompletionRequestMessage::Assistant(m.content().into()),
                Origin::ToolResult => ChatCompletionRequestMessage::Tool(
                    ChatCompletionRequestToolMessageArgs::default()
                        .content(m.content())
                        .tool_call_id(m.tool_call_id().unwrap_or_default())
                        .build()
                        .map_err(build_error)?,
                ),
            };
            out.push(req);
        }
        Ok(out)
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(
        &self,
        messages: &[Message],
        system_prompt: Option<&str>,
    ) -> Result<LlmResponse, GraphError> {
        let openai_messages = Self::messages_to_request(messages, system_prompt)?;
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(openai_messages);

        if let Some(ref tools) = self.tools {
            let chat_tools: Vec<ChatCompletionTools> = tools
                .iter()
                .map(|t| {
                    ChatCompletionTools::Function(ChatCompletionTool {
                        function: FunctionObject {
                            name: t.name.clone(),
                            description: t.description.clone(),
                            parameters: Some(t.input_schema.clone()),
                            ..Default::default()
                        },
                    })
                })
                .collect();
            if !chat_tools.is_empty() {
                args.tools(chat_tools);
            }
        }

        if let Some(t) = self.temperature {
            args.temperature(t);
        }

        if let Some(mode) = self.tool_choice {
            let opt = match mode {
                ToolChoiceMode::Auto => ToolChoiceOptions::Auto,
                ToolChoiceMode::None => ToolChoiceOptions::None,
                ToolChoiceMode::Required => ToolChoiceOptions::Required,
            };
            args.tool_choice(ChatCompletionToolChoiceOption::Mode(opt));
        }

        let request = args.build().map_err(build_error)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(api_error)?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            GraphError::ExecutionFailed("OpenAI returned no choices".to_string())
        })?;

        let msg = choice.message;
        let content = msg.content.unwrap_or_default();
        let tool_calls: Vec<ToolCall> = msg
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tc| {
                if let ChatCompletionMessageToolCalls::Function(f) = tc {
                    Some(ToolCall::new(
                        f.id,
                        f.function.name,
                        arguments_from_wire(&f.function.arguments),
                    ))
                } else {
                    None
                }
            })
            .collect();

        Ok(LlmResponse {
            content,
            tool_calls,
        })
    }
}
