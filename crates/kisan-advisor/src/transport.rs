//! The generative-model transport port.
//!
//! The advisor never speaks a vendor wire protocol. It builds a
//! [`GenerateRequest`], hands it to an [`AiTransport`], and gets back raw text
//! plus optional grounding metadata. Multi-turn chat goes through a
//! [`ChatChannel`] obtained from [`AiTransport::start_chat`].

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use crate::citation::GroundingMetadata;

// =============================================================================
// Requests and responses
// =============================================================================

/// One piece of request content.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    /// Base64 image payload without any `data:` URL prefix.
    InlineImage { mime_type: String, data: String },
}

/// Shape the model is asked to reply in.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResponseFormat {
    #[default]
    Text,
    /// A strict JSON array; the value is the item schema hint.
    JsonArray(Value),
}

/// A single-shot generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub system_instruction: Option<String>,
    pub parts: Vec<Part>,
    pub temperature: Option<f32>,
    pub response_format: ResponseFormat,
    /// Let the model ground its answer with a web search.
    pub web_search: bool,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_instruction: None,
            parts: Vec::new(),
            temperature: None,
            response_format: ResponseFormat::Text,
            web_search: false,
        }
    }

    pub fn system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::Text(text.into()));
        self
    }

    pub fn image(mut self, mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        self.parts.push(Part::InlineImage {
            mime_type: mime_type.into(),
            data: data.into(),
        });
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn json_array(mut self, item_schema: Value) -> Self {
        self.response_format = ResponseFormat::JsonArray(item_schema);
        self
    }

    pub fn web_search(mut self) -> Self {
        self.web_search = true;
        self
    }

    /// All text parts joined with newlines.
    pub fn prompt_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Text(t) => Some(t.as_str()),
                Part::InlineImage { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// What the model sent back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateResponse {
    pub text: Option<String>,
    pub grounding: Option<GroundingMetadata>,
}

impl GenerateResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            grounding: None,
        }
    }

    pub fn with_grounding(mut self, grounding: GroundingMetadata) -> Self {
        self.grounding = Some(grounding);
        self
    }

    /// The response text, or `None` when absent or empty.
    pub fn non_empty_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// Failure reported by a transport.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Fixed configuration a chat channel is opened with.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSetup {
    pub model: String,
    pub system_instruction: String,
}

// =============================================================================
// Traits
// =============================================================================

/// A live multi-turn exchange. History is held by the channel.
pub trait ChatChannel: Send {
    fn send(
        &mut self,
        message: &str,
    ) -> impl Future<Output = Result<GenerateResponse, TransportError>> + Send;
}

/// Access to a generative model.
pub trait AiTransport: Send + Sync {
    type Chat: ChatChannel;

    /// Run a single-shot generation.
    fn generate(
        &self,
        request: &GenerateRequest,
    ) -> impl Future<Output = Result<GenerateResponse, TransportError>> + Send;

    /// Open a new chat channel. No network traffic happens until the first
    /// `send`.
    fn start_chat(&self, setup: &ChatSetup) -> Self::Chat;
}

// =============================================================================
// Mock implementation
// =============================================================================

#[derive(Debug, Default)]
struct MockState {
    outcomes: VecDeque<Result<GenerateResponse, TransportError>>,
    requests: Vec<GenerateRequest>,
    chat_setups: Vec<ChatSetup>,
    chat_messages: Vec<String>,
}

/// Scripted transport for tests and offline development.
///
/// Outcomes are queued up front and consumed in order by both `generate` and
/// chat `send` calls. An exhausted queue answers with
/// [`TransportError::Unavailable`]. Clones share the same script and logs.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        lock_state(&self.state)
    }

    /// Queue a successful text response.
    pub fn push_text(&self, text: impl Into<String>) -> &Self {
        self.push_response(GenerateResponse::from_text(text))
    }

    pub fn push_response(&self, response: GenerateResponse) -> &Self {
        self.lock().outcomes.push_back(Ok(response));
        self
    }

    pub fn push_error(&self, error: TransportError) -> &Self {
        self.lock().outcomes.push_back(Err(error));
        self
    }

    /// Every single-shot request received so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.lock().requests.clone()
    }

    /// Every chat message received so far, across all channels.
    pub fn chat_messages(&self) -> Vec<String> {
        self.lock().chat_messages.clone()
    }

    /// Number of chat channels opened.
    pub fn chats_started(&self) -> usize {
        self.lock().chat_setups.len()
    }

    pub fn last_chat_setup(&self) -> Option<ChatSetup> {
        self.lock().chat_setups.last().cloned()
    }

    /// Outcomes still queued.
    pub fn remaining(&self) -> usize {
        self.lock().outcomes.len()
    }
}

fn lock_state(state: &Mutex<MockState>) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn next_outcome(state: &mut MockState) -> Result<GenerateResponse, TransportError> {
    state
        .outcomes
        .pop_front()
        .unwrap_or_else(|| Err(TransportError::Unavailable("no scripted response".to_string())))
}

impl AiTransport for MockTransport {
    type Chat = MockChat;

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, TransportError> {
        let mut state = self.lock();
        state.requests.push(request.clone());
        tracing::debug!(model = %request.model, "Mock generate");
        next_outcome(&mut state)
    }

    fn start_chat(&self, setup: &ChatSetup) -> MockChat {
        self.lock().chat_setups.push(setup.clone());
        MockChat {
            state: Arc::clone(&self.state),
        }
    }
}

/// Chat channel handed out by [`MockTransport`].
#[derive(Debug)]
pub struct MockChat {
    state: Arc<Mutex<MockState>>,
}

impl ChatChannel for MockChat {
    async fn send(&mut self, message: &str) -> Result<GenerateResponse, TransportError> {
        let mut state = lock_state(&self.state);
        state.chat_messages.push(message.to_string());
        next_outcome(&mut state)
    }
}
