//! Multi-turn chat session with reset-on-failure.
//!
//! A session holds at most one live chat channel. The channel is opened
//! lazily by the first message and thrown away as soon as the transport
//! fails, so the next message always starts a fresh conversation. There is
//! no retry.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use kisan_core::types::Language;

use crate::error::AdvisorError;
use crate::prompts::chat_directive;
use crate::transport::{AiTransport, ChatChannel, ChatSetup};
use crate::validation::validate_chat_message;

/// Whether a session currently holds a live channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Absent,
    Active,
}

struct LiveChat<C> {
    id: Uuid,
    started_at: DateTime<Utc>,
    channel: C,
    turns: u32,
}

/// Caller-owned chat session. Independent sessions share nothing.
pub struct ConversationSession<T: AiTransport> {
    transport: Arc<T>,
    setup: ChatSetup,
    live: Option<LiveChat<T::Chat>>,
}

impl<T: AiTransport> ConversationSession<T> {
    /// A session in the `Absent` state. No channel is opened yet.
    pub fn create(transport: Arc<T>, setup: ChatSetup) -> Self {
        Self {
            transport,
            setup,
            live: None,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.live {
            Some(_) => SessionState::Active,
            None => SessionState::Absent,
        }
    }

    /// Successful turns on the current channel; zero when absent.
    pub fn turn_count(&self) -> u32 {
        self.live.as_ref().map_or(0, |l| l.turns)
    }

    /// Identifier of the current channel, fresh for every channel opened.
    pub fn session_id(&self) -> Option<Uuid> {
        self.live.as_ref().map(|l| l.id)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.live.as_ref().map(|l| l.started_at)
    }

    /// Drop the live channel, if any.
    pub fn destroy(&mut self) {
        if let Some(live) = self.live.take() {
            debug!(session_id = %live.id, turns = live.turns, "Chat session destroyed");
        }
    }

    /// Send one message and return the reply text.
    ///
    /// The message is validated first; an invalid message leaves the session
    /// untouched. A transport failure discards the channel before the error
    /// is returned. An empty reply is an error but keeps the channel.
    pub async fn send_message(
        &mut self,
        text: &str,
        language: Language,
    ) -> Result<String, AdvisorError> {
        validate_chat_message(text)?;

        let transport = &self.transport;
        let setup = &self.setup;
        let live = self.live.get_or_insert_with(|| {
            let live = LiveChat {
                id: Uuid::new_v4(),
                started_at: Utc::now(),
                channel: transport.start_chat(setup),
                turns: 0,
            };
            info!(session_id = %live.id, model = %setup.model, "Chat session started");
            live
        });

        let message = format!("{}{}", text, chat_directive(language));
        match live.channel.send(&message).await {
            Ok(response) => {
                live.turns += 1;
                match response.non_empty_text() {
                    Some(reply) => Ok(reply.to_string()),
                    None => Err(AdvisorError::EmptyResponse),
                }
            }
            Err(e) => {
                warn!(session_id = %live.id, error = %e, "Chat transport failed; resetting session");
                self.live = None;
                Err(AdvisorError::Transport(e))
            }
        }
    }
}
