//! Conversation state and the per-turn state machine.

use thiserror::Error;
use tracing::debug;

use super::store::MessageStore;
use crate::models::{ChatMode, ChatRequest, Message, Region};
use crate::stream::StreamEvent;

/// Where the current turn is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPhase {
    /// Ready for a new prompt
    #[default]
    Idle,
    /// Messages created, request not yet answered
    Sending,
    /// Response body is being applied
    Streaming,
    /// Stream ended or failed; flags being cleared
    Finalizing,
}

/// Why a prompt was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnRejected {
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("a response is still streaming")]
    Busy,
}

/// One conversation: the transcript plus the state of the active turn.
#[derive(Debug, Clone)]
pub struct Session {
    session_id: String,
    store: MessageStore,
    phase: TurnPhase,
    /// Index of the assistant message being streamed
    active: Option<usize>,
}

impl Session {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            store: MessageStore::new(),
            phase: TurnPhase::Idle,
            active: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn messages(&self) -> &MessageStore {
        &self.store
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != TurnPhase::Idle
    }

    /// Index of the assistant message of the turn in flight.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_message(&self) -> Option<&Message> {
        self.active.and_then(|i| self.store.get(i))
    }

    /// Start a turn: record the prompt and an empty reply.
    ///
    /// Returns the request to send. Fails without touching the transcript
    /// when the prompt is blank or another turn is in flight.
    pub fn begin_turn(&mut self, prompt: &str, mode: ChatMode) -> Result<ChatRequest, TurnRejected> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(TurnRejected::EmptyPrompt);
        }
        if self.is_busy() {
            return Err(TurnRejected::Busy);
        }

        self.store.append(Message::user(prompt, mode));
        let index = self.store.append(Message::assistant_placeholder(mode));
        self.active = Some(index);
        self.phase = TurnPhase::Sending;
        debug!(index, ?mode, "Turn started");

        Ok(ChatRequest::new(prompt, self.session_id.clone(), mode))
    }

    /// Apply one decoded event to the reply in flight.
    pub fn apply_event(&mut self, event: &StreamEvent) -> Option<Region> {
        let index = self.active?;
        if self.phase == TurnPhase::Sending {
            self.phase = TurnPhase::Streaming;
        }
        self.store.get_mut(index)?.apply_event(event)
    }

    /// Mark the response as started, even if no event has arrived yet.
    pub fn mark_streaming(&mut self) {
        if self.phase == TurnPhase::Sending {
            self.phase = TurnPhase::Streaming;
        }
    }

    /// Show a turn-ending error inline on the reply in flight.
    pub fn fail_turn(&mut self, message: &str) -> Option<Region> {
        let index = self.active?;
        self.phase = TurnPhase::Finalizing;
        self.store
            .get_mut(index)
            .map(|msg| msg.append_error(message))
    }

    /// Clear streaming flags and return to idle. Safe to call more than once.
    pub fn finish_turn(&mut self) {
        if let Some(index) = self.active.take() {
            self.phase = TurnPhase::Finalizing;
            if let Some(msg) = self.store.get_mut(index) {
                msg.finish_streaming();
            }
            debug!(index, "Turn finished");
        }
        self.phase = TurnPhase::Idle;
    }

    /// Drop the whole transcript.
    pub fn clear(&mut self) -> Result<(), TurnRejected> {
        if self.is_busy() {
            return Err(TurnRejected::Busy);
        }
        self.store.clear();
        Ok(())
    }
}
