//! Turn submission and history clearing for the App.

use tracing::{debug, info};

use crate::controller::drive_turn;
use crate::models::ChatMode;
use crate::state::TurnRejected;

use super::{App, AppMessage};

impl App {
    /// Submit the input box as a new turn and stream the reply on a task.
    ///
    /// Blank input and input submitted while a turn is in flight are ignored;
    /// the input box keeps its text in both cases.
    pub fn submit_input(&mut self, mode: ChatMode) {
        let prompt = self.input.content().to_string();
        let request = match self.session.begin_turn(&prompt, mode) {
            Ok(request) => request,
            Err(TurnRejected::EmptyPrompt) => return,
            Err(TurnRejected::Busy) => {
                debug!("Ignoring submit while a turn is in flight");
                return;
            }
        };

        self.input.clear();
        self.notice = None;
        self.scroll_to_bottom();

        let client = self.client.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            drive_turn(&client, &request, |update| {
                // The receiver only goes away on shutdown.
                let _ = tx.send(AppMessage::from(update));
            })
            .await;
        });
    }

    /// Ask for confirmation before clearing. Ignored while a turn is in flight.
    pub fn request_clear(&mut self) {
        if self.is_streaming() {
            self.notice = Some("Wait for the reply to finish before clearing".to_string());
        } else {
            self.confirm_clear = true;
        }
        self.mark_dirty();
    }

    pub fn cancel_clear(&mut self) {
        self.confirm_clear = false;
        self.mark_dirty();
    }

    /// Clear the transcript locally and tell the server, without waiting.
    pub fn confirm_clear(&mut self) {
        self.confirm_clear = false;
        self.mark_dirty();

        if self.session.clear().is_err() {
            return;
        }
        self.region_cache.clear();
        self.scroll_to_bottom();
        info!(session_id = %self.session.session_id(), "Conversation cleared");

        let client = self.client.clone();
        let session_id = self.session.session_id().to_string();
        tokio::spawn(async move {
            client.clear_history_logged(&session_id).await;
        });
    }
}
