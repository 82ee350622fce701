//! Runs chat turns: send the prompt, apply the streamed reply, finalize.
//!
//! [`drive_turn`] is the single consumer loop. The headless
//! [`ChatController`] runs it inline; the TUI runs it on a spawned task and
//! forwards each [`TurnUpdate`] to the event loop.

use futures::StreamExt;
use tracing::{error, info};

use crate::client::ChatClient;
use crate::error::ChatError;
use crate::models::{ChatMode, ChatRequest, Message, Region};
use crate::state::{Session, TurnRejected};
use crate::stream::StreamEvent;

/// Progress of one turn, in the order it happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnUpdate {
    /// The server accepted the request and the body is streaming
    Streaming,
    /// One decoded event
    Event(StreamEvent),
    /// The turn failed; carries the text shown after the error marker
    Failed(String),
    /// Always the last update of a turn
    Finished,
}

/// What happened during a turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnSummary {
    pub events: usize,
    pub error: Option<String>,
}

impl TurnSummary {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Send `request` and report every step to `on_update`.
///
/// Never fails: errors are reported as [`TurnUpdate::Failed`], and
/// [`TurnUpdate::Finished`] is always delivered last. The response stream is
/// dropped before returning.
pub async fn drive_turn<F>(client: &ChatClient, request: &ChatRequest, mut on_update: F) -> TurnSummary
where
    F: FnMut(TurnUpdate),
{
    let mut summary = TurnSummary::default();
    info!(mode = ?request.mode, prompt_len = request.prompt.len(), "Sending chat turn");

    match client.open_stream(request).await {
        Ok(mut events) => {
            on_update(TurnUpdate::Streaming);
            while let Some(item) = events.next().await {
                match item {
                    Ok(event) => {
                        summary.events += 1;
                        on_update(TurnUpdate::Event(event));
                    }
                    Err(e) => {
                        let message = ChatError::from(e).user_message();
                        error!(error = %message, "Chat stream broke");
                        on_update(TurnUpdate::Failed(message.clone()));
                        summary.error = Some(message);
                        break;
                    }
                }
            }
        }
        Err(e) => {
            let message = e.user_message();
            error!(error = %message, "Chat request failed");
            on_update(TurnUpdate::Failed(message.clone()));
            summary.error = Some(message);
        }
    }

    info!(events = summary.events, failed = summary.error.is_some(), "Chat turn finished");
    on_update(TurnUpdate::Finished);
    summary
}

/// Apply one update to the session, returning the region it changed.
pub fn apply_update(session: &mut Session, update: &TurnUpdate) -> Option<Region> {
    match update {
        TurnUpdate::Streaming => {
            session.mark_streaming();
            None
        }
        TurnUpdate::Event(event) => session.apply_event(event),
        TurnUpdate::Failed(message) => session.fail_turn(message),
        TurnUpdate::Finished => {
            session.finish_turn();
            None
        }
    }
}

/// Receives the assistant message as a headless turn progresses.
pub trait TurnObserver {
    /// An event was applied to `message`.
    fn on_event(&mut self, _event: &StreamEvent, _message: &Message) {}

    /// The turn failed; the error is already on `message`.
    fn on_error(&mut self, _error: &str, _message: &Message) {}

    /// Streaming flags are cleared.
    fn on_finished(&mut self, _message: &Message) {}
}

/// Observer that ignores everything.
impl TurnObserver for () {}

/// Headless controller: one session, turns run on the calling task.
#[derive(Debug)]
pub struct ChatController {
    client: ChatClient,
    session: Session,
}

impl ChatController {
    pub fn new(client: ChatClient, session_id: impl Into<String>) -> Self {
        Self {
            client,
            session: Session::new(session_id),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn client(&self) -> &ChatClient {
        &self.client
    }

    /// Run a whole turn for `prompt`.
    ///
    /// Rejected prompts leave the transcript untouched. Once accepted, the
    /// turn always completes and the session is idle again on return.
    pub async fn send<O>(
        &mut self,
        prompt: &str,
        mode: ChatMode,
        observer: &mut O,
    ) -> Result<TurnSummary, TurnRejected>
    where
        O: TurnObserver + ?Sized,
    {
        let request = self.session.begin_turn(prompt, mode)?;

        let client = &self.client;
        let session = &mut self.session;
        let summary = drive_turn(client, &request, |update| {
            apply_update(session, &update);

            let index = session
                .active_index()
                .or_else(|| session.messages().len().checked_sub(1));
            let Some(message) = index.and_then(|i| session.messages().get(i)) else {
                return;
            };
            match &update {
                TurnUpdate::Event(event) => observer.on_event(event, message),
                TurnUpdate::Failed(error) => observer.on_error(error, message),
                TurnUpdate::Finished => observer.on_finished(message),
                TurnUpdate::Streaming => {}
            }
        })
        .await;

        Ok(summary)
    }

    /// Clear the transcript here and, best effort, on the server.
    pub async fn clear(&mut self) -> Result<(), TurnRejected> {
        self.session.clear()?;
        self.client
            .clear_history_logged(self.session.session_id())
            .await;
        Ok(())
    }
}
