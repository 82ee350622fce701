//! AppMessage enum for async communication within the application.

use crate::controller::TurnUpdate;
use crate::stream::StreamEvent;

/// Messages sent from the turn task to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    /// The server accepted the request
    StreamStarted,
    /// One decoded event for the reply in flight
    StreamEvent(StreamEvent),
    /// The turn failed; the text goes after the error marker
    StreamError { error: String },
    /// Always the last message of a turn
    TurnFinished,
}

impl From<TurnUpdate> for AppMessage {
    fn from(update: TurnUpdate) -> Self {
        match update {
            TurnUpdate::Streaming => AppMessage::StreamStarted,
            TurnUpdate::Event(event) => AppMessage::StreamEvent(event),
            TurnUpdate::Failed(error) => AppMessage::StreamError { error },
            TurnUpdate::Finished => AppMessage::TurnFinished,
        }
    }
}

impl From<AppMessage> for TurnUpdate {
    fn from(msg: AppMessage) -> Self {
        match msg {
            AppMessage::StreamStarted => TurnUpdate::Streaming,
            AppMessage::StreamEvent(event) => TurnUpdate::Event(event),
            AppMessage::StreamError { error } => TurnUpdate::Failed(error),
            AppMessage::TurnFinished => TurnUpdate::Finished,
        }
    }
}
