//! Common test utilities for integration tests.
//!
//! ```ignore
//! mod common;
//! use common::*;
//!
//! let mock = MockBackend::new().with_text_chunks(&["He", "llo"]).build();
//! let mut controller = controller_for(&mock);
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;

use roundtable::{App, ChatClient, ChatController};

pub const SESSION_ID: &str = "test-session";

pub fn client_for(mock: &MockHttpClient) -> ChatClient {
    ChatClient::new(BASE_URL, Arc::new(mock.clone()))
}

pub fn controller_for(mock: &MockHttpClient) -> ChatController {
    ChatController::new(client_for(mock), SESSION_ID)
}

pub fn app_for(mock: &MockHttpClient) -> App {
    App::new(client_for(mock), SESSION_ID)
}

/// Drain every message the turn task sends until the turn finishes.
pub async fn run_app_turn(app: &mut App) {
    let mut rx = app
        .message_rx
        .take()
        .expect("message receiver already taken");
    while let Some(msg) = rx.recv().await {
        let finished = msg == roundtable::AppMessage::TurnFinished;
        app.handle_message(msg);
        if finished {
            break;
        }
    }
    app.message_rx = Some(rx);
}

/// Text content of a rendered line.
pub fn line_text(line: &ratatui::text::Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}
