//! roundtable: a terminal chat client for a streaming chat backend.
//!
//! Normal turns stream plain text. Multi-agent turns stream three
//! perspectives (critical, positive, synthesis) as newline-delimited JSON
//! and render them as separate panels.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
pub mod stream;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod widgets;

pub use app::{App, AppMessage};
pub use client::ChatClient;
pub use config::ClientConfig;
pub use controller::{drive_turn, ChatController, TurnObserver, TurnSummary, TurnUpdate};
pub use error::{ChatError, ConfigError};
pub use models::{ChatMode, ChatRequest, Message, MessageRole, Region};
pub use state::{MessageStore, Session, TurnPhase, TurnRejected};
pub use stream::{AgentId, StreamEvent};
