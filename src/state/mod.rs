//! Conversation state owned by the controller and the TUI.

pub mod session;
pub mod store;

pub use session::{Session, TurnPhase, TurnRejected};
pub use store::MessageStore;
