//! Semantic events produced by the stream decoder.

use thiserror::Error;

/// One of the three perspectives streamed in multi-agent mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentId {
    Critical,
    Positive,
    Synthesis,
}

impl AgentId {
    /// Map the backend's agent name onto a panel.
    ///
    /// Returns `None` for names this client does not render.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "CriticalAnalyst" => Some(AgentId::Critical),
            "PositiveAdvocate" => Some(AgentId::Positive),
            "Synthesizer" => Some(AgentId::Synthesis),
            _ => None,
        }
    }

    /// Backend name for this agent.
    pub fn wire_name(&self) -> &'static str {
        match self {
            AgentId::Critical => "CriticalAnalyst",
            AgentId::Positive => "PositiveAdvocate",
            AgentId::Synthesis => "Synthesizer",
        }
    }

    /// Panel title shown in the transcript.
    pub fn label(&self) -> &'static str {
        match self {
            AgentId::Critical => "Critical Analyst",
            AgentId::Positive => "Positive Advocate",
            AgentId::Synthesis => "Synthesis",
        }
    }
}

/// A decoded increment from a chat response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Raw text appended to a normal-mode reply
    TextDelta(String),
    /// Text fragment for one agent panel
    AgentDelta { agent: AgentId, text: String },
    /// The synthesis panel should become visible
    SynthesisStart,
    /// The backend reported a failure inside the stream
    BackendError { message: String },
}

/// A line of the multi-agent protocol that could not be decoded.
///
/// Never fatal: the decoder logs it and moves on to the next line.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON line: {source}")]
    InvalidJson {
        line: String,
        #[source]
        source: serde_json::Error,
    },
}
