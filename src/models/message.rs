use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::stream::{AgentId, StreamEvent};

/// Prefix stored in front of a user prompt sent in multi-agent mode.
pub const MULTI_AGENT_PREFIX: &str = "🔀 [multi-agent analysis] ";

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Which endpoint a turn talks to and how its reply is laid out
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    /// One stream of raw text
    #[default]
    Normal,
    /// Critical, positive and synthesis panels from newline-delimited JSON
    MultiAgent,
}

/// An independently rendered part of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Main text of a user message or a normal reply
    Content,
    Critical,
    Positive,
    Synthesis,
}

impl From<AgentId> for Region {
    fn from(agent: AgentId) -> Self {
        match agent {
            AgentId::Critical => Region::Critical,
            AgentId::Positive => Region::Positive,
            AgentId::Synthesis => Region::Synthesis,
        }
    }
}

/// Accumulated text of one agent panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentBuffer {
    pub text: String,
    pub is_streaming: bool,
    /// Bumped on every change; keys the render cache
    pub version: u64,
}

impl AgentBuffer {
    fn streaming(is_streaming: bool) -> Self {
        Self {
            text: String::new(),
            is_streaming,
            version: 0,
        }
    }

    fn push(&mut self, text: &str) {
        self.text.push_str(text);
        self.version += 1;
    }
}

/// The three panels of a multi-agent reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentPanels {
    pub critical: AgentBuffer,
    pub positive: AgentBuffer,
    pub synthesis: AgentBuffer,
    /// Synthesis stays hidden until this flips, even when it has text
    pub synthesis_revealed: bool,
}

impl AgentPanels {
    /// Fresh panels for a reply that is about to stream.
    ///
    /// Critical and positive stream from the start; synthesis waits for
    /// its start signal.
    pub fn new() -> Self {
        Self {
            critical: AgentBuffer::streaming(true),
            positive: AgentBuffer::streaming(true),
            synthesis: AgentBuffer::streaming(false),
            synthesis_revealed: false,
        }
    }

    pub fn buffer(&self, agent: AgentId) -> &AgentBuffer {
        match agent {
            AgentId::Critical => &self.critical,
            AgentId::Positive => &self.positive,
            AgentId::Synthesis => &self.synthesis,
        }
    }

    pub fn buffer_mut(&mut self, agent: AgentId) -> &mut AgentBuffer {
        match agent {
            AgentId::Critical => &mut self.critical,
            AgentId::Positive => &mut self.positive,
            AgentId::Synthesis => &mut self.synthesis,
        }
    }

    fn reveal_synthesis(&mut self) {
        if !self.synthesis_revealed {
            self.synthesis_revealed = true;
            self.synthesis.version += 1;
        }
        self.synthesis.is_streaming = true;
    }
}

impl Default for AgentPanels {
    fn default() -> Self {
        Self::new()
    }
}

/// One side of a turn in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    /// Text of a user message or a normal reply
    pub content: String,
    pub created_at: DateTime<Local>,
    pub mode: ChatMode,
    /// True until the stream for this message ends or fails
    pub is_streaming: bool,
    /// Version of [`Region::Content`]; keys the render cache
    pub render_version: u64,
    /// Present only on multi-agent replies
    pub panels: Option<AgentPanels>,
}

impl Message {
    /// A user prompt as it appears in the transcript.
    pub fn user(prompt: &str, mode: ChatMode) -> Self {
        let content = match mode {
            ChatMode::Normal => prompt.to_string(),
            ChatMode::MultiAgent => format!("{}{}", MULTI_AGENT_PREFIX, prompt),
        };
        Self {
            role: MessageRole::User,
            content,
            created_at: Local::now(),
            mode,
            is_streaming: false,
            render_version: 0,
            panels: None,
        }
    }

    /// An empty reply that is about to stream.
    pub fn assistant_placeholder(mode: ChatMode) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: String::new(),
            created_at: Local::now(),
            mode,
            is_streaming: true,
            render_version: 0,
            panels: match mode {
                ChatMode::Normal => None,
                ChatMode::MultiAgent => Some(AgentPanels::new()),
            },
        }
    }

    /// Apply one decoded event and report which region changed.
    ///
    /// Returns `None` when the event does not fit this message, such as an
    /// agent delta on a normal reply.
    pub fn apply_event(&mut self, event: &StreamEvent) -> Option<Region> {
        match event {
            StreamEvent::TextDelta(text) => {
                if self.panels.is_some() || text.is_empty() {
                    return None;
                }
                self.content.push_str(text);
                self.render_version += 1;
                Some(Region::Content)
            }
            StreamEvent::AgentDelta { agent, text } => {
                let panels = self.panels.as_mut()?;
                if *agent == AgentId::Synthesis {
                    panels.reveal_synthesis();
                }
                panels.buffer_mut(*agent).push(text);
                Some(Region::from(*agent))
            }
            StreamEvent::SynthesisStart => {
                let panels = self.panels.as_mut()?;
                panels.reveal_synthesis();
                Some(Region::Synthesis)
            }
            StreamEvent::BackendError { message } => Some(self.append_error(message)),
        }
    }

    /// Append the inline error marker that ends a failed turn.
    ///
    /// Multi-agent replies carry it in the synthesis panel, which is revealed
    /// so the error is visible.
    pub fn append_error(&mut self, message: &str) -> Region {
        let text = format!("\n\n❌ Error: {}", message);
        match self.panels.as_mut() {
            Some(panels) => {
                panels.reveal_synthesis();
                panels.synthesis.push(&text);
                Region::Synthesis
            }
            None => {
                self.content.push_str(&text);
                self.render_version += 1;
                Region::Content
            }
        }
    }

    /// Clear every streaming flag on this message.
    pub fn finish_streaming(&mut self) {
        if self.is_streaming {
            self.is_streaming = false;
            self.render_version += 1;
        }
        if let Some(panels) = self.panels.as_mut() {
            for buffer in [
                &mut panels.critical,
                &mut panels.positive,
                &mut panels.synthesis,
            ] {
                if buffer.is_streaming {
                    buffer.is_streaming = false;
                    buffer.version += 1;
                }
            }
        }
    }

    /// Version of a region, used to key cached renders.
    pub fn region_version(&self, region: Region) -> u64 {
        match (region, self.panels.as_ref()) {
            (Region::Content, _) => self.render_version,
            (Region::Critical, Some(p)) => p.critical.version,
            (Region::Positive, Some(p)) => p.positive.version,
            (Region::Synthesis, Some(p)) => p.synthesis.version,
            (_, None) => 0,
        }
    }

    /// Whether a region is still receiving text.
    pub fn region_streaming(&self, region: Region) -> bool {
        match (region, self.panels.as_ref()) {
            (Region::Content, _) => self.is_streaming,
            (Region::Critical, Some(p)) => p.critical.is_streaming,
            (Region::Positive, Some(p)) => p.positive.is_streaming,
            (Region::Synthesis, Some(p)) => p.synthesis.is_streaming,
            (_, None) => false,
        }
    }

    /// Text of a region.
    pub fn region_text(&self, region: Region) -> &str {
        match (region, self.panels.as_ref()) {
            (Region::Content, _) => &self.content,
            (Region::Critical, Some(p)) => &p.critical.text,
            (Region::Positive, Some(p)) => &p.positive.text,
            (Region::Synthesis, Some(p)) => &p.synthesis.text,
            (_, None) => "",
        }
    }

    /// True for a multi-agent reply whose synthesis panel may be shown.
    pub fn synthesis_visible(&self) -> bool {
        self.panels
            .as_ref()
            .map(|p| p.synthesis_revealed)
            .unwrap_or(false)
    }
}
