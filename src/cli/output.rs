//! Streams a headless turn to a writer as it arrives.

use std::io::Write;

use crate::controller::TurnObserver;
use crate::models::{Message, Region, MULTI_AGENT_PREFIX};
use crate::stream::{AgentId, StreamEvent};

/// Prints reply text as it streams.
///
/// Multi-agent output is labelled with the agent whenever the speaker
/// changes, since deltas from different agents interleave.
pub struct PrintObserver<W: Write> {
    out: W,
    last_region: Option<Region>,
}

impl<W: Write> PrintObserver<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_region: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print a label if `region` is not the one last printed to. Returns
    /// whether a label was printed.
    fn switch_to(&mut self, region: Region, label: &str) -> bool {
        if self.last_region == Some(region) {
            return false;
        }
        if self.last_region.is_some() {
            let _ = writeln!(self.out);
            let _ = writeln!(self.out);
        }
        let _ = writeln!(self.out, "[{}]", label);
        self.last_region = Some(region);
        true
    }

    fn write_text(&mut self, text: &str) {
        let _ = write!(self.out, "{}", text);
        let _ = self.out.flush();
    }

    /// Errors of a multi-agent turn belong to the synthesis panel.
    fn write_error(&mut self, error: &str, message: &Message) {
        let labelled = message.panels.is_some()
            && self.switch_to(Region::Synthesis, AgentId::Synthesis.label());
        let gap = if labelled { "" } else { "\n\n" };
        self.write_text(&format!("{}❌ Error: {}", gap, error));
    }
}

impl<W: Write> TurnObserver for PrintObserver<W> {
    fn on_event(&mut self, event: &StreamEvent, message: &Message) {
        match event {
            StreamEvent::TextDelta(text) => self.write_text(text),
            StreamEvent::AgentDelta { agent, text } => {
                self.switch_to(Region::from(*agent), agent.label());
                self.write_text(text);
            }
            StreamEvent::SynthesisStart => {
                self.switch_to(Region::Synthesis, AgentId::Synthesis.label());
            }
            StreamEvent::BackendError { message: error } => self.write_error(error, message),
        }
    }

    fn on_error(&mut self, error: &str, message: &Message) {
        self.write_error(error, message);
    }

    fn on_finished(&mut self, _message: &Message) {
        let _ = writeln!(self.out);
        let _ = self.out.flush();
    }
}

/// Echo line for the prompt, in the form the transcript shows it.
pub fn prompt_echo(prompt: &str, multi: bool) -> String {
    if multi {
        format!("> {}{}", MULTI_AGENT_PREFIX, prompt.trim())
    } else {
        format!("> {}", prompt.trim())
    }
}
