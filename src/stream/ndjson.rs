//! Newline-delimited JSON framing for the multi-agent protocol.
//!
//! Each line is one JSON object. Control lines carry a `type` field
//! (`synthesis_start`, `error`, and markers such as `start` or `complete`
//! that the client ignores). Content lines carry `agent` and `content`.

use serde_json::Value;
use tracing::warn;

use super::events::{AgentId, DecodeError, StreamEvent};

/// Parse one complete protocol line.
///
/// Blank lines, unknown `type` values, unknown agents, and agent lines
/// without text all yield `Ok(None)`.
pub fn parse_agent_line(line: &str) -> Result<Option<StreamEvent>, DecodeError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: Value =
        serde_json::from_str(trimmed).map_err(|source| DecodeError::InvalidJson {
            line: trimmed.to_string(),
            source,
        })?;

    if let Some(kind) = value.get("type").and_then(Value::as_str) {
        return Ok(match kind {
            "synthesis_start" => Some(StreamEvent::SynthesisStart),
            "error" => Some(StreamEvent::BackendError {
                message: value
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string(),
            }),
            _ => None,
        });
    }

    let agent = value
        .get("agent")
        .and_then(Value::as_str)
        .and_then(AgentId::from_wire);
    let content = value.get("content").and_then(Value::as_str);

    Ok(match (agent, content) {
        (Some(agent), Some(text)) if !text.is_empty() => Some(StreamEvent::AgentDelta {
            agent,
            text: text.to_string(),
        }),
        _ => None,
    })
}

/// Splits decoded text into lines and parses each complete one.
///
/// Text after the last newline stays buffered until a later `feed`
/// completes it.
#[derive(Debug, Default)]
pub struct AgentLineDecoder {
    buffer: String,
}

impl AgentLineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text and return the events of every line it completed.
    pub fn feed(&mut self, text: &str) -> Vec<StreamEvent> {
        self.buffer.push_str(text);

        let mut events = Vec::new();
        while let Some(newline_pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline_pos).collect();
            let line = line[..line.len() - 1].trim_end_matches('\r');

            match parse_agent_line(line) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Skipping malformed multi-agent line"),
            }
        }
        events
    }

    /// End of input. Returns the unterminated tail, which is never parsed.
    ///
    /// The backend newline-terminates every line it sends, so a tail here
    /// means the body was cut short. It is dropped rather than guessed at.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }

    /// Bytes of text waiting for a newline.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(agent: AgentId, text: &str) -> StreamEvent {
        StreamEvent::AgentDelta {
            agent,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_parse_agent_content() {
        let event = parse_agent_line(r#"{"agent":"CriticalAnalyst","content":"A"}"#).unwrap();
        assert_eq!(event, Some(delta(AgentId::Critical, "A")));

        let event = parse_agent_line(r#"{"agent":"Synthesizer","content":"B"}"#).unwrap();
        assert_eq!(event, Some(delta(AgentId::Synthesis, "B")));
    }

    #[test]
    fn test_parse_control_lines() {
        assert_eq!(
            parse_agent_line(r#"{"type":"synthesis_start"}"#).unwrap(),
            Some(StreamEvent::SynthesisStart)
        );
        assert_eq!(parse_agent_line(r#"{"type":"start"}"#).unwrap(), None);
        assert_eq!(parse_agent_line(r#"{"type":"agents_complete"}"#).unwrap(), None);
        assert_eq!(parse_agent_line(r#"{"type":"complete"}"#).unwrap(), None);
    }

    #[test]
    fn test_parse_backend_error_line() {
        let event = parse_agent_line(r#"{"type":"error","message":"quota exceeded"}"#).unwrap();
        assert_eq!(
            event,
            Some(StreamEvent::BackendError {
                message: "quota exceeded".to_string()
            })
        );
    }

    #[test]
    fn test_type_takes_precedence_over_agent() {
        let event =
            parse_agent_line(r#"{"type":"start","agent":"Synthesizer","content":"x"}"#).unwrap();
        assert_eq!(event, None);
    }

    #[test]
    fn test_ignored_shapes() {
        assert_eq!(parse_agent_line("").unwrap(), None);
        assert_eq!(parse_agent_line("   ").unwrap(), None);
        assert_eq!(parse_agent_line("{}").unwrap(), None);
        assert_eq!(parse_agent_line("[1,2]").unwrap(), None);
        assert_eq!(
            parse_agent_line(r#"{"agent":"Moderator","content":"x"}"#).unwrap(),
            None
        );
        assert_eq!(
            parse_agent_line(r#"{"agent":"CriticalAnalyst","content":""}"#).unwrap(),
            None
        );
        assert_eq!(
            parse_agent_line(r#"{"agent":"CriticalAnalyst"}"#).unwrap(),
            None
        );
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = parse_agent_line("=== analysis start ===").unwrap_err();
        match err {
            DecodeError::InvalidJson { line, .. } => assert_eq!(line, "=== analysis start ==="),
        }
    }

    #[test]
    fn test_feed_split_line() {
        let mut decoder = AgentLineDecoder::new();
        assert!(decoder.feed(r#"{"agent":"Critical"#).is_empty());
        assert!(decoder.feed(r#"Analyst","content":"A"}"#).is_empty());
        assert_eq!(decoder.feed("\n"), vec![delta(AgentId::Critical, "A")]);
        assert_eq!(decoder.buffered_len(), 0);
    }

    #[test]
    fn test_feed_multiple_lines_in_one_chunk() {
        let mut decoder = AgentLineDecoder::new();
        let events = decoder.feed(concat!(
            r#"{"agent":"CriticalAnalyst","content":"A"}"#,
            "\r\n",
            r#"{"type":"synthesis_start"}"#,
            "\n",
            r#"{"agent":"Synth"#,
        ));
        assert_eq!(
            events,
            vec![delta(AgentId::Critical, "A"), StreamEvent::SynthesisStart]
        );
        assert_eq!(decoder.buffered_len(), r#"{"agent":"Synth"#.len());
    }

    #[test]
    fn test_malformed_line_does_not_block_later_lines() {
        let mut decoder = AgentLineDecoder::new();
        let events = decoder.feed(concat!(
            "not json\n",
            r#"{"agent":"PositiveAdvocate","content":"P"}"#,
            "\n"
        ));
        assert_eq!(events, vec![delta(AgentId::Positive, "P")]);
    }

    #[test]
    fn test_finish_returns_unterminated_tail() {
        let mut decoder = AgentLineDecoder::new();
        assert!(decoder
            .feed(r#"{"agent":"CriticalAnalyst","content":"lost"}"#)
            .is_empty());
        assert_eq!(
            decoder.finish().as_deref(),
            Some(r#"{"agent":"CriticalAnalyst","content":"lost"}"#)
        );
        assert_eq!(decoder.finish(), None);
    }
}
