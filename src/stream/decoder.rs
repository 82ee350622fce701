//! Lazy decoders from a chunked response body to [`StreamEvent`]s.

use std::collections::VecDeque;
use std::pin::Pin;

use futures::stream::{self, Stream, StreamExt};
use tracing::debug;

use super::events::StreamEvent;
use super::ndjson::AgentLineDecoder;
use super::utf8::Utf8StreamDecoder;
use crate::models::ChatMode;
use crate::traits::{ByteStream, HttpError};

/// Decoded events in arrival order. A transport error is always the last item.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, HttpError>> + Send>>;

struct DecodeState {
    bytes: ByteStream,
    utf8: Utf8StreamDecoder,
    lines: AgentLineDecoder,
    pending: VecDeque<StreamEvent>,
    done: bool,
}

impl DecodeState {
    fn new(bytes: ByteStream) -> Self {
        Self {
            bytes,
            utf8: Utf8StreamDecoder::new(),
            lines: AgentLineDecoder::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }
}

/// Decode a normal-mode body: every chunk becomes a [`StreamEvent::TextDelta`].
pub fn decode_text_stream(bytes: ByteStream) -> EventStream {
    let events = stream::unfold(DecodeState::new(bytes), |mut state| async move {
        loop {
            if state.done {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => {
                    let text = state.utf8.decode(&chunk);
                    if !text.is_empty() {
                        return Some((Ok(StreamEvent::TextDelta(text)), state));
                    }
                }
                Some(Err(e)) => {
                    state.done = true;
                    return Some((Err(e), state));
                }
                None => {
                    state.done = true;
                    let tail = state.utf8.finish();
                    if !tail.is_empty() {
                        return Some((Ok(StreamEvent::TextDelta(tail)), state));
                    }
                    return None;
                }
            }
        }
    });

    Box::pin(events)
}

/// Decode a multi-agent body of newline-delimited JSON.
pub fn decode_agent_stream(bytes: ByteStream) -> EventStream {
    let events = stream::unfold(DecodeState::new(bytes), |mut state| async move {
        loop {
            if let Some(event) = state.pending.pop_front() {
                return Some((Ok(event), state));
            }
            if state.done {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => {
                    let text = state.utf8.decode(&chunk);
                    let events = state.lines.feed(&text);
                    state.pending.extend(events);
                }
                Some(Err(e)) => {
                    state.done = true;
                    return Some((Err(e), state));
                }
                None => {
                    state.done = true;
                    let tail = state.utf8.finish();
                    let events = state.lines.feed(&tail);
                    state.pending.extend(events);

                    // An unterminated last line is dropped, not parsed.
                    if let Some(rest) = state.lines.finish() {
                        debug!(
                            bytes = rest.len(),
                            "Discarding unterminated multi-agent line at end of stream"
                        );
                    }
                }
            }
        }
    });

    Box::pin(events)
}

/// Pick the decoder for a chat mode.
pub fn decode_stream(mode: ChatMode, bytes: ByteStream) -> EventStream {
    match mode {
        ChatMode::Normal => decode_text_stream(bytes),
        ChatMode::MultiAgent => decode_agent_stream(bytes),
    }
}
