//! Stream decoding: response body chunks in, chat events out.
//!
//! Normal replies are raw text. Multi-agent replies are newline-delimited
//! JSON. Both go through [`Utf8StreamDecoder`] first so that characters
//! split across chunk boundaries survive intact.

pub mod decoder;
pub mod events;
pub mod ndjson;
pub mod utf8;

pub use decoder::{decode_agent_stream, decode_stream, decode_text_stream, EventStream};
pub use events::{AgentId, DecodeError, StreamEvent};
pub use ndjson::{parse_agent_line, AgentLineDecoder};
pub use utf8::Utf8StreamDecoder;
