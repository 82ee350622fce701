//! Mock backend fixtures.
//!
//! Re-exports the mock HTTP client and adds builders for the chat
//! backend's three endpoints.

pub use roundtable::adapters::mock::{MockHttpClient, MockResponse};

use bytes::Bytes;
use roundtable::traits::Response;

pub const BASE_URL: &str = "http://backend.test";

pub fn stream_url() -> String {
    format!("{}{}", BASE_URL, roundtable::client::STREAM_PATH)
}

pub fn multi_agent_url() -> String {
    format!("{}{}", BASE_URL, roundtable::client::MULTI_AGENT_STREAM_PATH)
}

pub fn clear_url() -> String {
    format!("{}{}", BASE_URL, roundtable::client::CLEAR_PATH)
}

/// Builder for a mock chat backend.
pub struct MockBackend {
    client: MockHttpClient,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Normal replies stream these chunks.
    pub fn with_text_chunks(self, chunks: &[&str]) -> Self {
        self.client
            .set_response(&stream_url(), MockResponse::chunks(chunks.iter().copied()));
        self
    }

    /// Normal replies stream these raw byte chunks.
    pub fn with_text_bytes(self, chunks: Vec<Vec<u8>>) -> Self {
        self.client.set_response(
            &stream_url(),
            MockResponse::Stream(chunks.into_iter().map(Bytes::from).collect()),
        );
        self
    }

    /// Multi-agent replies stream these chunks.
    pub fn with_agent_chunks(self, chunks: &[&str]) -> Self {
        self.client.set_response(
            &multi_agent_url(),
            MockResponse::chunks(chunks.iter().copied()),
        );
        self
    }

    /// Multi-agent replies stream these lines, one chunk each.
    pub fn with_agent_lines(self, lines: &[&str]) -> Self {
        let chunks: Vec<String> = lines.iter().map(|l| format!("{}\n", l)).collect();
        self.client
            .set_response(&multi_agent_url(), MockResponse::chunks(chunks));
        self
    }

    /// Both chat endpoints answer with this status.
    pub fn with_status(self, status: u16) -> Self {
        self.client
            .set_response(&stream_url(), MockResponse::status(status));
        self.client
            .set_response(&multi_agent_url(), MockResponse::status(status));
        self
    }

    pub fn with_clear_status(self, status: u16) -> Self {
        self.client.set_response(
            &clear_url(),
            MockResponse::Success(Response::new(status, Bytes::from(r#"{"status":"ok"}"#))),
        );
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}
