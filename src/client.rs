//! Chat API client for the backend.
//!
//! Three endpoints, all JSON POSTs:
//!
//! - `/api/chat/stream`: raw chunked text
//! - `/api/chat/multi-agent-stream`: newline-delimited JSON
//! - `/api/messages/clear`: drops the server-side history

use std::sync::Arc;

use tracing::{debug, warn};

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::ChatError;
use crate::models::{ChatMode, ChatRequest, ClearRequest};
use crate::stream::{decode_stream, EventStream};
use crate::traits::{Headers, HttpClient};

pub const STREAM_PATH: &str = "/api/chat/stream";
pub const MULTI_AGENT_STREAM_PATH: &str = "/api/chat/multi-agent-stream";
pub const CLEAR_PATH: &str = "/api/messages/clear";

/// Client for the chat backend.
///
/// Cheap to clone; clones share the underlying HTTP client.
#[derive(Clone)]
pub struct ChatClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Production client talking to `config.base_url` over reqwest.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone(), Arc::new(ReqwestHttpClient::new()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Streaming endpoint for a mode.
    pub fn stream_url(&self, mode: ChatMode) -> String {
        let path = match mode {
            ChatMode::Normal => STREAM_PATH,
            ChatMode::MultiAgent => MULTI_AGENT_STREAM_PATH,
        };
        format!("{}{}", self.base_url, path)
    }

    pub fn clear_url(&self) -> String {
        format!("{}{}", self.base_url, CLEAR_PATH)
    }

    fn json_headers() -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    /// Send a chat request and decode its body lazily.
    ///
    /// Fails before yielding anything when the connection cannot be made or
    /// the server answers with a non-2xx status.
    pub async fn open_stream(&self, request: &ChatRequest) -> Result<EventStream, ChatError> {
        let url = self.stream_url(request.mode);
        let body = serde_json::to_string(request)?;
        debug!(%url, mode = ?request.mode, "Opening chat stream");

        let bytes = self
            .http
            .post_stream(&url, &body, &Self::json_headers())
            .await?;

        Ok(decode_stream(request.mode, bytes))
    }

    /// Ask the server to forget the conversation.
    pub async fn clear_history(&self, session_id: &str) -> Result<(), ChatError> {
        let body = serde_json::to_string(&ClearRequest {
            session_id: session_id.to_string(),
        })?;

        let response = self
            .http
            .post(&self.clear_url(), &body, &Self::json_headers())
            .await?;

        if !response.is_success() {
            return Err(ChatError::Status {
                status: response.status,
            });
        }
        Ok(())
    }

    /// Fire-and-forget clear: failures are logged, never returned.
    pub async fn clear_history_logged(&self, session_id: &str) {
        if let Err(e) = self.clear_history(session_id).await {
            warn!(error = %e, "Failed to clear server-side history");
        }
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
