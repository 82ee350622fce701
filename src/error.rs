//! Error types for chat turns and configuration.
//!
//! Turn errors never escape a turn: the controller renders
//! [`ChatError::user_message`] inline on the reply and returns to idle.

use thiserror::Error;

use crate::traits::HttpError;

/// Why a chat turn failed.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The server answered a streaming request with a non-2xx status
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    /// Connection failure, or the body broke partway through
    #[error("{0}")]
    Transport(HttpError),

    /// The request body could not be encoded
    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ChatError {
    /// Text shown after the error marker in the transcript.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Status code, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ChatError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<HttpError> for ChatError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status { status, .. } => ChatError::Status { status },
            other => ChatError::Transport(other),
        }
    }
}

/// Invalid client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Base URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),

    #[error("Session id must not be empty")]
    EmptySessionId,
}
