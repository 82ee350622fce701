//! The HTTP seam between the chat client and the network.
//!
//! Only two shapes of call exist: a buffered POST (history clear) and a
//! POST whose body is consumed incrementally (a chat turn).

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::pin::Pin;
use thiserror::Error;

pub type Headers = HashMap<String, String>;

/// Body chunks in arrival order. Chunk boundaries carry no meaning.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// A fully read response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: Bytes) -> Self {
        Self::with_headers(status, Headers::new(), body)
    }

    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }
}

/// Transport-level failure.
///
/// The `Status` rendering is what ends up in the transcript, so it stays
/// short and does not include the body.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HttpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request timeout: {0}")]
    Timeout(String),
    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },
    /// The body broke after the response had started.
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP error: {0}")]
    Other(String),
}

impl HttpError {
    /// `Some` only when the server actually answered.
    pub fn status(&self) -> Option<u16> {
        if let HttpError::Status { status, .. } = self {
            Some(*status)
        } else {
            None
        }
    }
}

/// Implemented by [`ReqwestHttpClient`](crate::adapters::ReqwestHttpClient)
/// in production and [`MockHttpClient`](crate::adapters::MockHttpClient) in
/// tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// POST and hand back the body without buffering it.
    ///
    /// A non-2xx status fails here with [`HttpError::Status`]; the stream
    /// itself only ever fails with transport errors.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError>;
}
