//! HTTP adapter backed by reqwest.

use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response};

/// Production [`HttpClient`].
///
/// No request timeout is set: a chat turn lasts until the server closes the
/// body or the connection drops.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

/// Classify a failure that happened before any response arrived.
fn request_error(err: reqwest::Error) -> HttpError {
    let text = err.to_string();
    if err.is_timeout() {
        HttpError::Timeout(text)
    } else if err.is_connect() {
        HttpError::ConnectionFailed(text)
    } else if err.is_builder() {
        HttpError::InvalidUrl(text)
    } else {
        HttpError::Other(text)
    }
}

/// Classify a failure while reading a body that had already started.
fn body_error(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout(err.to_string())
    } else {
        HttpError::Io(err.to_string())
    }
}

fn header_map(headers: &reqwest::header::HeaderMap) -> Headers {
    let mut out = Headers::with_capacity(headers.len());
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            out.insert(name.as_str().to_string(), value.to_string());
        }
    }
    out
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_post(&self, url: &str, body: &str, headers: &Headers) -> reqwest::RequestBuilder {
        headers.iter().fold(
            self.client.post(url).body(body.to_owned()),
            |builder, (name, value)| builder.header(name, value),
        )
    }

    async fn send_post(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<reqwest::Response, HttpError> {
        self.build_post(url, body, headers)
            .send()
            .await
            .map_err(request_error)
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        let response = self.send_post(url, body, headers).await?;
        let status = response.status().as_u16();
        let response_headers = header_map(response.headers());
        let bytes = response.bytes().await.map_err(body_error)?;
        Ok(Response::with_headers(status, response_headers, bytes))
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        let response = self.send_post(url, body, headers).await?;

        let status = response.status();
        if !status.is_success() {
            // The error body is only kept for logs; a failed read leaves it empty.
            let body = response.text().await.unwrap_or_default();
            return Err(HttpError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes_stream().map_err(body_error).boxed())
    }
}
