//! Scripted [`HttpClient`] for tests.
//!
//! Routes are matched by exact URL first, then by URL prefix, then the
//! fallback. Every call is recorded, including ones that end up failing.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, Response};

/// One call made against the mock.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl RecordedRequest {
    /// The body parsed as JSON, if it is JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        serde_json::from_str(self.body.as_deref()?).ok()
    }
}

/// What a route answers with.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// A whole buffered response
    Success(Response),
    /// Fail before any body arrives
    Error(HttpError),
    /// Stream these chunks, then end cleanly
    Stream(Vec<Bytes>),
    /// Stream these chunks, then yield a transport error
    StreamBroken { chunks: Vec<Bytes>, error: HttpError },
}

impl MockResponse {
    /// Stream each piece as its own chunk.
    pub fn chunks<I, S>(pieces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let chunks = pieces
            .into_iter()
            .map(|piece| Bytes::from(piece.into()))
            .collect();
        MockResponse::Stream(chunks)
    }

    /// Refuse the request with a non-2xx status.
    pub fn status(status: u16) -> Self {
        MockResponse::Error(HttpError::Status {
            status,
            body: String::new(),
        })
    }
}

#[derive(Debug, Default)]
struct MockState {
    routes: Vec<(String, MockResponse)>,
    fallback: Option<MockResponse>,
    requests: Vec<RecordedRequest>,
}

impl MockState {
    fn route(&self, url: &str) -> Option<MockResponse> {
        let exact = self.routes.iter().find(|(route, _)| route == url);
        let prefix = || {
            self.routes
                .iter()
                .find(|(route, _)| url.starts_with(route.as_str()))
        };
        exact
            .or_else(prefix)
            .map(|(_, response)| response.clone())
            .or_else(|| self.fallback.clone())
    }
}

/// Cloneable mock client. Clones share routes and the request log.
///
/// ```ignore
/// use roundtable::adapters::mock::{MockHttpClient, MockResponse};
///
/// let http = MockHttpClient::new();
/// http.set_response(
///     "http://localhost:5000/api/chat/stream",
///     MockResponse::chunks(["He", "llo"]),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<MockState>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking test must not poison the mock for the next assertion.
    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Answer requests to `url` (or URLs starting with it) with `response`.
    /// Setting the same URL again replaces the earlier route.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut state = self.state();
        state.routes.retain(|(route, _)| route != url);
        state.routes.push((url.to_string(), response));
    }

    /// Answer every unrouted URL with `response`.
    pub fn set_default_response(&self, response: MockResponse) {
        self.state().fallback = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.state().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state().requests.clear();
    }

    /// Log the call and look up its route.
    fn answer(&self, url: &str, body: &str, headers: &Headers) -> Result<MockResponse, HttpError> {
        let mut state = self.state();
        state.requests.push(RecordedRequest {
            method: "POST".to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body: Some(body.to_string()),
        });
        state
            .route(url)
            .ok_or_else(|| HttpError::Other(format!("no mock route for {}", url)))
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        match self.answer(url, body, headers)? {
            MockResponse::Success(response) => Ok(response),
            MockResponse::Error(err) => Err(err),
            MockResponse::Stream(_) | MockResponse::StreamBroken { .. } => Err(HttpError::Other(
                "streamed mock route used for a buffered request".to_string(),
            )),
        }
    }

    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ByteStream, HttpError> {
        let (chunks, error) = match self.answer(url, body, headers)? {
            MockResponse::Stream(chunks) => (chunks, None),
            MockResponse::StreamBroken { chunks, error } => (chunks, Some(error)),
            MockResponse::Error(err) => return Err(err),
            MockResponse::Success(_) => {
                return Err(HttpError::Other(
                    "buffered mock route used for a streaming request".to_string(),
                ))
            }
        };

        let items = chunks.into_iter().map(Ok).chain(error.map(Err));
        Ok(Box::pin(futures::stream::iter(items)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    async fn drain(mut stream: ByteStream) -> Vec<Result<Bytes, HttpError>> {
        let mut items = Vec::new();
        while let Some(item) = stream.next().await {
            items.push(item);
        }
        items
    }

    #[tokio::test]
    async fn test_buffered_route_and_request_log() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://test/api/messages/clear",
            MockResponse::Success(Response::new(200, Bytes::from(r#"{"status":"ok"}"#))),
        );

        let response = http
            .post(
                "http://test/api/messages/clear",
                r#"{"session_id":"default"}"#,
                &Headers::new(),
            )
            .await
            .unwrap();

        assert!(response.is_success());
        let log = http.get_requests();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].method, "POST");
        assert_eq!(log[0].json_body().unwrap()["session_id"], "default");
    }

    #[tokio::test]
    async fn test_stream_route_yields_chunks_in_order() {
        let http = MockHttpClient::new();
        http.set_response("http://test/stream", MockResponse::chunks(["a", "b", "c"]));

        let stream = http
            .post_stream("http://test/stream", "{}", &Headers::new())
            .await
            .unwrap();

        let items = drain(stream).await;
        assert_eq!(
            items,
            vec![Ok(Bytes::from("a")), Ok(Bytes::from("b")), Ok(Bytes::from("c"))]
        );
    }

    #[tokio::test]
    async fn test_broken_stream_ends_with_error() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://test/stream",
            MockResponse::StreamBroken {
                chunks: vec![Bytes::from("partial")],
                error: HttpError::Io("connection reset".to_string()),
            },
        );

        let stream = http
            .post_stream("http://test/stream", "{}", &Headers::new())
            .await
            .unwrap();

        let items = drain(stream).await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Ok(Bytes::from("partial")));
        assert!(matches!(items[1], Err(HttpError::Io(_))));
    }

    #[tokio::test]
    async fn test_status_route_fails_before_streaming() {
        let http = MockHttpClient::new();
        http.set_response("http://test/stream", MockResponse::status(503));

        let result = http
            .post_stream("http://test/stream", "{}", &Headers::new())
            .await;
        assert_eq!(result.err().and_then(|e| e.status()), Some(503));
    }

    #[tokio::test]
    async fn test_exact_route_beats_prefix_and_unrouted_fails() {
        let http = MockHttpClient::new();
        http.set_response("http://test/api", MockResponse::status(404));
        http.set_response("http://test/api/chat/stream", MockResponse::chunks(["ok"]));

        assert!(http
            .post_stream("http://test/api/chat/stream", "{}", &Headers::new())
            .await
            .is_ok());
        let prefixed = http
            .post_stream("http://test/api/other", "{}", &Headers::new())
            .await;
        assert_eq!(prefixed.err().and_then(|e| e.status()), Some(404));

        let unrouted = http.post("http://elsewhere/", "{}", &Headers::new()).await;
        assert!(matches!(unrouted, Err(HttpError::Other(_))));
        assert_eq!(http.get_requests().len(), 3);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::new(200, Bytes::new())));

        let clone = http.clone();
        clone
            .post("http://test/anything", "{}", &Headers::new())
            .await
            .unwrap();

        assert_eq!(http.get_requests().len(), 1);
        http.clear_requests();
        assert!(clone.get_requests().is_empty());
    }
}
