//! [`HttpClient`](crate::traits::HttpClient) implementations: reqwest for
//! the real backend, a scripted one for tests.

pub mod mock;
pub mod reqwest_http;

pub use mock::{MockHttpClient, MockResponse};
pub use reqwest_http::ReqwestHttpClient;
