//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - JSON POST and streaming POST

pub mod http;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response};
