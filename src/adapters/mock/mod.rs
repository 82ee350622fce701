//! Mock implementations for testing.
//!
//! Lets the controller and the TUI task run whole turns without a network.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
