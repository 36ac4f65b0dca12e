//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe a Conduit call as plain data. `ConduitClient` builds
//! `HttpRequest` values and parses `HttpResponse` values without touching the
//! network; a `Transport` executes the round-trip in between.
//!
//! Every Conduit call is a POST with a form-encoded body, so a request carries
//! its form fields as ordered pairs and leaves the percent-encoding to the
//! transport.

use std::time::Duration;

/// A Conduit call described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
    /// Deadline for the whole round-trip; `None` leaves it to the transport.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Look up a form field by name.
    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// The body is kept as text in full: it is needed both for JSON decoding and,
/// on error statuses, as the literal error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
