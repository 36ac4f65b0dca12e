//! Executing `HttpRequest` values against the network.
//!
//! # Design
//! `Transport` is the only seam where I/O happens. `UreqTransport` is the
//! default implementation; tests and embedders can supply their own, e.g. to
//! replay canned responses or to reuse an existing HTTP stack.

use log::debug;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::options::ClientOptions;

/// Performs one HTTP round-trip for a Conduit call.
///
/// Implementations must return every HTTP status as an `HttpResponse`; only
/// failures that produced no response at all (DNS, refused connection,
/// timeout) belong in `Err`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// The agent's connection pool is shared, so one transport can serve calls
/// from several threads.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// `options.timeout` becomes the agent-wide default; a request carrying
    /// its own timeout overrides it.
    pub fn new(options: &ClientOptions) -> Self {
        // Status interpretation belongs to the envelope classifier, so 4xx and
        // 5xx must come back as data rather than `Err`.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(options.timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(&ClientOptions::default())
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.post(&request.url);
        if let Some(timeout) = request.timeout {
            builder = builder.config().timeout_global(Some(timeout)).build();
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let form = request
            .form
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()));
        let mut response = builder.send_form(form)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        // ureq caps bodies at 10 MB by default; search pages can be larger.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_string()?;
        debug!("POST {} -> {status} ({} bytes)", request.url, body.len());

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
