//! Per-client configuration.
//!
//! # Design
//! Options are fixed when a `ConduitClient` or `UreqTransport` is built. The
//! client copies the token, user agent, headers and timeout into each request
//! it builds; the transport enforces the timeout. Neither holds mutable state
//! afterwards.

use std::time::Duration;

/// Environment variable holding the Conduit API token.
pub const ENV_API_TOKEN: &str = "CONDUIT_API_TOKEN";
/// Environment variable holding the per-call timeout in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "CONDUIT_TIMEOUT_SECS";

/// Settings applied to every call a client makes.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// Conduit API token, sent inside the `__conduit__` parameter.
    pub api_token: Option<String>,
    /// Deadline for a whole call. Sent with each `HttpRequest` and enforced by
    /// the transport.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
    /// Extra headers sent with every request.
    pub headers: Vec<(String, String)>,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `CONDUIT_API_TOKEN` and `CONDUIT_TIMEOUT_SECS`.
    ///
    /// Unset, empty or unparsable values are left at their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_token = lookup(ENV_API_TOKEN).filter(|token| !token.is_empty());
        let timeout = lookup(ENV_TIMEOUT_SECS)
            .and_then(|secs| secs.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        Self {
            api_token,
            timeout,
            ..Self::default()
        }
    }

    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

// Hand-written so the token never ends up in logs.
impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("headers", &self.headers)
            .finish()
    }
}
