//! Error types for the Conduit client.
//!
//! # Design
//! `ConduitError` is the server's own verdict on a call: either the
//! `error_code`/`error_info` pair from the envelope, or the HTTP status and raw
//! body when the response never reached the Conduit layer (a proxy page, an
//! auth wall). Everything else the client can fail with is a variant of
//! `Error`, so callers match on kind rather than on message text.

use thiserror::Error;

/// An error reported by the remote side of a call.
///
/// Two values are equal when both `code` and `info` match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {info}")]
pub struct ConduitError {
    code: String,
    info: String,
}

impl ConduitError {
    pub fn new(code: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            info: info.into(),
        }
    }

    /// The envelope's `error_code`, or the HTTP status as a decimal string.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The envelope's `error_info`, or the raw response body.
    pub fn info(&self) -> &str {
        &self.info
    }
}

/// Boxed error produced by a `Transport` implementation.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `ConduitClient`.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered, but the call failed.
    #[error("conduit error {0}")]
    Conduit(#[from] ConduitError),

    /// The envelope reported success but carried no `result` key at all.
    #[error("missing results")]
    MissingResults,

    /// The envelope or its `result` payload did not match the expected shape.
    #[error("deserialization failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The call parameters could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// The call parameters did not serialize to a JSON object.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Host or method name was unusable for building a call URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),
}

impl Error {
    /// The remote error, if this is one.
    pub fn as_conduit(&self) -> Option<&ConduitError> {
        match self {
            Error::Conduit(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conduit_errors_compare_by_code_and_info() {
        let a = ConduitError::new("ERR-CONDUIT-CORE", "Something bad happened");
        let b = ConduitError::new("ERR-CONDUIT-CORE", "Something bad happened");
        let c = ConduitError::new("ERR-CONDUIT-CORE", "Something else");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn conduit_error_display() {
        let err = ConduitError::new("401", "unauthorized");
        assert_eq!(err.to_string(), "401: unauthorized");
        assert_eq!(Error::from(err).to_string(), "conduit error 401: unauthorized");
    }

    #[test]
    fn missing_results_is_matched_by_kind() {
        let err = Error::MissingResults;
        assert!(matches!(err, Error::MissingResults));
        assert!(err.as_conduit().is_none());
    }
}
