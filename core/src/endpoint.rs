//! Call URL construction.

use crate::error::{Error, Result};

/// Join `host` and a Conduit method name into `<host>/api/<method>`.
///
/// Any number of trailing slashes on `host` collapse into exactly one.
pub fn endpoint_url(host: &str, method: &str) -> Result<String> {
    let host = host.trim_end_matches('/');
    if host.is_empty() {
        return Err(Error::InvalidEndpoint("host is empty".to_string()));
    }
    if method.is_empty() {
        return Err(Error::InvalidEndpoint("method name is empty".to_string()));
    }
    Ok(format!("{host}/api/{method}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_with_trailing_slash() {
        assert_eq!(
            endpoint_url("phabricator.gonduit.wow/", "conduit.connect").unwrap(),
            "phabricator.gonduit.wow/api/conduit.connect"
        );
    }

    #[test]
    fn host_without_trailing_slash() {
        assert_eq!(
            endpoint_url("https://phab.example.com", "maniphest.search").unwrap(),
            "https://phab.example.com/api/maniphest.search"
        );
    }

    #[test]
    fn repeated_trailing_slashes_collapse() {
        assert_eq!(
            endpoint_url("https://phab.example.com///", "phid.lookup").unwrap(),
            "https://phab.example.com/api/phid.lookup"
        );
    }

    #[test]
    fn empty_method_is_rejected() {
        let err = endpoint_url("https://phab.example.com", "").unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn empty_host_is_rejected() {
        let err = endpoint_url("/", "conduit.query").unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint(_)));
    }
}
