//! Response envelope classification and `result` decoding.
//!
//! # Design
//! Every Conduit response is wrapped as
//! `{"result": ..., "error_code": ..., "error_info": ...}`. The body is first
//! decoded into a raw `serde_json::Map` so a missing `result` key can be told
//! apart from `"result": null`; only once no error condition remains is the
//! payload decoded into the caller's type.

use log::{trace, warn};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ConduitError, Error, Result};
use crate::http::HttpResponse;

const RESULT_KEY: &str = "result";
const ERROR_CODE_KEY: &str = "error_code";
const ERROR_INFO_KEY: &str = "error_info";

/// Decide whether `response` carries a successful call and return its raw
/// `result` payload.
///
/// Error statuses never reach the JSON parser: their body is taken verbatim as
/// the error info, since it may be an HTML page from a proxy.
pub fn classify(response: &HttpResponse) -> Result<Value> {
    if !response.is_success() {
        let err = ConduitError::new(response.status.to_string(), response.body.as_str());
        warn!("conduit call failed with HTTP status {}", response.status);
        return Err(err.into());
    }

    let mut envelope: Map<String, Value> =
        serde_json::from_str(&response.body).map_err(Error::Decode)?;

    let code = string_field(&envelope, ERROR_CODE_KEY)?;
    let info = string_field(&envelope, ERROR_INFO_KEY)?;
    if !code.is_empty() {
        warn!("conduit call failed with {code}");
        return Err(ConduitError::new(code, info).into());
    }

    envelope.remove(RESULT_KEY).ok_or_else(|| {
        warn!("conduit envelope has no result key");
        Error::MissingResults
    })
}

/// Decode a `result` payload into `T`.
///
/// PHP encodes an empty associative array as `[]`, and some methods answer
/// `null` when nothing matched. Either one decodes into any empty collection
/// `T` accepts, whether list-shaped or map-shaped.
pub fn decode_result<T: DeserializeOwned>(result: Value) -> Result<T> {
    let is_empty = match &result {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    };
    let err = match serde_json::from_value(result) {
        Ok(decoded) => return Ok(decoded),
        Err(err) if is_empty => err,
        Err(err) => return Err(Error::Decode(err)),
    };

    trace!("empty result did not decode as sent, trying empty collections");
    for empty in [Value::Object(Map::new()), Value::Array(Vec::new())] {
        if let Ok(decoded) = serde_json::from_value(empty) {
            return Ok(decoded);
        }
    }
    Err(Error::Decode(err))
}

/// Read an optional string member; absent and `null` both yield `""`.
fn string_field(envelope: &Map<String, Value>, key: &str) -> Result<String> {
    match envelope.get(key) {
        Some(value) => serde_json::from_value::<Option<String>>(value.clone())
            .map(Option::unwrap_or_default)
            .map_err(Error::Decode),
        None => Ok(String::new()),
    }
}
