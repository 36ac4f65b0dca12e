//! Stateless request builder and response parser for Conduit calls.
//!
//! # Design
//! `ConduitClient` holds only a host and its `ClientOptions`. A call is split
//! into `build_call`, which produces an `HttpRequest`, and `parse_call`, which
//! consumes an `HttpResponse`. `call` glues the two to a `Transport`; the
//! per-method helpers (`phid_lookup`, `maniphest_search`, ...) are thin typed
//! wrappers over `call`.

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::endpoint::endpoint_url;
use crate::envelope::{classify, decode_result};
use crate::error::{Error, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::options::ClientOptions;
use crate::requests::{
    ManiphestSearchRequest, PasteQueryRequest, PhidLookupRequest, PhidQueryRequest,
    ProjectQueryRequest,
};
use crate::responses::{
    CapabilitiesResponse, ConduitQueryResponse, ManiphestSearchResponse, PasteQueryResponse,
    PhidLookupResponse, PhidQueryResponse, ProjectQueryResponse,
};
use crate::transport::Transport;

/// Form field carrying the JSON-encoded parameters.
pub const PARAMS_FIELD: &str = "params";
/// Parameter key reserved for call metadata such as the API token.
pub const CONDUIT_META_KEY: &str = "__conduit__";

/// Synchronous, stateless client for one Conduit host.
///
/// Holds no connection; every call goes through the `Transport` passed in.
#[derive(Debug, Clone)]
pub struct ConduitClient {
    host: String,
    options: ClientOptions,
}

impl ConduitClient {
    pub fn new(host: &str) -> Self {
        Self::with_options(host, ClientOptions::default())
    }

    pub fn with_options(host: &str, options: ClientOptions) -> Self {
        Self {
            host: host.to_string(),
            options,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Build the POST for `method`.
    ///
    /// `params` must serialize to a JSON object; `null` (e.g. from `()`) is
    /// sent as `{}`. A configured API token is added under `__conduit__`.
    pub fn build_call<P: Serialize + ?Sized>(&self, method: &str, params: &P) -> Result<HttpRequest> {
        let url = endpoint_url(&self.host, method)?;

        let mut params = match serde_json::to_value(params).map_err(Error::Encode)? {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            other => {
                return Err(Error::InvalidParams(format!(
                    "parameters for {method} must be a JSON object, got {other}"
                )))
            }
        };
        if let Some(token) = &self.options.api_token {
            params.insert(CONDUIT_META_KEY.to_string(), json!({ "token": token }));
        }
        let encoded = serde_json::to_string(&params).map_err(Error::Encode)?;

        let mut headers = Vec::with_capacity(self.options.headers.len() + 1);
        if let Some(user_agent) = &self.options.user_agent {
            headers.push(("user-agent".to_string(), user_agent.clone()));
        }
        headers.extend(self.options.headers.iter().cloned());

        Ok(HttpRequest {
            url,
            headers,
            form: vec![
                (PARAMS_FIELD.to_string(), encoded),
                ("output".to_string(), "json".to_string()),
                (CONDUIT_META_KEY.to_string(), "true".to_string()),
            ],
            timeout: self.options.timeout,
        })
    }

    /// Classify `response` and decode its `result` into `T`.
    pub fn parse_call<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T> {
        let result = classify(&response)?;
        decode_result(result)
    }

    /// Perform `method` over `transport`: build, execute, parse.
    pub fn call<P, T>(&self, transport: &impl Transport, method: &str, params: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_call(method, params)?;
        debug!("calling {method} at {}", request.url);
        let response = transport.execute(request).map_err(Error::Transport)?;
        let result = self.parse_call(response)?;
        debug!("{method} succeeded");
        Ok(result)
    }

    pub fn conduit_capabilities(&self, transport: &impl Transport) -> Result<CapabilitiesResponse> {
        self.call(transport, "conduit.getcapabilities", &())
    }

    pub fn conduit_query(&self, transport: &impl Transport) -> Result<ConduitQueryResponse> {
        self.call(transport, "conduit.query", &())
    }

    pub fn phid_lookup(
        &self,
        transport: &impl Transport,
        request: &PhidLookupRequest,
    ) -> Result<PhidLookupResponse> {
        self.call(transport, "phid.lookup", request)
    }

    pub fn phid_query(
        &self,
        transport: &impl Transport,
        request: &PhidQueryRequest,
    ) -> Result<PhidQueryResponse> {
        self.call(transport, "phid.query", request)
    }

    pub fn paste_query(
        &self,
        transport: &impl Transport,
        request: &PasteQueryRequest,
    ) -> Result<PasteQueryResponse> {
        self.call(transport, "paste.query", request)
    }

    pub fn project_query(
        &self,
        transport: &impl Transport,
        request: &ProjectQueryRequest,
    ) -> Result<ProjectQueryResponse> {
        self.call(transport, "project.query", request)
    }

    pub fn maniphest_search(
        &self,
        transport: &impl Transport,
        request: &ManiphestSearchRequest,
    ) -> Result<ManiphestSearchResponse> {
        self.call(transport, "maniphest.search", request)
    }
}

/// One-shot call without keeping a client around.
pub fn invoke<P, T>(
    transport: &impl Transport,
    host: &str,
    method: &str,
    params: &P,
    options: &ClientOptions,
) -> Result<T>
where
    P: Serialize + ?Sized,
    T: DeserializeOwned,
{
    ConduitClient::with_options(host, options.clone()).call(transport, method, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConduitError, TransportError};
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn client() -> ConduitClient {
        ConduitClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn sent_params(req: &HttpRequest) -> Value {
        serde_json::from_str(req.form_value(PARAMS_FIELD).unwrap()).unwrap()
    }

    /// Replays one canned response and remembers the request it was given.
    struct Canned {
        response: HttpResponse,
        seen: RefCell<Option<HttpRequest>>,
    }

    impl Canned {
        fn new(status: u16, body: &str) -> Self {
            Self {
                response: response(status, body),
                seen: RefCell::new(None),
            }
        }
    }

    impl Transport for Canned {
        fn execute(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
            *self.seen.borrow_mut() = Some(request);
            Ok(self.response.clone())
        }
    }

    struct Unreachable;

    impl Transport for Unreachable {
        fn execute(&self, _: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
            Err("connection refused".into())
        }
    }

    #[test]
    fn build_call_produces_form_post() {
        let req = client()
            .build_call("phid.lookup", &PhidLookupRequest { names: vec!["T1".to_string()] })
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/phid.lookup");
        assert_eq!(req.form_value("output"), Some("json"));
        assert_eq!(req.form_value(CONDUIT_META_KEY), Some("true"));
        assert_eq!(sent_params(&req), json!({"names": ["T1"]}));
        assert!(req.headers.is_empty());
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let req = ConduitClient::new("http://localhost:3000/")
            .build_call("conduit.query", &())
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/conduit.query");
    }

    #[test]
    fn unit_params_become_empty_object() {
        let req = client().build_call("conduit.query", &()).unwrap();
        assert_eq!(sent_params(&req), json!({}));
    }

    #[test]
    fn non_object_params_are_rejected() {
        let err = client().build_call("conduit.query", &vec![1, 2]).unwrap_err();
        assert!(matches!(err, Error::InvalidParams(_)));
    }

    #[test]
    fn token_and_headers_come_from_options() {
        let options = ClientOptions::new()
            .api_token("api-token123")
            .user_agent("conduit-core-tests")
            .header("x-request-id", "abc");
        let req = ConduitClient::with_options("http://localhost:3000", options)
            .build_call("phid.query", &PhidQueryRequest::default())
            .unwrap();
        assert_eq!(
            sent_params(&req),
            json!({"phids": [], "__conduit__": {"token": "api-token123"}})
        );
        assert_eq!(
            req.headers,
            vec![
                ("user-agent".to_string(), "conduit-core-tests".to_string()),
                ("x-request-id".to_string(), "abc".to_string()),
            ]
        );
    }

    #[test]
    fn parse_call_decodes_result() {
        let body = r#"{"result": {"authentication": ["token", "session"], "signatures": ["consign"],
            "input": ["json", "urlencoded"], "output": ["json"]}, "error_code": null, "error_info": null}"#;
        let caps: CapabilitiesResponse = client().parse_call(response(200, body)).unwrap();
        assert_eq!(caps.authentication, vec!["token", "session"]);
        assert_eq!(caps.output, vec!["json"]);
    }

    #[test]
    fn parse_call_empty_array_into_map() {
        let lookup: PhidLookupResponse = client()
            .parse_call(response(200, r#"{"result": []}"#))
            .unwrap();
        assert!(lookup.is_empty());
    }

    #[test]
    fn parse_call_html_error_page() {
        let err = client()
            .parse_call::<BTreeMap<String, Value>>(response(502, "<html>Bad Gateway</html>"))
            .unwrap_err();
        assert_eq!(
            err.as_conduit(),
            Some(&ConduitError::new("502", "<html>Bad Gateway</html>"))
        );
    }

    #[test]
    fn call_goes_through_transport() {
        let transport = Canned::new(200, r#"{"result": {"T1": {"phid": "PHID-TASK-1", "name": "T1"}}}"#);
        let lookup = client()
            .phid_lookup(&transport, &PhidLookupRequest { names: vec!["T1".to_string()] })
            .unwrap();
        assert_eq!(lookup["T1"].phid, "PHID-TASK-1");
        let seen = transport.seen.borrow();
        assert_eq!(seen.as_ref().unwrap().url, "http://localhost:3000/api/phid.lookup");
    }

    #[test]
    fn call_surfaces_transport_error() {
        let err = client().conduit_query(&Unreachable).unwrap_err();
        match err {
            Error::Transport(source) => assert_eq!(source.to_string(), "connection refused"),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn call_surfaces_missing_results() {
        let err = client().conduit_capabilities(&Canned::new(200, "{}")).unwrap_err();
        assert!(matches!(err, Error::MissingResults));
    }

    #[test]
    fn invoke_is_a_one_shot_call() {
        let transport = Canned::new(200, r#"{"result": ["a", "b"]}"#);
        let options = ClientOptions::new().api_token("api-x");
        let result: Vec<String> =
            invoke(&transport, "http://phab.local/", "custom.method", &(), &options).unwrap();
        assert_eq!(result, vec!["a", "b"]);
        let seen = transport.seen.borrow();
        let req = seen.as_ref().unwrap();
        assert_eq!(req.url, "http://phab.local/api/custom.method");
        assert_eq!(sent_params(req), json!({"__conduit__": {"token": "api-x"}}));
    }

    #[test]
    fn timeout_travels_with_the_request() {
        let transport = Canned::new(200, r#"{"result": []}"#);
        let options = ClientOptions::new().timeout(Duration::from_millis(250));
        let _: Vec<String> =
            invoke(&transport, "http://phab.local", "custom.method", &(), &options).unwrap();
        let seen = transport.seen.borrow();
        assert_eq!(seen.as_ref().unwrap().timeout, Some(Duration::from_millis(250)));

        let req = client().build_call("conduit.query", &()).unwrap();
        assert_eq!(req.timeout, None);
    }
}
