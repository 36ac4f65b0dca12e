//! In-process Conduit stand-in for tests.
//!
//! Serves `POST /api/{method}` from canned fixtures. Requests are checked the
//! way a real server would see them (form body with `params`, `output=json`
//! and, when configured, an API token) and recorded for later inspection.

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Form, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// A canned HTTP answer for one method.
#[derive(Clone, Debug, PartialEq)]
pub struct Fixture {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Fixture {
    /// A successful envelope carrying `result`.
    pub fn result(result: Value) -> Self {
        Self::json(json!({"result": result, "error_code": null, "error_info": null}))
    }

    /// A 200 envelope reporting an application error.
    pub fn error(code: &str, info: &str) -> Self {
        Self::json(json!({"result": null, "error_code": code, "error_info": info}))
    }

    /// Any JSON body with status 200.
    pub fn json(body: Value) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    /// A non-JSON body, as a proxy or auth wall would send.
    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/html",
            body: body.to_string(),
        }
    }
}

/// A call as received by the server.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Value,
}

#[derive(Clone, Default)]
pub struct MockConduit {
    fixtures: Arc<RwLock<HashMap<String, Fixture>>>,
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    api_token: Option<String>,
    delay: Option<Duration>,
}

impl MockConduit {
    pub fn new() -> Self {
        Self::default()
    }

    /// A server preloaded with `default_fixtures()`.
    pub fn with_defaults() -> Self {
        Self::from_fixtures(default_fixtures())
    }

    pub fn from_fixtures(fixtures: HashMap<String, Fixture>) -> Self {
        Self {
            fixtures: Arc::new(RwLock::new(fixtures)),
            ..Self::default()
        }
    }

    /// Reject calls whose `__conduit__.token` is not `token`.
    pub fn require_token(mut self, token: &str) -> Self {
        self.api_token = Some(token.to_string());
        self
    }

    /// Hold every answer back by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn set_fixture(&self, method: &str, fixture: Fixture) {
        self.fixtures.write().await.insert(method.to_string(), fixture);
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/{method}", post(call_method))
            .with_state(self.clone())
    }

    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        axum::serve(listener, self.router()).await
    }
}

pub fn app() -> Router {
    MockConduit::with_defaults().router()
}

/// Fixtures for the methods the client knows about.
pub fn default_fixtures() -> HashMap<String, Fixture> {
    let mut fixtures = HashMap::new();
    fixtures.insert(
        "conduit.getcapabilities".to_string(),
        Fixture::result(json!({
            "authentication": ["token", "session"],
            "signatures": ["consign"],
            "input": ["json", "urlencoded"],
            "output": ["json"]
        })),
    );
    fixtures.insert(
        "conduit.query".to_string(),
        Fixture::result(json!({
            "conduit.getcapabilities": {
                "description": "List capabilities, wire formats, and authentication protocols.",
                "params": [],
                "return": "dict<string, any>"
            },
            "phid.lookup": {
                "description": "Look up objects by name.",
                "params": {"names": "required list<string>"},
                "return": "nonempty dict<string, wild>"
            }
        })),
    );
    // PHP encodes the empty lookup map as a list.
    fixtures.insert("phid.lookup".to_string(), Fixture::result(json!([])));
    fixtures.insert(
        "maniphest.search".to_string(),
        Fixture::result(json!({
            "data": [
                task(1, json!({"columns": {"boards": {
                    "PHID-PROJ-1": {"columns": [{"id": 10, "phid": "PHID-PCOL-10", "name": "Backlog"}]}
                }}})),
                task(2, json!({"columns": {"boards": [
                    {"id": 11, "phid": "PHID-PCOL-11", "name": "Done"}
                ]}})),
                task(3, json!([]))
            ],
            "maps": {},
            "query": {"queryKey": null},
            "cursor": {"limit": 100, "after": null, "before": null, "order": null}
        })),
    );
    fixtures
}

fn task(id: u64, attachments: Value) -> Value {
    json!({
        "id": id,
        "type": "TASK",
        "phid": format!("PHID-TASK-{id}"),
        "fields": {
            "name": format!("Task {id}"),
            "description": {"raw": ""},
            "authorPHID": "PHID-USER-1",
            "ownerPHID": null,
            "status": {"value": "open", "name": "Open", "color": null},
            "priority": {"value": 50, "subpriority": 0, "name": "Normal", "color": "orange"},
            "subtype": "default",
            "closerPHID": null,
            "dateClosed": null,
            "spacePHID": null,
            "dateCreated": 1700000000 + id,
            "dateModified": 1700000000 + id,
            "policy": {"view": "users", "interact": "users", "edit": "users"}
        },
        "attachments": attachments
    })
}

async fn call_method(
    State(state): State<MockConduit>,
    Path(method): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    if form.get("output").map(String::as_str) != Some("json") {
        return (StatusCode::BAD_REQUEST, "output must be json").into_response();
    }
    let params: Value = match form.get("params").map(|raw| serde_json::from_str::<Value>(raw)) {
        Some(Ok(params @ Value::Object(_))) => params,
        _ => return (StatusCode::BAD_REQUEST, "params must be a JSON object").into_response(),
    };

    if let Some(expected) = &state.api_token {
        if params["__conduit__"]["token"].as_str() != Some(expected.as_str()) {
            return fixture_response(Fixture::error(
                "ERR-INVALID-AUTH",
                "API token is not valid.",
            ));
        }
    }

    state.calls.write().await.push(RecordedCall {
        method: method.clone(),
        params,
    });

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    let fixture = state.fixtures.read().await.get(&method).cloned();
    fixture_response(fixture.unwrap_or_else(|| {
        Fixture::error(
            "ERR-CONDUIT-CALL",
            &format!("Conduit method '{method}' does not exist."),
        )
    }))
}

fn fixture_response(fixture: Fixture) -> Response {
    let status = StatusCode::from_u16(fixture.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, fixture.content_type)], fixture.body).into_response()
}
