//! Shared helpers for the wiremock-backed integration tests.

use wiremock::MockServer;
use xapi_client::{XApiClient, XApiClientBuilder};
use xapi_model::{Activity, Agent, Statement, Verb};

/// Build a client pointed at a mock LRS, with Basic credentials.
pub fn client_for(server: &MockServer) -> XApiClient {
    XApiClientBuilder::new()
        .base_url(format!("{}/xapi/", server.uri()))
        .auth("alice", "secret")
        .build()
        .expect("client should build against the mock server")
}

/// A statement without an id, matching the wire bodies used in the mocks.
pub fn sample_statement() -> Statement {
    Statement::new(
        Agent::with_mbox("mailto:alice@example.com").into(),
        Verb::new("http://adlnet.gov/expapi/verbs/attended"),
        Activity::new("http://example.com/activities/training").into(),
    )
}

/// The JSON wire form of [`sample_statement`], optionally with an id.
pub fn sample_statement_json(id: Option<&str>) -> serde_json::Value {
    let mut json = serde_json::json!({
        "actor": { "objectType": "Agent", "mbox": "mailto:alice@example.com" },
        "verb": { "id": "http://adlnet.gov/expapi/verbs/attended" },
        "object": {
            "objectType": "Activity",
            "id": "http://example.com/activities/training",
        },
    });
    if let Some(id) = id {
        json["id"] = serde_json::Value::from(id);
    }
    json
}
