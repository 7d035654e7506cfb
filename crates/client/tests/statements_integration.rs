//! Integration tests for the statements client against a mock LRS
//!
//! **Coverage:**
//! - Store without id: POST, id array response, new value returned
//! - Store with id: PUT under `statementId`, input returned unchanged
//! - Batch store: order preservation, precondition short-circuit
//! - Void flow: void statement construction and storage
//! - Retrieval: by id, voided, filtered, and pagination via the more URL
//! - Error classification straight from live responses

#![allow(dead_code)]

#[path = "support.rs"]
mod support;

use support::{client_for, sample_statement, sample_statement_json};
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xapi_model::{Agent, StatementResult, XApiError};

const STATEMENT_ID: &str = "12345678-1234-5678-1234-567812345678";
const SECOND_ID: &str = "12345678-1234-5678-1234-567812345679";

#[tokio::test]
async fn storing_a_statement_without_id_posts_and_attaches_the_returned_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/xapi/statements"))
        .and(header("X-Experience-API-Version", "1.0.1"))
        .and(body_json(sample_statement_json(None)))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("[\"{STATEMENT_ID}\"]")))
        .expect(1)
        .mount(&server)
        .await;

    let statement = sample_statement();
    let stored = client_for(&server).statements().store_statement(&statement).await.unwrap();

    assert_eq!(stored.id, Some(Uuid::parse_str(STATEMENT_ID).unwrap()));
    // The caller's value is untouched.
    assert_eq!(statement.id, None);
    assert_eq!(stored.actor, statement.actor);
}

#[tokio::test]
async fn storing_a_statement_with_id_puts_under_that_id() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/xapi/statements"))
        .and(query_param("statementId", STATEMENT_ID))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let statement = sample_statement().with_id(Uuid::parse_str(STATEMENT_ID).unwrap());
    let stored = client_for(&server).statements().store_statement(&statement).await.unwrap();

    assert_eq!(stored, statement);
}

#[tokio::test]
async fn batch_store_zips_returned_ids_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/xapi/statements"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!("[\"{STATEMENT_ID}\",\"{SECOND_ID}\"]")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let statements = vec![sample_statement(), sample_statement()];
    let stored = client_for(&server).statements().store_statements(&statements).await.unwrap();

    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].id, Some(Uuid::parse_str(STATEMENT_ID).unwrap()));
    assert_eq!(stored[1].id, Some(Uuid::parse_str(SECOND_ID).unwrap()));
    assert!(statements.iter().all(|statement| statement.id.is_none()));
}

#[tokio::test]
async fn batch_store_rejects_statements_with_ids_before_any_network_call() {
    let server = MockServer::start().await;
    // No mock mounted: a network call would fail the test through the error
    // path below; the expect(0) guard makes the intent explicit.
    Mock::given(method("POST"))
        .and(path("/xapi/statements"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let statements = vec![sample_statement().with_id(Uuid::new_v4()), sample_statement()];
    let result = client_for(&server).statements().store_statements(&statements).await;

    assert!(matches!(result, Err(XApiError::InvalidArgument(_))));
}

#[tokio::test]
async fn voiding_stores_a_void_statement_referencing_the_original() {
    let server = MockServer::start().await;
    let void_body = serde_json::json!({
        "actor": { "objectType": "Agent", "mbox": "mailto:instructor@example.com" },
        "verb": {
            "id": "http://adlnet.gov/expapi/verbs/voided",
            "display": { "en-US": "voided" },
        },
        "object": { "objectType": "StatementRef", "id": STATEMENT_ID },
    });
    Mock::given(method("POST"))
        .and(path("/xapi/statements"))
        .and(body_json(void_body))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("[\"{SECOND_ID}\"]")))
        .expect(1)
        .mount(&server)
        .await;

    let stored = sample_statement().with_id(Uuid::parse_str(STATEMENT_ID).unwrap());
    let actor = Agent::with_mbox("mailto:instructor@example.com").into();
    let voiding =
        client_for(&server).statements().void_statement(&stored, &actor).await.unwrap();

    assert_eq!(voiding.id, Some(Uuid::parse_str(SECOND_ID).unwrap()));
    assert!(voiding.verb.is_void());
}

#[tokio::test]
async fn statements_are_fetched_by_id_and_voided_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/xapi/statements"))
        .and(query_param("statementId", STATEMENT_ID))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(sample_statement_json(Some(STATEMENT_ID))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/xapi/statements"))
        .and(query_param("voidedStatementId", SECOND_ID))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(sample_statement_json(Some(SECOND_ID))),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let id = Uuid::parse_str(STATEMENT_ID).unwrap();
    let statement = client.statements().get_statement(id).await.unwrap();
    assert_eq!(statement.id, Some(id));

    let voided_id = Uuid::parse_str(SECOND_ID).unwrap();
    let voided = client.statements().get_voided_statement(voided_id).await.unwrap();
    assert_eq!(voided.id, Some(voided_id));
}

#[tokio::test]
async fn missing_statements_surface_as_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/xapi/statements"))
        .respond_with(ResponseTemplate::new(404).set_body_string("No matching statement found"))
        .mount(&server)
        .await;

    let result = client_for(&server).statements().get_statement(Uuid::new_v4()).await;

    match result {
        Err(XApiError::NotFound(body)) => assert_eq!(body, "No matching statement found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn filtered_queries_serialize_the_agent_once_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/xapi/statements"))
        .and(query_param("verb", "http://adlnet.gov/expapi/verbs/attended"))
        .and(query_param("limit", "10"))
        .and(query_param("ascending", "True"))
        .and(query_param(
            "agent",
            r#"{"objectType":"Agent","mbox":"mailto:alice@example.com"}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "statements": [sample_statement_json(Some(STATEMENT_ID))],
            "more": "",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filter = xapi_client::StatementsFilter::new()
        .by_actor(Agent::with_mbox("mailto:alice@example.com").into())
        .unwrap()
        .by_verb(&xapi_model::Verb::new("http://adlnet.gov/expapi/verbs/attended"))
        .limit(10)
        .ascending();

    let result = client_for(&server).statements().get_statements(Some(&filter)).await.unwrap();

    assert_eq!(result.statements.len(), 1);
    assert_eq!(result.more_url_path(), None);
}

#[tokio::test]
async fn pagination_follows_the_literal_more_url() {
    let server = MockServer::start().await;
    let more = "/xapi/statements/more/b381d8eca64a61a42c7b9b4ecc2fabb6";
    Mock::given(method("GET"))
        .and(path(more))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "statements": [sample_statement_json(Some(SECOND_ID))],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let previous = StatementResult { statements: Vec::new(), more: Some(more.to_string()) };
    let next = client_for(&server).statements().get_next_statements(&previous).await.unwrap();

    assert_eq!(next.statements.len(), 1);
    assert_eq!(next.more_url_path(), None);
}

#[tokio::test]
async fn pagination_on_a_final_page_fails_without_a_request() {
    let server = MockServer::start().await;

    let previous = StatementResult { statements: Vec::new(), more: None };
    let result = client_for(&server).statements().get_next_statements(&previous).await;

    assert!(matches!(result, Err(XApiError::InvalidArgument(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn denied_and_conflicting_stores_map_to_typed_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/xapi/statements"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.statements().store_statement(&sample_statement()).await;
    match result {
        Err(XApiError::AccessDenied { message, status }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "bad credentials");
        }
        other => panic!("expected AccessDenied, got {other:?}"),
    }

    Mock::given(method("POST"))
        .and(path("/xapi/statements"))
        .respond_with(ResponseTemplate::new(409).set_body_string("conflicting statement"))
        .mount(&server)
        .await;

    let result = client.statements().store_statement(&sample_statement()).await;
    assert!(matches!(result, Err(XApiError::Conflict(body)) if body == "conflicting statement"));
}

#[tokio::test]
async fn statuses_outside_the_accepted_set_are_unexpected() {
    let server = MockServer::start().await;
    // 200 where only 204 is accepted: a PUT store answered like a POST.
    Mock::given(method("PUT"))
        .and(path("/xapi/statements"))
        .respond_with(ResponseTemplate::new(200).set_body_string("unexpected body"))
        .mount(&server)
        .await;

    let statement = sample_statement().with_id(Uuid::new_v4());
    let result = client_for(&server).statements().store_statement(&statement).await;

    match result {
        Err(XApiError::UnexpectedStatus { message, status }) => {
            assert_eq!(status, 200);
            assert_eq!(message, "unexpected body");
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn basic_credentials_ride_on_every_request() {
    let server = MockServer::start().await;
    // "alice:secret" base64-encoded.
    Mock::given(method("GET"))
        .and(path("/xapi/statements"))
        .and(header("Authorization", "Basic YWxpY2U6c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "statements": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).statements().get_statements(None).await.unwrap();

    assert!(result.statements.is_empty());
}
