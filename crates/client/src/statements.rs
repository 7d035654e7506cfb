//! Client for the statements resource of an LRS
//!
//! Statements are stored over POST/PUT and fetched over GET, one page at a
//! time. Stored statements are never mutated in place: store operations
//! return new values carrying the server-assigned ids.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;
use xapi_model::{Actor, Result, Statement, StatementResult, XApiError};

use crate::filter::StatementsFilter;
use crate::request::{Method, RequestHandler};

const STATEMENTS_PATH: &str = "statements";

/// Client for the `statements` resource.
#[derive(Debug, Clone)]
pub struct StatementsApi {
    handler: Arc<RequestHandler>,
}

impl StatementsApi {
    pub(crate) fn new(handler: Arc<RequestHandler>) -> Self {
        Self { handler }
    }

    /// Store a single statement.
    ///
    /// A statement that already carries an id is PUT under that id and
    /// returned unchanged; one without is POSTed and returned as a new
    /// value with the server-assigned id attached. The input is never
    /// mutated.
    ///
    /// # Errors
    ///
    /// Propagates request classification errors; a malformed id response
    /// from the LRS surfaces as `Serialization`.
    pub async fn store_statement(&self, statement: &Statement) -> Result<Statement> {
        match statement.id {
            Some(id) => {
                let query = vec![("statementId".to_string(), id.to_string())];
                self.store(Method::Put, &query, &serialize(statement)?, &[204]).await?;
                info!(%id, "stored statement under caller-assigned id");

                Ok(statement.clone())
            }
            None => {
                let response =
                    self.store(Method::Post, &[], &serialize(statement)?, &[200]).await?;
                let ids = parse_statement_ids(&response)?;
                let id = *ids.first().ok_or_else(|| {
                    XApiError::Serialization("LRS returned no statement id".into())
                })?;
                info!(%id, "stored statement");

                Ok(statement.clone().with_id(id))
            }
        }
    }

    /// Store a batch of statements, none of which may carry an id.
    ///
    /// The returned list matches the input order: element `i` is input `i`
    /// with the `i`-th server-assigned id attached.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` before any network call when an element
    /// already carries an id.
    pub async fn store_statements(&self, statements: &[Statement]) -> Result<Vec<Statement>> {
        // Only statements without ids may be sent to the LRS in a batch.
        if statements.iter().any(|statement| statement.id.is_some()) {
            return Err(XApiError::InvalidArgument(
                "API can only handle statements without ids".into(),
            ));
        }

        let body = serde_json::to_string(statements)
            .map_err(|err| XApiError::Serialization(err.to_string()))?;
        let response = self.store(Method::Post, &[], &body, &[200]).await?;
        let ids = parse_statement_ids(&response)?;

        if ids.len() != statements.len() {
            return Err(XApiError::Serialization(format!(
                "LRS returned {} ids for {} statements",
                ids.len(),
                statements.len()
            )));
        }
        info!(count = statements.len(), "stored statement batch");

        Ok(statements
            .iter()
            .zip(ids)
            .map(|(statement, id)| statement.clone().with_id(id))
            .collect())
    }

    /// Void a previously stored statement on behalf of an actor.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the statement has no id yet.
    pub async fn void_statement(&self, statement: &Statement, actor: &Actor) -> Result<Statement> {
        let voiding = statement.void_statement(actor.clone())?;
        self.store_statement(&voiding).await
    }

    /// Fetch a single statement by id.
    pub async fn get_statement(&self, statement_id: Uuid) -> Result<Statement> {
        self.fetch_one("statementId", statement_id).await
    }

    /// Fetch a single voided statement by id.
    ///
    /// Voided statements disappear from the regular statement queries and
    /// are only reachable through this accessor.
    pub async fn get_voided_statement(&self, statement_id: Uuid) -> Result<Statement> {
        self.fetch_one("voidedStatementId", statement_id).await
    }

    /// Fetch a page of statements matching a filter.
    ///
    /// The filter's actor, when present, is JSON-serialized exactly once
    /// before the request is built.
    pub async fn get_statements(
        &self,
        filter: Option<&StatementsFilter>,
    ) -> Result<StatementResult> {
        let mut query: Vec<(String, String)> = Vec::new();

        if let Some(filter) = filter {
            query.extend(
                filter.get_filter().iter().map(|(key, value)| (key.clone(), value.clone())),
            );

            // The agent query value is the JSON rendering of the actor.
            if let Some(actor) = filter.actor() {
                let agent = serde_json::to_string(actor)
                    .map_err(|err| XApiError::Serialization(err.to_string()))?;
                query.push(("agent".to_string(), agent));
            }
        }

        self.fetch_result(STATEMENTS_PATH, &query).await
    }

    /// Fetch the next page of a previous result.
    ///
    /// Issues a GET at the literal "more" URL path of the previous page,
    /// with no further query parameters appended. Callers loop until
    /// [`StatementResult::more_url_path`] returns `None`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the previous result has no more
    /// pages.
    pub async fn get_next_statements(
        &self,
        previous: &StatementResult,
    ) -> Result<StatementResult> {
        let more = previous.more_url_path().ok_or_else(|| {
            XApiError::InvalidArgument("statement result has no more pages".into())
        })?;

        self.fetch_result(more, &[]).await
    }

    async fn store(
        &self,
        method: Method,
        query: &[(String, String)],
        body: &str,
        accepted: &[u16],
    ) -> Result<String> {
        let request =
            self.handler.create_request(method, STATEMENTS_PATH, query, Some(body.to_string()))?;
        let response = self.handler.execute(request, accepted).await?;

        response.text().await.map_err(|err| XApiError::Network(err.to_string()))
    }

    async fn fetch_one(&self, key: &str, statement_id: Uuid) -> Result<Statement> {
        debug!(%statement_id, key, "fetching statement");
        let query = vec![(key.to_string(), statement_id.to_string())];
        let request = self.handler.create_request(Method::Get, STATEMENTS_PATH, &query, None)?;
        let response = self.handler.execute(request, &[200]).await?;
        let body = response.text().await.map_err(|err| XApiError::Network(err.to_string()))?;

        serde_json::from_str(&body).map_err(|err| XApiError::Serialization(err.to_string()))
    }

    async fn fetch_result(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<StatementResult> {
        let request = self.handler.create_request(Method::Get, path, query, None)?;
        let response = self.handler.execute(request, &[200]).await?;
        let body = response.text().await.map_err(|err| XApiError::Network(err.to_string()))?;

        serde_json::from_str(&body).map_err(|err| XApiError::Serialization(err.to_string()))
    }
}

fn serialize(statement: &Statement) -> Result<String> {
    serde_json::to_string(statement).map_err(|err| XApiError::Serialization(err.to_string()))
}

/// Parse the id array the LRS returns for store operations.
fn parse_statement_ids(body: &str) -> Result<Vec<Uuid>> {
    if body.is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(body).map_err(|err| {
        XApiError::Serialization(format!("malformed statement id response: {err}"))
    })
}
