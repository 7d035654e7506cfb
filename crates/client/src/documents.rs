//! Clients for the document resources of an LRS
//!
//! The state, activity profile, and agent profile resources share one
//! request template and differ only in resource path and key fields. The
//! shared plumbing lives in `DocumentResource`; each public client maps its
//! key type onto query parameters and re-attaches the key to fetched
//! documents.

use std::sync::Arc;

use tracing::{debug, info};
use xapi_model::{
    ActivityProfile, ActivityProfileDocument, Actor, AgentProfile, AgentProfileDocument,
    DocumentContent, Result, State, StateDocument, XApiError,
};

use crate::request::{Method, RequestHandler};

/// Request plumbing shared by the three document clients.
#[derive(Debug, Clone)]
struct DocumentResource {
    handler: Arc<RequestHandler>,
    path: &'static str,
}

impl DocumentResource {
    async fn store(
        &self,
        method: Method,
        query: &[(String, String)],
        content: &DocumentContent,
    ) -> Result<()> {
        let body = serde_json::to_string(content)
            .map_err(|err| XApiError::Serialization(err.to_string()))?;
        let request = self.handler.create_request(method, self.path, query, Some(body))?;
        self.handler.execute(request, &[204]).await?;
        info!(path = self.path, "stored document");

        Ok(())
    }

    async fn delete(&self, query: &[(String, String)]) -> Result<()> {
        let request = self.handler.create_request(Method::Delete, self.path, query, None)?;
        self.handler.execute(request, &[204]).await?;
        info!(path = self.path, "deleted document");

        Ok(())
    }

    async fn fetch(&self, query: &[(String, String)]) -> Result<DocumentContent> {
        debug!(path = self.path, "fetching document");
        let request = self.handler.create_request(Method::Get, self.path, query, None)?;
        let response = self.handler.execute(request, &[200]).await?;
        let body = response.text().await.map_err(|err| XApiError::Network(err.to_string()))?;

        serde_json::from_str(&body).map_err(|err| XApiError::Serialization(err.to_string()))
    }
}

/// JSON-serialize an actor-valued key field for the query map.
fn serialize_agent(actor: &Actor) -> Result<String> {
    serde_json::to_string(actor).map_err(|err| XApiError::Serialization(err.to_string()))
}

// ============================================================================
// State
// ============================================================================

/// Client for the `activities/state` resource.
#[derive(Debug, Clone)]
pub struct StateApi {
    resource: DocumentResource,
}

impl StateApi {
    pub(crate) fn new(handler: Arc<RequestHandler>) -> Self {
        Self { resource: DocumentResource { handler, path: "activities/state" } }
    }

    /// Store a state document, merging with any existing one server-side.
    pub async fn create_or_update_document(&self, document: &StateDocument) -> Result<()> {
        self.resource.store(Method::Post, &state_query(&document.state)?, &document.content).await
    }

    /// Store a state document, replacing any existing one.
    pub async fn create_or_replace_document(&self, document: &StateDocument) -> Result<()> {
        self.resource.store(Method::Put, &state_query(&document.state)?, &document.content).await
    }

    /// Delete the state document under the given key.
    pub async fn delete_document(&self, state: &State) -> Result<()> {
        self.resource.delete(&state_query(state)?).await
    }

    /// Fetch the state document under the given key.
    ///
    /// The server response carries only the payload; the key is re-attached
    /// to the returned document.
    pub async fn get_document(&self, state: &State) -> Result<StateDocument> {
        let content = self.resource.fetch(&state_query(state)?).await?;

        Ok(StateDocument { state: state.clone(), content })
    }
}

fn state_query(state: &State) -> Result<Vec<(String, String)>> {
    let mut query = vec![
        ("activityId".to_string(), state.activity_id.clone()),
        ("agent".to_string(), serialize_agent(&state.agent)?),
        ("stateId".to_string(), state.state_id.clone()),
    ];
    if let Some(registration) = state.registration {
        query.push(("registration".to_string(), registration.to_string()));
    }

    Ok(query)
}

// ============================================================================
// Activity profile
// ============================================================================

/// Client for the `activities/profile` resource.
#[derive(Debug, Clone)]
pub struct ActivityProfileApi {
    resource: DocumentResource,
}

impl ActivityProfileApi {
    pub(crate) fn new(handler: Arc<RequestHandler>) -> Self {
        Self { resource: DocumentResource { handler, path: "activities/profile" } }
    }

    /// Store an activity profile document, merging with any existing one
    /// server-side.
    pub async fn create_or_update_document(
        &self,
        document: &ActivityProfileDocument,
    ) -> Result<()> {
        self.resource
            .store(Method::Post, &activity_profile_query(&document.profile), &document.content)
            .await
    }

    /// Store an activity profile document, replacing any existing one.
    pub async fn create_or_replace_document(
        &self,
        document: &ActivityProfileDocument,
    ) -> Result<()> {
        self.resource
            .store(Method::Put, &activity_profile_query(&document.profile), &document.content)
            .await
    }

    /// Delete the profile document under the given key.
    pub async fn delete_document(&self, profile: &ActivityProfile) -> Result<()> {
        self.resource.delete(&activity_profile_query(profile)).await
    }

    /// Fetch the profile document under the given key, re-attaching the key.
    pub async fn get_document(&self, profile: &ActivityProfile) -> Result<ActivityProfileDocument> {
        let content = self.resource.fetch(&activity_profile_query(profile)).await?;

        Ok(ActivityProfileDocument { profile: profile.clone(), content })
    }
}

fn activity_profile_query(profile: &ActivityProfile) -> Vec<(String, String)> {
    vec![
        ("activityId".to_string(), profile.activity_id.clone()),
        ("profileId".to_string(), profile.profile_id.clone()),
    ]
}

// ============================================================================
// Agent profile
// ============================================================================

/// Client for the `agents/profile` resource.
#[derive(Debug, Clone)]
pub struct AgentProfileApi {
    resource: DocumentResource,
}

impl AgentProfileApi {
    pub(crate) fn new(handler: Arc<RequestHandler>) -> Self {
        Self { resource: DocumentResource { handler, path: "agents/profile" } }
    }

    /// Store an agent profile document, merging with any existing one
    /// server-side.
    pub async fn create_or_update_document(&self, document: &AgentProfileDocument) -> Result<()> {
        self.resource
            .store(Method::Post, &agent_profile_query(&document.profile)?, &document.content)
            .await
    }

    /// Store an agent profile document, replacing any existing one.
    pub async fn create_or_replace_document(&self, document: &AgentProfileDocument) -> Result<()> {
        self.resource
            .store(Method::Put, &agent_profile_query(&document.profile)?, &document.content)
            .await
    }

    /// Delete the profile document under the given key.
    pub async fn delete_document(&self, profile: &AgentProfile) -> Result<()> {
        self.resource.delete(&agent_profile_query(profile)?).await
    }

    /// Fetch the profile document under the given key, re-attaching the key.
    pub async fn get_document(&self, profile: &AgentProfile) -> Result<AgentProfileDocument> {
        let content = self.resource.fetch(&agent_profile_query(profile)?).await?;

        Ok(AgentProfileDocument { profile: profile.clone(), content })
    }
}

fn agent_profile_query(profile: &AgentProfile) -> Result<Vec<(String, String)>> {
    Ok(vec![
        ("agent".to_string(), serialize_agent(&profile.agent)?),
        ("profileId".to_string(), profile.profile_id.clone()),
    ])
}
