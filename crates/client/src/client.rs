//! Client facade over the four LRS sub-clients
//!
//! One `XApiClient` shares a single request handler (transport, base URL,
//! version, credentials) across the statements client and the three
//! document clients.

use std::sync::Arc;

use crate::builder::XApiClientBuilder;
use crate::documents::{ActivityProfileApi, AgentProfileApi, StateApi};
use crate::request::RequestHandler;
use crate::statements::StatementsApi;

/// Client for an xAPI learning record store.
///
/// Construct through [`XApiClient::builder`]. Cloning is cheap; all clones
/// share the same transport and configuration.
#[derive(Debug, Clone)]
pub struct XApiClient {
    handler: Arc<RequestHandler>,
}

impl XApiClient {
    pub(crate) fn new(handler: RequestHandler) -> Self {
        Self { handler: Arc::new(handler) }
    }

    /// Start building a new client.
    pub fn builder() -> XApiClientBuilder {
        XApiClientBuilder::new()
    }

    /// The configured xAPI version string.
    pub fn version(&self) -> &str {
        self.handler.version()
    }

    /// Client for the statements resource.
    pub fn statements(&self) -> StatementsApi {
        StatementsApi::new(self.handler.clone())
    }

    /// Client for the `activities/state` document resource.
    pub fn states(&self) -> StateApi {
        StateApi::new(self.handler.clone())
    }

    /// Client for the `activities/profile` document resource.
    pub fn activity_profiles(&self) -> ActivityProfileApi {
        ActivityProfileApi::new(self.handler.clone())
    }

    /// Client for the `agents/profile` document resource.
    pub fn agent_profiles(&self) -> AgentProfileApi {
        AgentProfileApi::new(self.handler.clone())
    }
}
