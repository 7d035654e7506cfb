//! Document types for the state and profile resources
//!
//! Documents are small JSON payloads keyed by a composite natural key
//! (state, activity profile, or agent profile). Only the payload crosses
//! the wire; the key object is re-attached after a fetch so callers get
//! the key and content back together.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::actor::Actor;

/// Arbitrary JSON document payload.
pub type DocumentContent = Map<String, Value>;

/// Key of a state document: activity, agent, and state id.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// IRI of the activity the state belongs to.
    pub activity_id: String,
    /// The agent the state belongs to.
    pub agent: Actor,
    /// Caller-chosen state id.
    pub state_id: String,
    /// Optional registration scoping the state.
    pub registration: Option<Uuid>,
}

impl State {
    /// Create a state key without a registration.
    pub fn new(
        activity_id: impl Into<String>,
        agent: impl Into<Actor>,
        state_id: impl Into<String>,
    ) -> Self {
        Self {
            activity_id: activity_id.into(),
            agent: agent.into(),
            state_id: state_id.into(),
            registration: None,
        }
    }

    /// Scope the state to a registration.
    pub fn with_registration(mut self, registration: Uuid) -> Self {
        self.registration = Some(registration);
        self
    }
}

/// Key of an activity profile document: activity and profile id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityProfile {
    /// IRI of the activity the profile belongs to.
    pub activity_id: String,
    /// Caller-chosen profile id.
    pub profile_id: String,
}

impl ActivityProfile {
    /// Create an activity profile key.
    pub fn new(activity_id: impl Into<String>, profile_id: impl Into<String>) -> Self {
        Self { activity_id: activity_id.into(), profile_id: profile_id.into() }
    }
}

/// Key of an agent profile document: agent and profile id.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentProfile {
    /// The agent the profile belongs to.
    pub agent: Actor,
    /// Caller-chosen profile id.
    pub profile_id: String,
}

impl AgentProfile {
    /// Create an agent profile key.
    pub fn new(agent: impl Into<Actor>, profile_id: impl Into<String>) -> Self {
        Self { agent: agent.into(), profile_id: profile_id.into() }
    }
}

/// A state document: key plus JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct StateDocument {
    /// The composite key of this document.
    pub state: State,
    /// The JSON payload.
    pub content: DocumentContent,
}

/// An activity profile document: key plus JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityProfileDocument {
    /// The composite key of this document.
    pub profile: ActivityProfile,
    /// The JSON payload.
    pub content: DocumentContent,
}

/// An agent profile document: key plus JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentProfileDocument {
    /// The composite key of this document.
    pub profile: AgentProfile,
    /// The JSON payload.
    pub content: DocumentContent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Agent;

    #[test]
    fn state_key_carries_optional_registration() {
        let registration = Uuid::new_v4();
        let state = State::new(
            "http://example.com/activities/training",
            Agent::with_mbox("mailto:alice@example.com"),
            "bookmark",
        );
        assert_eq!(state.registration, None);

        let scoped = state.with_registration(registration);
        assert_eq!(scoped.registration, Some(registration));
    }

    #[test]
    fn document_content_is_plain_json() {
        let mut content = DocumentContent::new();
        content.insert("page".into(), Value::from(17));

        let doc = ActivityProfileDocument {
            profile: ActivityProfile::new("http://example.com/activities/training", "progress"),
            content,
        };

        assert_eq!(doc.content["page"], 17);
    }
}
