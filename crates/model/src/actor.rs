//! Actor types: agents, groups, and their identifiers
//!
//! An actor is identified by exactly one inverse functional identifier
//! (mbox, mbox SHA1 sum, OpenID, or account). Groups may be anonymous,
//! in which case they carry members but no identifier of their own.

use serde::{Deserialize, Serialize};

use crate::errors::XApiError;

/// A user account on an existing system, used as an actor identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// The URL of the system the account lives on.
    pub home_page: String,
    /// The account name or id on that system.
    pub name: String,
}

/// Inverse functional identifier uniquely naming an agent or identified group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InverseFunctionalIdentifier {
    /// A `mailto:` IRI.
    Mbox(String),
    /// The SHA1 hash of a `mailto:` IRI.
    MboxSha1Sum(String),
    /// An OpenID URI.
    OpenId(String),
    /// An account on an existing system.
    Account(Account),
}

/// An agent: an individual actor identified by exactly one IFI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ActorRepr", into = "ActorRepr")]
pub struct Agent {
    /// Optional display name; never used for identification.
    pub name: Option<String>,
    /// The identifier of this agent.
    pub ifi: InverseFunctionalIdentifier,
}

/// A group of agents, identified or anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ActorRepr", into = "ActorRepr")]
pub struct Group {
    /// Optional display name.
    pub name: Option<String>,
    /// Identifier of the group itself; `None` for anonymous groups.
    pub ifi: Option<InverseFunctionalIdentifier>,
    /// The agents belonging to this group.
    pub members: Vec<Agent>,
}

/// An actor: the "who" of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ActorRepr", into = "ActorRepr")]
pub enum Actor {
    /// An individual agent.
    Agent(Agent),
    /// A group of agents.
    Group(Group),
}

impl Agent {
    /// Create an agent identified by a `mailto:` IRI.
    pub fn with_mbox(mbox: impl Into<String>) -> Self {
        Self { name: None, ifi: InverseFunctionalIdentifier::Mbox(mbox.into()) }
    }

    /// Create an agent identified by an account.
    pub fn with_account(home_page: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: None,
            ifi: InverseFunctionalIdentifier::Account(Account {
                home_page: home_page.into(),
                name: name.into(),
            }),
        }
    }

    /// Set the display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Group {
    /// Create an anonymous group from its members.
    pub fn anonymous(members: Vec<Agent>) -> Self {
        Self { name: None, ifi: None, members }
    }

    /// Create an identified group.
    pub fn identified(ifi: InverseFunctionalIdentifier) -> Self {
        Self { name: None, ifi: Some(ifi), members: Vec::new() }
    }
}

impl Actor {
    /// The actor's inverse functional identifier, if it has one.
    ///
    /// Agents are always identified; anonymous groups return `None`.
    pub fn ifi(&self) -> Option<&InverseFunctionalIdentifier> {
        match self {
            Self::Agent(agent) => Some(&agent.ifi),
            Self::Group(group) => group.ifi.as_ref(),
        }
    }

    /// Whether this actor carries an inverse functional identifier.
    pub fn is_identified(&self) -> bool {
        self.ifi().is_some()
    }
}

impl From<Agent> for Actor {
    fn from(agent: Agent) -> Self {
        Self::Agent(agent)
    }
}

impl From<Group> for Actor {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

// ============================================================================
// Wire representation
// ============================================================================

/// Flat xAPI wire form shared by agents and groups.
///
/// The IFI variants appear as sibling keys (`mbox`, `mbox_sha1sum`, `openid`,
/// `account`) of which exactly one may be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ActorRepr {
    #[serde(rename = "objectType", skip_serializing_if = "Option::is_none")]
    object_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mbox: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mbox_sha1sum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    openid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account: Option<Account>,
    #[serde(skip_serializing_if = "Option::is_none")]
    member: Option<Vec<ActorRepr>>,
}

impl ActorRepr {
    fn ifi(&self) -> Result<Option<InverseFunctionalIdentifier>, XApiError> {
        let mut found = Vec::new();
        if let Some(mbox) = &self.mbox {
            found.push(InverseFunctionalIdentifier::Mbox(mbox.clone()));
        }
        if let Some(sum) = &self.mbox_sha1sum {
            found.push(InverseFunctionalIdentifier::MboxSha1Sum(sum.clone()));
        }
        if let Some(openid) = &self.openid {
            found.push(InverseFunctionalIdentifier::OpenId(openid.clone()));
        }
        if let Some(account) = &self.account {
            found.push(InverseFunctionalIdentifier::Account(account.clone()));
        }
        if found.len() > 1 {
            return Err(XApiError::Serialization(
                "actor carries more than one inverse functional identifier".into(),
            ));
        }
        Ok(found.pop())
    }

    fn set_ifi(&mut self, ifi: InverseFunctionalIdentifier) {
        match ifi {
            InverseFunctionalIdentifier::Mbox(mbox) => self.mbox = Some(mbox),
            InverseFunctionalIdentifier::MboxSha1Sum(sum) => self.mbox_sha1sum = Some(sum),
            InverseFunctionalIdentifier::OpenId(openid) => self.openid = Some(openid),
            InverseFunctionalIdentifier::Account(account) => self.account = Some(account),
        }
    }
}

impl TryFrom<ActorRepr> for Agent {
    type Error = XApiError;

    fn try_from(repr: ActorRepr) -> Result<Self, Self::Error> {
        let ifi = repr
            .ifi()?
            .ok_or_else(|| XApiError::Serialization("agent without identifier".into()))?;
        Ok(Self { name: repr.name, ifi })
    }
}

impl From<Agent> for ActorRepr {
    fn from(agent: Agent) -> Self {
        let mut repr =
            Self { object_type: Some("Agent".into()), name: agent.name, ..Self::default() };
        repr.set_ifi(agent.ifi);
        repr
    }
}

impl TryFrom<ActorRepr> for Group {
    type Error = XApiError;

    fn try_from(repr: ActorRepr) -> Result<Self, Self::Error> {
        let ifi = repr.ifi()?;
        let members = repr
            .member
            .unwrap_or_default()
            .into_iter()
            .map(Agent::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { name: repr.name, ifi, members })
    }
}

impl From<Group> for ActorRepr {
    fn from(group: Group) -> Self {
        let mut repr =
            Self { object_type: Some("Group".into()), name: group.name, ..Self::default() };
        if let Some(ifi) = group.ifi {
            repr.set_ifi(ifi);
        }
        if !group.members.is_empty() {
            repr.member = Some(group.members.into_iter().map(ActorRepr::from).collect());
        }
        repr
    }
}

impl TryFrom<ActorRepr> for Actor {
    type Error = XApiError;

    fn try_from(repr: ActorRepr) -> Result<Self, Self::Error> {
        // A missing objectType denotes an Agent per the xAPI data format.
        let object_type = repr.object_type.clone();
        match object_type.as_deref() {
            Some("Group") => Ok(Self::Group(Group::try_from(repr)?)),
            Some("Agent") | None => Ok(Self::Agent(Agent::try_from(repr)?)),
            Some(other) => {
                Err(XApiError::Serialization(format!("unknown actor objectType {other}")))
            }
        }
    }
}

impl From<Actor> for ActorRepr {
    fn from(actor: Actor) -> Self {
        match actor {
            Actor::Agent(agent) => Self::from(agent),
            Actor::Group(group) => Self::from(group),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_serializes_to_flat_wire_form() {
        let agent = Agent::with_mbox("mailto:alice@example.com").named("Alice");
        let json = serde_json::to_value(Actor::from(agent)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "objectType": "Agent",
                "name": "Alice",
                "mbox": "mailto:alice@example.com",
            })
        );
    }

    #[test]
    fn agent_without_object_type_deserializes() {
        let actor: Actor =
            serde_json::from_value(serde_json::json!({ "mbox": "mailto:alice@example.com" }))
                .unwrap();

        assert!(matches!(
            actor.ifi(),
            Some(InverseFunctionalIdentifier::Mbox(mbox)) if mbox == "mailto:alice@example.com"
        ));
    }

    #[test]
    fn account_round_trips_with_camel_case_home_page() {
        let agent = Agent::with_account("https://lrs.example.com", "alice");
        let json = serde_json::to_value(Actor::from(agent.clone())).unwrap();

        assert_eq!(json["account"]["homePage"], "https://lrs.example.com");
        let back: Actor = serde_json::from_value(json).unwrap();
        assert_eq!(back, Actor::from(agent));
    }

    #[test]
    fn anonymous_group_has_no_identifier() {
        let group = Group::anonymous(vec![Agent::with_mbox("mailto:alice@example.com")]);
        let actor = Actor::from(group);

        assert!(!actor.is_identified());

        let json = serde_json::to_value(&actor).unwrap();
        assert_eq!(json["objectType"], "Group");
        assert_eq!(json["member"][0]["mbox"], "mailto:alice@example.com");
    }

    #[test]
    fn agent_with_two_identifiers_is_rejected() {
        let result: Result<Actor, _> = serde_json::from_value(serde_json::json!({
            "objectType": "Agent",
            "mbox": "mailto:alice@example.com",
            "openid": "https://openid.example.com/alice",
        }));

        assert!(result.is_err());
    }

    #[test]
    fn agent_without_identifier_is_rejected() {
        let result: Result<Actor, _> =
            serde_json::from_value(serde_json::json!({ "objectType": "Agent", "name": "Alice" }));

        assert!(result.is_err());
    }
}
