//! Statement types: the activity records stored in an LRS
//!
//! Statements are immutable once stored. Operations that attach a
//! server-assigned id return a new value instead of mutating the caller's
//! instance.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::actor::Actor;
use crate::errors::{Result, XApiError};

/// IRI of the reserved verb marking a statement as voided.
pub const VERB_VOIDED: &str = "http://adlnet.gov/expapi/verbs/voided";

/// The action of a statement, identified by IRI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verb {
    /// The verb IRI.
    pub id: String,
    /// Human readable display values, keyed by RFC 5646 language tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<HashMap<String, String>>,
}

impl Verb {
    /// Create a verb from its IRI, without display values.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), display: None }
    }

    /// The reserved verb used to void a previously stored statement.
    pub fn voided() -> Self {
        Self {
            id: VERB_VOIDED.into(),
            display: Some(HashMap::from([("en-US".into(), "voided".into())])),
        }
    }

    /// Whether this is the reserved void verb.
    pub fn is_void(&self) -> bool {
        self.id == VERB_VOIDED
    }
}

/// Additional metadata describing an activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDefinition {
    /// Display name, keyed by language tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<HashMap<String, String>>,
    /// Description, keyed by language tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<HashMap<String, String>>,
}

/// Something an actor interacted with, identified by IRI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// The activity IRI.
    pub id: String,
    /// Optional definition metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<ActivityDefinition>,
}

impl Activity {
    /// Create an activity from its IRI.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), definition: None }
    }
}

/// A reference to another statement, used as a statement object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementReference {
    /// Id of the referenced statement.
    pub id: Uuid,
}

/// The "what" of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "objectType")]
pub enum StatementObject {
    /// An activity the actor interacted with.
    Activity(Activity),
    /// A reference to a previously stored statement.
    StatementRef(StatementReference),
}

impl From<Activity> for StatementObject {
    fn from(activity: Activity) -> Self {
        Self::Activity(activity)
    }
}

/// A score attached to a statement result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Score normalized into [-1, 1].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scaled: Option<f64>,
    /// Raw score between `min` and `max`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<f64>,
    /// Lowest possible raw score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Highest possible raw score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Measured outcome of a statement.
///
/// Named `XApiResult` to stay clear of `std::result::Result`; serialized
/// under the `result` key of a statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XApiResult {
    /// Score achieved by the actor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    /// Whether the attempt was successful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Whether the activity was completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<bool>,
    /// Response captured as part of the interaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// ISO 8601 duration of the interaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// An immutable activity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Statement id; assigned by the LRS on first store unless the caller
    /// supplies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Who performed the action.
    pub actor: Actor,
    /// The action performed.
    pub verb: Verb,
    /// What the action was performed on.
    pub object: StatementObject,
    /// Optional measured outcome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<XApiResult>,
    /// When the experience occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Statement {
    /// Create a statement without an id.
    pub fn new(actor: Actor, verb: Verb, object: StatementObject) -> Self {
        Self { id: None, actor, verb, object, result: None, timestamp: None }
    }

    /// Return a copy of this statement with the given id attached.
    ///
    /// The receiver is consumed; stored originals are never mutated in
    /// place. Callers keeping the unidentified value should clone first.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Build the statement voiding this one.
    ///
    /// The voiding statement has the given actor, the reserved void verb,
    /// and a statement reference pointing at this statement's id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when this statement has no id (an
    /// unstored statement cannot be voided).
    pub fn void_statement(&self, actor: Actor) -> Result<Self> {
        let id = self.id.ok_or_else(|| {
            XApiError::InvalidArgument("only statements with an id can be voided".into())
        })?;

        Ok(Self::new(actor, Verb::voided(), StatementObject::StatementRef(StatementReference { id })))
    }
}

/// One page of statements plus an optional pagination token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementResult {
    /// The statements of this page.
    pub statements: Vec<Statement>,
    /// Opaque URL path at which the next page can be fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more: Option<String>,
}

impl StatementResult {
    /// The URL path of the next page, if there is one.
    ///
    /// An empty token counts as absent: the LRS signals the last page
    /// either by omitting `more` or by sending an empty string.
    pub fn more_url_path(&self) -> Option<&str> {
        self.more.as_deref().filter(|url| !url.is_empty())
    }
}
