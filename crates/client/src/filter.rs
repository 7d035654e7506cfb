//! Filter applied to GET requests against the statements resource
//!
//! Chainable accumulator over the optional query parameters the statements
//! resource understands. Single-owner by contract: build one filter per
//! query, hand it to [`StatementsApi::get_statements`].
//!
//! [`StatementsApi::get_statements`]: crate::statements::StatementsApi::get_statements

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use xapi_model::{Activity, Actor, Result, Verb, XApiError};

/// Accumulator for the statements query parameters.
///
/// Setters consume and return the filter so calls chain. The actor set by
/// [`by_actor`](Self::by_actor) is held unserialized; the statements client
/// JSON-encodes it exactly once when the request is built.
#[derive(Debug, Clone, Default)]
pub struct StatementsFilter {
    agent: Option<Actor>,
    params: BTreeMap<String, String>,
}

impl StatementsFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by the actor of a statement.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the actor carries no inverse
    /// functional identifier (an anonymous group cannot be filtered on).
    pub fn by_actor(mut self, actor: Actor) -> Result<Self> {
        if !actor.is_identified() {
            return Err(XApiError::InvalidArgument("Actor must be identified".into()));
        }

        self.agent = Some(actor);
        Ok(self)
    }

    /// Filter by verb IRI.
    pub fn by_verb(mut self, verb: &Verb) -> Self {
        self.params.insert("verb".into(), verb.id.clone());
        self
    }

    /// Filter by activity IRI.
    pub fn by_activity(mut self, activity: &Activity) -> Self {
        self.params.insert("activity".into(), activity.id.clone());
        self
    }

    /// Filter by registration id.
    pub fn by_registration(mut self, registration: Uuid) -> Self {
        self.params.insert("registration".into(), registration.to_string());
        self
    }

    /// Match statements whose context activities include the filtered
    /// activity, not only statement objects.
    pub fn enable_related_activity_filter(mut self) -> Self {
        self.params.insert("related_activities".into(), "true".into());
        self
    }

    /// Restrict the activity filter back to statement objects.
    pub fn disable_related_activity_filter(mut self) -> Self {
        self.params.insert("related_activities".into(), "false".into());
        self
    }

    /// Match statements whose context or object agents include the
    /// filtered actor.
    pub fn enable_related_agent_filter(mut self) -> Self {
        self.params.insert("related_agents".into(), "true".into());
        self
    }

    /// Restrict the actor filter back to statement actors.
    pub fn disable_related_agent_filter(mut self) -> Self {
        self.params.insert("related_agents".into(), "false".into());
        self
    }

    /// Only match statements stored at or after the given time.
    pub fn since(mut self, timestamp: DateTime<Utc>) -> Self {
        self.params.insert("since".into(), timestamp.to_rfc3339());
        self
    }

    /// Only match statements stored at or before the given time.
    pub fn until(mut self, timestamp: DateTime<Utc>) -> Self {
        self.params.insert("until".into(), timestamp.to_rfc3339());
        self
    }

    /// Cap the number of statements per page.
    pub fn limit(mut self, limit: u32) -> Self {
        self.params.insert("limit".into(), limit.to_string());
        self
    }

    /// Signed variant of [`limit`](Self::limit) for callers holding signed
    /// counts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when `limit` is negative.
    pub fn limit_signed(self, limit: i64) -> Result<Self> {
        if limit < 0 {
            return Err(XApiError::InvalidArgument(
                "Limit must be a non-negative integer".into(),
            ));
        }

        Ok(self.limit(u32::try_from(limit).map_err(|_| {
            XApiError::InvalidArgument("Limit must fit into 32 bits".into())
        })?))
    }

    /// Choose the statement rendering: `ids`, `exact`, or `canonical`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for any other format token.
    pub fn format(mut self, format: &str) -> Result<Self> {
        if !matches!(format, "ids" | "exact" | "canonical") {
            return Err(XApiError::InvalidArgument(format!("Unknown format {format} given")));
        }

        self.params.insert("format".into(), format.into());
        Ok(self)
    }

    /// Ask the LRS to include statement attachments.
    pub fn include_attachments(mut self) -> Self {
        self.params.insert("attachments".into(), "true".into());
        self
    }

    /// Ask the LRS to omit statement attachments.
    pub fn exclude_attachments(mut self) -> Self {
        self.params.insert("attachments".into(), "false".into());
        self
    }

    /// Return statements in ascending stored order.
    ///
    /// The server expects the literal token `"True"`; this is the wire
    /// contract, not a boolean.
    pub fn ascending(mut self) -> Self {
        self.params.insert("ascending".into(), "True".into());
        self
    }

    /// Return statements in descending stored order (literal `"False"`).
    pub fn descending(mut self) -> Self {
        self.params.insert("ascending".into(), "False".into());
        self
    }

    /// The accumulated parameter map, without the actor.
    ///
    /// Idempotent and side-effect-free; the actor is exposed separately
    /// through [`actor`](Self::actor) because it is serialized only when
    /// the request is built.
    pub fn get_filter(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// The actor stored by [`by_actor`](Self::by_actor), if any.
    pub fn actor(&self) -> Option<&Actor> {
        self.agent.as_ref()
    }
}
