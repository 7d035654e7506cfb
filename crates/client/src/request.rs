//! Request building and execution against an LRS
//!
//! `RequestHandler` owns the HTTP transport, the protocol version, and the
//! credentials. Every sub-client routes its calls through one shared
//! handler: `create_request` produces a transport-ready request with the
//! protocol headers attached, `execute` performs the single network attempt
//! and classifies the response status.

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Request, Response};
use tracing::{debug, warn};
use url::Url;
use xapi_model::{Result, XApiError};

use crate::auth::Credentials;

/// Name of the protocol version header carried by every request.
pub const VERSION_HEADER: &str = "X-Experience-API-Version";

/// HTTP methods supported by the LRS resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Retrieve a resource.
    Get,
    /// Create or update a resource.
    Post,
    /// Create or replace a resource.
    Put,
    /// Remove a resource.
    Delete,
}

impl Method {
    /// Parse a verb string, rejecting anything the LRS resources do not use.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMethod` for any verb outside get/post/put/delete.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "delete" => Ok(Self::Delete),
            _ => Err(XApiError::InvalidMethod(value.to_string())),
        }
    }

    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Outcome of classifying a response status against an accepted set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusClass {
    /// Status is acceptable; hand the response back to the caller.
    Accepted,
    /// 401 or 403.
    AccessDenied,
    /// 404.
    NotFound,
    /// 409.
    Conflict,
    /// Anything else outside the accepted set.
    Unexpected,
}

/// Classify a status code, in fixed precedence order.
///
/// The well-known error codes win over the accepted set: a 404 is `NotFound`
/// even when the caller listed 404 as acceptable.
pub(crate) fn classify_status(status: u16, accepted: &[u16]) -> StatusClass {
    match status {
        401 | 403 => StatusClass::AccessDenied,
        404 => StatusClass::NotFound,
        409 => StatusClass::Conflict,
        _ if accepted.contains(&status) => StatusClass::Accepted,
        _ => StatusClass::Unexpected,
    }
}

/// Shared request builder and executor for all sub-clients.
#[derive(Debug)]
pub struct RequestHandler {
    client: Client,
    base_url: Url,
    version: String,
    credentials: Credentials,
}

impl RequestHandler {
    /// Create a handler from its configured parts.
    ///
    /// The base URL must end with a trailing slash so that relative
    /// resource paths resolve underneath it; the builder normalizes this.
    pub(crate) fn new(
        client: Client,
        base_url: Url,
        version: String,
        credentials: Credentials,
    ) -> Self {
        Self { client, base_url, version, credentials }
    }

    /// The configured xAPI version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Build a transport-ready request.
    ///
    /// `path` is resolved against the base URL; it may also be an absolute
    /// URL path such as a pagination token. Non-empty `query` pairs are
    /// appended percent-encoded. `body` is a pre-serialized JSON string.
    ///
    /// # Errors
    ///
    /// Returns `Config` when the path does not resolve against the base
    /// URL, and `Network` when the transport rejects the assembled request.
    pub fn create_request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<String>,
    ) -> Result<Request> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|err| XApiError::Config(format!("invalid request path {path}: {err}")))?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let mut builder = self
            .client
            .request(method.as_reqwest(), url.clone())
            .header(VERSION_HEADER, &self.version)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        builder = match &self.credentials {
            Credentials::None => builder,
            Credentials::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
            Credentials::OAuth(oauth) => {
                let header = oauth.authorization_header(method.as_str(), &url)?;
                builder.header(AUTHORIZATION, header)
            }
        };

        if let Some(body) = body {
            builder = builder.body(body);
        }

        builder.build().map_err(|err| XApiError::Network(format!("invalid request: {err}")))
    }

    /// Build a request from a raw verb string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMethod` before anything else happens when the verb
    /// is not one of get/post/put/delete; otherwise behaves like
    /// [`create_request`](Self::create_request).
    pub fn request_for(
        &self,
        method: &str,
        path: &str,
        query: &[(String, String)],
        body: Option<String>,
    ) -> Result<Request> {
        self.create_request(Method::parse(method)?, path, query, body)
    }

    /// Perform the single network attempt for a request and classify the
    /// response status.
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` for 401/403, `NotFound` for 404, `Conflict`
    /// for 409, and `UnexpectedStatus` for any other status outside
    /// `accepted` — each carrying the raw response body. Transport
    /// failures surface as `Network`.
    pub async fn execute(&self, request: Request, accepted: &[u16]) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending LRS request");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| XApiError::Network(format!("http request failed: {err}")))?;

        let status = response.status().as_u16();
        debug!(%method, %url, status, "received LRS response");

        match classify_status(status, accepted) {
            StatusClass::Accepted => Ok(response),
            StatusClass::AccessDenied => {
                warn!(%url, status, "LRS denied access");
                Err(XApiError::AccessDenied { message: read_error_body(response).await, status })
            }
            StatusClass::NotFound => Err(XApiError::NotFound(read_error_body(response).await)),
            StatusClass::Conflict => Err(XApiError::Conflict(read_error_body(response).await)),
            StatusClass::Unexpected => {
                warn!(%url, status, "LRS returned unexpected status");
                Err(XApiError::UnexpectedStatus {
                    message: read_error_body(response).await,
                    status,
                })
            }
        }
    }
}

/// Drain the response body for use as an error diagnostic.
async fn read_error_body(response: Response) -> String {
    response.text().await.unwrap_or_default()
}
