//! Builder assembling a configured client
//!
//! Configuration-with-defaults: the base URL is required, everything else
//! has a sensible default. Credentials are exclusive — setting Basic after
//! OAuth (or vice versa) replaces the earlier choice.

use std::time::Duration;

use reqwest::Client;
use url::Url;
use xapi_model::{Result, XApiError};

use crate::auth::{Credentials, OAuthCredentials};
use crate::client::XApiClient;
use crate::request::RequestHandler;

const DEFAULT_VERSION: &str = "1.0.1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for [`XApiClient`].
#[derive(Debug, Default)]
pub struct XApiClientBuilder {
    base_url: Option<String>,
    version: Option<String>,
    credentials: Credentials,
    timeout: Duration,
    http_client: Option<Client>,
}

impl XApiClientBuilder {
    /// Start with defaults.
    pub fn new() -> Self {
        Self { timeout: DEFAULT_TIMEOUT, ..Self::default() }
    }

    /// Set the LRS endpoint base URL (required).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the xAPI version string sent with every request.
    ///
    /// Defaults to `"1.0.1"`.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Use HTTP Basic authentication.
    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials =
            Credentials::Basic { username: username.into(), password: password.into() };
        self
    }

    /// Use OAuth 1.0a request signing.
    pub fn oauth_credentials(
        mut self,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        self.credentials = Credentials::OAuth(OAuthCredentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: token.into(),
            token_secret: token_secret.into(),
        });
        self
    }

    /// Set the transport-level request timeout for the auto-constructed
    /// HTTP client. Ignored when a client is injected.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Inject a pre-configured HTTP client instead of constructing one.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Validate the configuration and build the client.
    ///
    /// # Errors
    ///
    /// Returns `Config` when the base URL is missing or malformed, or when
    /// the HTTP client cannot be constructed.
    pub fn build(self) -> Result<XApiClient> {
        let base_url =
            self.base_url.ok_or_else(|| XApiError::Config("base URL is required".into()))?;

        let mut base_url = Url::parse(&base_url)
            .map_err(|err| XApiError::Config(format!("invalid base URL {base_url}: {err}")))?;

        // Relative resource paths resolve underneath the base URL only
        // when its path ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = match self.http_client {
            Some(client) => client,
            None => Client::builder().timeout(self.timeout).build().map_err(|err| {
                XApiError::Config(format!("failed to build HTTP client: {err}"))
            })?,
        };

        let version = self.version.unwrap_or_else(|| DEFAULT_VERSION.to_string());

        Ok(XApiClient::new(RequestHandler::new(client, base_url, version, self.credentials)))
    }
}
