//! # xAPI Client
//!
//! HTTP client for xAPI (Experience API) learning record stores.
//!
//! This crate contains:
//! - Request building and execution against an LRS (`request`)
//! - The statements API client with filtering and pagination (`statements`)
//! - Document API clients for state, activity profile, and agent profile
//!   resources (`documents`)
//! - The client facade and its builder (`client`, `builder`)
//!
//! ## Architecture
//! - Domain types live in `xapi-model`; this crate owns all I/O
//! - Sub-clients are independent types sharing one request handler
//! - One network attempt per operation; errors carry the raw LRS response
//!
//! ## Example
//! ```no_run
//! use xapi_client::XApiClientBuilder;
//!
//! # async fn run() -> xapi_model::Result<()> {
//! let client = XApiClientBuilder::new()
//!     .base_url("https://lrs.example.com/xapi/")
//!     .auth("alice", "secret")
//!     .build()?;
//!
//! let statements = client.statements().get_statements(None).await?;
//! # let _ = statements;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod builder;
pub mod client;
pub mod documents;
pub mod filter;
pub mod request;
pub mod statements;

// Re-export commonly used items
pub use auth::{Credentials, OAuthCredentials};
pub use builder::XApiClientBuilder;
pub use client::XApiClient;
pub use documents::{ActivityProfileApi, AgentProfileApi, StateApi};
pub use filter::StatementsFilter;
pub use request::{Method, RequestHandler};
pub use statements::StatementsApi;
