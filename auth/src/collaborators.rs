//! Contracts of the services the providers are wired to.
//!
//! The host environment owns the implementations; providers only hold `Arc` handles.

use crate::types::{Credentials, RequestParts};
use anyhow::Result;

/// Authenticated connection to the content repository
pub trait Session: Send + Sync {
    fn user_id(&self) -> &str;

    /// Whether the session user belongs to `group`, directly or transitively
    fn is_member_of(&self, group: &str) -> bool;

    fn logout(&self);
}

/// Content repository used for authentication and console data access
#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    /// Opens a session for the credentials. An error means the repository refused them.
    async fn login(&self, credentials: &Credentials) -> Result<Box<dyn Session>>;
}

/// Pluggable authentication front-end
#[async_trait::async_trait]
pub trait AuthenticationSupport: Send + Sync {
    /// Authenticates the request with whatever mechanism applies to it.
    ///
    /// Returns `None` when the request does not carry acceptable authentication.
    async fn handle_security(&self, parts: &dyn RequestParts) -> Result<Option<Box<dyn Session>>>;
}

/// Drives the client through login and logout
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    /// Asks the client to provide credentials
    async fn login(&self, parts: &dyn RequestParts) -> Result<()>;

    async fn logout(&self, parts: &dyn RequestParts) -> Result<()>;
}
