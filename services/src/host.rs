//! Contract of the host environment the listener runs in.
//!
//! The host discovers collaborating services, tells interested parties when they
//! come and go, exposes configuration properties and lets a component publish a
//! security provider for the console to use.

use crate::error::Result;
use std::fmt::Display;
use std::sync::Arc;
use webconsole_auth::collaborators::{AuthenticationSupport, Authenticator, Repository};
use webconsole_auth::types::SecurityProvider;

/// Collaborating service types the listener tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Repository,
    AuthenticationSupport,
    Authenticator,
}

impl Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceKind::Repository => write!(f, "repository"),
            ServiceKind::AuthenticationSupport => write!(f, "authentication support"),
            ServiceKind::Authenticator => write!(f, "authenticator"),
        }
    }
}

/// Handle on an available collaborating service
#[derive(Clone)]
pub enum ServiceRef {
    Repository(Arc<dyn Repository>),
    AuthenticationSupport(Arc<dyn AuthenticationSupport>),
    Authenticator(Arc<dyn Authenticator>),
}

impl ServiceRef {
    pub fn kind(&self) -> ServiceKind {
        match self {
            ServiceRef::Repository(_) => ServiceKind::Repository,
            ServiceRef::AuthenticationSupport(_) => ServiceKind::AuthenticationSupport,
            ServiceRef::Authenticator(_) => ServiceKind::Authenticator,
        }
    }

    pub fn into_repository(self) -> Option<Arc<dyn Repository>> {
        match self {
            ServiceRef::Repository(repository) => Some(repository),
            _ => None,
        }
    }

    pub fn into_authentication_support(self) -> Option<Arc<dyn AuthenticationSupport>> {
        match self {
            ServiceRef::AuthenticationSupport(auth_support) => Some(auth_support),
            _ => None,
        }
    }

    pub fn into_authenticator(self) -> Option<Arc<dyn Authenticator>> {
        match self {
            ServiceRef::Authenticator(authenticator) => Some(authenticator),
            _ => None,
        }
    }
}

/// Identifies a change subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Identity of one publication of a security provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Registration(pub u64);

impl Display for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Invoked by the host whenever a service of the subscribed kind is added or removed.
///
/// The callback carries no payload: subscribers re-query the host.
pub type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// Configuration properties of the host
pub trait PropertySource: Send + Sync {
    fn property(&self, name: &str) -> Option<String>;
}

/// Host environment services and provider publication
pub trait ServiceHost: PropertySource {
    /// Returns an available instance of the service type, if there is one
    fn lookup(&self, kind: ServiceKind) -> Option<ServiceRef>;

    fn subscribe(&self, kind: ServiceKind, callback: ChangeCallback) -> SubscriptionId;

    fn unsubscribe(&self, subscription: SubscriptionId);

    /// Makes the provider available to the console
    fn publish(&self, provider: Arc<dyn SecurityProvider>) -> Result<Registration>;

    /// Removes a publication made by `publish`
    fn withdraw(&self, registration: &Registration) -> Result<()>;
}
