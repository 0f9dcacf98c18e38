#![allow(dead_code)]

use anyhow::{Result, bail};
use std::sync::Arc;
use webconsole_auth::collaborators::{AuthenticationSupport, Authenticator, Repository, Session};
use webconsole_auth::types::{Credentials, ProviderKind, RequestParts};
use webconsole_services::host::ServiceRef;
use webconsole_services::memory::InMemoryHost;

pub struct NullRepository;

#[async_trait::async_trait]
impl Repository for NullRepository {
    async fn login(&self, credentials: &Credentials) -> Result<Box<dyn Session>> {
        bail!("no user {}", credentials.user_id)
    }
}

/// Accepts every login; sessions belong to the given groups
pub struct GroupRepository {
    pub groups: Vec<String>,
}

struct GroupSession {
    user_id: String,
    groups: Vec<String>,
}

impl Session for GroupSession {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn is_member_of(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    fn logout(&self) {}
}

#[async_trait::async_trait]
impl Repository for GroupRepository {
    async fn login(&self, credentials: &Credentials) -> Result<Box<dyn Session>> {
        Ok(Box::new(GroupSession {
            user_id: credentials.user_id.clone(),
            groups: self.groups.clone(),
        }))
    }
}

pub struct NullAuthSupport;

#[async_trait::async_trait]
impl AuthenticationSupport for NullAuthSupport {
    async fn handle_security(&self, _parts: &dyn RequestParts) -> Result<Option<Box<dyn Session>>> {
        Ok(None)
    }
}

pub struct NullAuthenticator;

#[async_trait::async_trait]
impl Authenticator for NullAuthenticator {
    async fn login(&self, _parts: &dyn RequestParts) -> Result<()> {
        Ok(())
    }

    async fn logout(&self, _parts: &dyn RequestParts) -> Result<()> {
        Ok(())
    }
}

pub fn repository() -> ServiceRef {
    ServiceRef::Repository(Arc::new(NullRepository))
}

pub fn group_repository(groups: &[&str]) -> ServiceRef {
    ServiceRef::Repository(Arc::new(GroupRepository {
        groups: groups.iter().map(|g| g.to_string()).collect(),
    }))
}

pub fn auth_support() -> ServiceRef {
    ServiceRef::AuthenticationSupport(Arc::new(NullAuthSupport))
}

pub fn authenticator() -> ServiceRef {
    ServiceRef::Authenticator(Arc::new(NullAuthenticator))
}

/// Kind of the provider the host currently exposes to the console
pub fn published_kind(host: &InMemoryHost) -> Option<ProviderKind> {
    host.security_provider()
        .expect("host state")
        .map(|provider| provider.kind())
}
