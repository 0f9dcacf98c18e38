//! Security provider delegating to the authentication front-end.
//!
//! Requests are authenticated by [`AuthenticationSupport`]; when that yields no
//! session the [`Authenticator`] is asked to request credentials from the client.
//! Plain user/password checks still go through the repository when one is available.

use crate::access::AccessConfig;
use crate::collaborators::{AuthenticationSupport, Authenticator, Repository};
use crate::repository_provider::authenticate_with_repository;
use crate::types::{ConsoleUser, Credentials, ProviderKind, RequestParts, SecurityProvider};
use anyhow::Result;
use micromegas_tracing::prelude::*;
use std::sync::Arc;

pub struct SlingSecurityProvider {
    repository: Option<Arc<dyn Repository>>,
    auth_support: Arc<dyn AuthenticationSupport>,
    authenticator: Arc<dyn Authenticator>,
    access: AccessConfig,
}

impl SlingSecurityProvider {
    pub fn new(
        repository: Option<Arc<dyn Repository>>,
        auth_support: Arc<dyn AuthenticationSupport>,
        authenticator: Arc<dyn Authenticator>,
        access: AccessConfig,
    ) -> Self {
        Self {
            repository,
            auth_support,
            authenticator,
            access,
        }
    }

    pub fn has_repository(&self) -> bool {
        self.repository.is_some()
    }
}

#[async_trait::async_trait]
impl SecurityProvider for SlingSecurityProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Sling
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<ConsoleUser>> {
        match &self.repository {
            Some(repository) => {
                authenticate_with_repository(repository.as_ref(), &self.access, credentials).await
            }
            None => {
                debug!(
                    "no repository available to check credentials of {}",
                    credentials.user_id
                );
                Ok(None)
            }
        }
    }

    async fn authenticate_request(&self, parts: &dyn RequestParts) -> Result<Option<ConsoleUser>> {
        match self.auth_support.handle_security(parts).await? {
            Some(session) => {
                let admitted = self.access.admit(session.as_ref());
                if admitted.is_none() {
                    debug!(
                        "user {} is not allowed to access the console",
                        session.user_id()
                    );
                }
                session.logout();
                Ok(admitted)
            }
            None => {
                debug!("requesting credentials for {} {}", parts.method(), parts.uri());
                self.authenticator.login(parts).await?;
                Ok(None)
            }
        }
    }

    async fn logout(&self, parts: &dyn RequestParts) -> Result<()> {
        self.authenticator.logout(parts).await
    }
}
