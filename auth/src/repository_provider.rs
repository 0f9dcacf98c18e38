use crate::access::AccessConfig;
use crate::collaborators::Repository;
use crate::types::{ConsoleUser, Credentials, ProviderKind, SecurityProvider};
use anyhow::Result;
use micromegas_tracing::prelude::*;
use std::sync::Arc;

/// Logs into the repository and applies the access policy to the resulting session.
///
/// The session only lives for the duration of the check.
pub(crate) async fn authenticate_with_repository(
    repository: &dyn Repository,
    access: &AccessConfig,
    credentials: &Credentials,
) -> Result<Option<ConsoleUser>> {
    let session = match repository.login(credentials).await {
        Ok(session) => session,
        Err(e) => {
            debug!("repository login failed for {}: {e}", credentials.user_id);
            return Ok(None);
        }
    };
    let admitted = access.admit(session.as_ref());
    if admitted.is_none() {
        debug!(
            "user {} is not allowed to access the console",
            session.user_id()
        );
    }
    session.logout();
    Ok(admitted)
}

/// Security provider checking console credentials against the content repository
pub struct RepositorySecurityProvider {
    repository: Arc<dyn Repository>,
    access: AccessConfig,
}

impl RepositorySecurityProvider {
    pub fn new(repository: Arc<dyn Repository>, access: AccessConfig) -> Self {
        Self { repository, access }
    }

    pub fn access(&self) -> &AccessConfig {
        &self.access
    }
}

#[async_trait::async_trait]
impl SecurityProvider for RepositorySecurityProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Repository
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<Option<ConsoleUser>> {
        authenticate_with_repository(self.repository.as_ref(), &self.access, credentials).await
    }
}
