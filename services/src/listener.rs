//! Keeps the published security provider in line with the available services.
//!
//! Every change notification recomputes the target [`State`] from a fresh look at
//! the host and swaps the published provider only when that state differs from
//! the one currently published.

use crate::config::{AuthType, ListenerConfig};
use crate::error::{Result, ServicesError};
use crate::host::{ChangeCallback, Registration, ServiceHost, ServiceKind, ServiceRef};
use crate::tracker::ServiceTracker;
use micromegas_tracing::prelude::*;
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use webconsole_auth::collaborators::{AuthenticationSupport, Authenticator, Repository};
use webconsole_auth::repository_provider::RepositorySecurityProvider;
use webconsole_auth::sling_provider::SlingSecurityProvider;
use webconsole_auth::types::SecurityProvider;

/// Which provider should be published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    None,
    ProviderJcr,
    ProviderSling,
}

impl State {
    /// Target state for a mode and the services currently available.
    ///
    /// `Default` prefers the front-end provider, `Jcr` ignores it, `Sling` never
    /// falls back to the repository.
    pub fn target(auth_type: AuthType, has_auth_support: bool, has_repository: bool) -> Self {
        match (auth_type, has_auth_support, has_repository) {
            (AuthType::Default, true, _) => State::ProviderSling,
            (AuthType::Default, false, true) => State::ProviderJcr,
            (AuthType::Jcr, _, true) => State::ProviderJcr,
            (AuthType::Sling, true, _) => State::ProviderSling,
            _ => State::None,
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            State::None => write!(f, "none"),
            State::ProviderJcr => write!(f, "repository provider"),
            State::ProviderSling => write!(f, "sling provider"),
        }
    }
}

/// Services seen by one reconciliation
struct Snapshot {
    repository: Option<Arc<dyn Repository>>,
    auth_support: Option<Arc<dyn AuthenticationSupport>>,
    authenticator: Option<Arc<dyn Authenticator>>,
}

impl Snapshot {
    fn has_repository(&self) -> bool {
        self.repository.is_some()
    }

    // authentication support only counts together with an authenticator
    fn has_auth_support(&self) -> bool {
        self.auth_support.is_some() && self.authenticator.is_some()
    }
}

struct ActiveRegistration {
    state: State,
    registration: Registration,
}

#[derive(Default)]
struct Reconciliation {
    active: Option<ActiveRegistration>,
    deactivated: bool,
}

impl Reconciliation {
    fn state(&self) -> State {
        self.active.as_ref().map_or(State::None, |active| active.state)
    }

    fn withdraw(&mut self, host: &dyn ServiceHost) -> Result<()> {
        if let Some(active) = &self.active {
            host.withdraw(&active.registration)?;
            info!(
                "withdrew {} registration {}",
                active.state, active.registration
            );
        }
        self.active = None;
        Ok(())
    }
}

/// Publishes at most one security provider, chosen from the mode and the services
/// available in the host.
pub struct ServicesListener {
    host: Arc<dyn ServiceHost>,
    config: ListenerConfig,
    // filled once the listener is shared, so notifications sent while subscribing are not lost
    trackers: Mutex<Vec<ServiceTracker>>,
    reconciliation: Mutex<Reconciliation>,
}

const TRACKED: [ServiceKind; 3] = [
    ServiceKind::Repository,
    ServiceKind::AuthenticationSupport,
    ServiceKind::Authenticator,
];

fn change_callback(listener: Weak<ServicesListener>) -> ChangeCallback {
    Arc::new(move || {
        let Some(listener) = listener.upgrade() else {
            return;
        };
        match listener.notify_change() {
            Ok(()) | Err(ServicesError::Deactivated) => {}
            Err(e) => error!("failed to update security provider: {e}"),
        }
    })
}

impl ServicesListener {
    /// Subscribes to the three collaborating service types.
    ///
    /// Nothing is published until the first [`notify_change`](Self::notify_change),
    /// which a host may deliver while the subscriptions are being made.
    pub fn new(host: Arc<dyn ServiceHost>, config: ListenerConfig) -> Arc<Self> {
        info!("web console authentication type: {}", config.auth_type);
        let listener = Arc::new(Self {
            host: host.clone(),
            config,
            trackers: Mutex::new(Vec::with_capacity(TRACKED.len())),
            reconciliation: Mutex::new(Reconciliation::default()),
        });
        let weak = Arc::downgrade(&listener);
        for kind in TRACKED {
            let tracker = ServiceTracker::open(host.clone(), kind, change_callback(weak.clone()));
            match listener.trackers.lock() {
                Ok(mut trackers) => trackers.push(tracker),
                Err(_) => {
                    error!("services listener trackers poisoned, dropping {kind} subscription");
                    if let Err(e) = tracker.close() {
                        error!("failed to close {kind} tracker: {e}");
                    }
                }
            }
        }
        listener
    }

    /// Reads the authentication mode and access policy from the host properties, once
    pub fn from_host(host: Arc<dyn ServiceHost>) -> Result<Arc<Self>> {
        let config = ListenerConfig::from_properties(host.as_ref())?;
        Ok(Self::new(host, config))
    }

    pub fn auth_type(&self) -> AuthType {
        self.config.auth_type
    }

    pub fn config(&self) -> &ListenerConfig {
        &self.config
    }

    pub fn target_state(&self, has_auth_support: bool, has_repository: bool) -> State {
        State::target(self.config.auth_type, has_auth_support, has_repository)
    }

    /// State of the currently published provider
    pub fn active_state(&self) -> Result<State> {
        Ok(self.lock()?.state())
    }

    pub fn active_registration(&self) -> Result<Option<Registration>> {
        Ok(self
            .lock()?
            .active
            .as_ref()
            .map(|active| active.registration))
    }

    /// Brings the published provider in line with the services available right now.
    ///
    /// Calls are serialized; a call that finds the target state already published
    /// leaves the registration untouched.
    pub fn notify_change(&self) -> Result<()> {
        let mut reconciliation = self.lock()?;
        if reconciliation.deactivated {
            return Err(ServicesError::Deactivated);
        }

        let snapshot = self.snapshot();
        let target = self.target_state(snapshot.has_auth_support(), snapshot.has_repository());
        let current = reconciliation.state();
        if target == current {
            return Ok(());
        }

        debug!("switching security provider from {current} to {target}");
        reconciliation.withdraw(self.host.as_ref())?;
        let Some(provider) = self.build_provider(target, snapshot) else {
            return Ok(());
        };
        let registration = self.host.publish(provider)?;
        info!("published {target} registration {registration}");
        reconciliation.active = Some(ActiveRegistration {
            state: target,
            registration,
        });
        Ok(())
    }

    /// Withdraws the published provider and stops tracking services.
    ///
    /// Calling it again afterwards does nothing.
    pub fn deactivate(&self) -> Result<()> {
        let mut reconciliation = self.lock()?;
        if reconciliation.deactivated {
            return Ok(());
        }
        let trackers = std::mem::take(
            &mut *self
                .trackers
                .lock()
                .map_err(|_| ServicesError::LockPoisoned("services listener trackers"))?,
        );
        for tracker in &trackers {
            tracker.close()?;
        }
        reconciliation.withdraw(self.host.as_ref())?;
        reconciliation.deactivated = true;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Reconciliation>> {
        self.reconciliation
            .lock()
            .map_err(|_| ServicesError::LockPoisoned("services listener"))
    }

    // queries the host directly: trackers may still be subscribing
    fn snapshot(&self) -> Snapshot {
        let lookup = |kind| self.host.lookup(kind);
        Snapshot {
            repository: lookup(ServiceKind::Repository).and_then(ServiceRef::into_repository),
            auth_support: lookup(ServiceKind::AuthenticationSupport)
                .and_then(ServiceRef::into_authentication_support),
            authenticator: lookup(ServiceKind::Authenticator)
                .and_then(ServiceRef::into_authenticator),
        }
    }

    fn build_provider(
        &self,
        target: State,
        snapshot: Snapshot,
    ) -> Option<Arc<dyn SecurityProvider>> {
        let access = self.config.access.clone();
        match target {
            State::None => None,
            State::ProviderJcr => {
                let repository = snapshot.repository?;
                Some(Arc::new(RepositorySecurityProvider::new(repository, access)))
            }
            State::ProviderSling => {
                let auth_support = snapshot.auth_support?;
                let authenticator = snapshot.authenticator?;
                Some(Arc::new(SlingSecurityProvider::new(
                    snapshot.repository,
                    auth_support,
                    authenticator,
                    access,
                )))
            }
        }
    }
}

impl Drop for ServicesListener {
    fn drop(&mut self) {
        if let Err(e) = self.deactivate() {
            warn!("failed to deactivate services listener: {e}");
        }
    }
}
