//! In-memory host environment.
//!
//! Services registered here are visible to lookups immediately, and subscribers of
//! the registered kind are notified on the calling thread once the host state has
//! been updated and unlocked.

use crate::error::{Result, ServicesError};
use crate::host::{
    ChangeCallback, PropertySource, Registration, ServiceHost, ServiceKind, ServiceRef,
    SubscriptionId,
};
use micromegas_tracing::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use webconsole_auth::types::SecurityProvider;

/// Identifies a service registered with [`InMemoryHost::register_service`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceId(pub u64);

#[derive(Default)]
struct HostState {
    services: Vec<(ServiceId, ServiceRef)>,
    subscribers: HashMap<SubscriptionId, (ServiceKind, ChangeCallback)>,
    properties: HashMap<String, String>,
    providers: Vec<(Registration, Arc<dyn SecurityProvider>)>,
    publish_count: u64,
}

#[derive(Default)]
pub struct InMemoryHost {
    state: Mutex<HostState>,
    next_id: AtomicU64,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if let Err(e) = self.set_property(name.as_str(), value) {
            error!("cannot set property {name}: {e}");
        }
        self
    }

    pub fn set_property(&self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.lock()?.properties.insert(name.into(), value.into());
        Ok(())
    }

    pub fn remove_property(&self, name: &str) -> Result<()> {
        self.lock()?.properties.remove(name);
        Ok(())
    }

    /// Makes a service available and notifies the subscribers of its kind
    pub fn register_service(&self, service: ServiceRef) -> Result<ServiceId> {
        let id = ServiceId(self.next_id());
        let kind = service.kind();
        let callbacks = {
            let mut state = self.lock()?;
            state.services.push((id, service));
            state.callbacks(kind)
        };
        debug!("registered {kind} service {id:?}");
        notify(callbacks);
        Ok(id)
    }

    /// Removes a service. Returns false if it was not registered.
    pub fn unregister_service(&self, id: ServiceId) -> Result<bool> {
        let (kind, callbacks) = {
            let mut state = self.lock()?;
            let Some(index) = state.services.iter().position(|(sid, _)| *sid == id) else {
                return Ok(false);
            };
            let (_, service) = state.services.remove(index);
            let kind = service.kind();
            (kind, state.callbacks(kind))
        };
        debug!("unregistered {kind} service {id:?}");
        notify(callbacks);
        Ok(true)
    }

    /// The published security provider, if any. With several publications the oldest wins.
    pub fn security_provider(&self) -> Result<Option<Arc<dyn SecurityProvider>>> {
        Ok(self
            .lock()?
            .providers
            .first()
            .map(|(_, provider)| provider.clone()))
    }

    /// Number of providers published right now
    pub fn published_count(&self) -> Result<usize> {
        Ok(self.lock()?.providers.len())
    }

    /// Number of `publish` calls over the host's lifetime
    pub fn publish_count(&self) -> Result<u64> {
        Ok(self.lock()?.publish_count)
    }

    pub fn subscriber_count(&self) -> Result<usize> {
        Ok(self.lock()?.subscribers.len())
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HostState>> {
        self.state
            .lock()
            .map_err(|_| ServicesError::LockPoisoned("in-memory host"))
    }
}

impl HostState {
    fn callbacks(&self, kind: ServiceKind) -> Vec<ChangeCallback> {
        self.subscribers
            .values()
            .filter(|(subscribed, _)| *subscribed == kind)
            .map(|(_, callback)| callback.clone())
            .collect()
    }
}

// callbacks may call back into the host, never invoke them with the state locked
fn notify(callbacks: Vec<ChangeCallback>) {
    for callback in callbacks {
        callback();
    }
}

impl PropertySource for InMemoryHost {
    fn property(&self, name: &str) -> Option<String> {
        match self.lock() {
            Ok(state) => state.properties.get(name).cloned(),
            Err(e) => {
                error!("cannot read property {name}: {e}");
                None
            }
        }
    }
}

impl ServiceHost for InMemoryHost {
    fn lookup(&self, kind: ServiceKind) -> Option<ServiceRef> {
        let state = match self.lock() {
            Ok(state) => state,
            Err(e) => {
                error!("cannot look up {kind} service: {e}");
                return None;
            }
        };
        state
            .services
            .iter()
            .find(|(_, service)| service.kind() == kind)
            .map(|(_, service)| service.clone())
    }

    fn subscribe(&self, kind: ServiceKind, callback: ChangeCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id());
        match self.lock() {
            Ok(mut state) => {
                state.subscribers.insert(id, (kind, callback));
            }
            Err(e) => error!("cannot subscribe to {kind}: {e}"),
        }
        id
    }

    fn unsubscribe(&self, subscription: SubscriptionId) {
        match self.lock() {
            Ok(mut state) => {
                state.subscribers.remove(&subscription);
            }
            Err(e) => error!("cannot unsubscribe {subscription:?}: {e}"),
        }
    }

    fn publish(&self, provider: Arc<dyn SecurityProvider>) -> Result<Registration> {
        let registration = Registration(self.next_id());
        let mut state = self.lock()?;
        state.providers.push((registration, provider));
        state.publish_count += 1;
        Ok(registration)
    }

    fn withdraw(&self, registration: &Registration) -> Result<()> {
        let mut state = self.lock()?;
        let index = state
            .providers
            .iter()
            .position(|(published, _)| published == registration)
            .ok_or(ServicesError::UnknownRegistration(registration.0))?;
        state.providers.remove(index);
        Ok(())
    }
}
