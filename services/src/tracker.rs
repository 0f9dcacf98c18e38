use crate::error::{Result, ServicesError};
use crate::host::{ChangeCallback, ServiceHost, ServiceKind, ServiceRef, SubscriptionId};
use std::sync::{Arc, Mutex};

/// Follows the availability of one service type in the host
pub struct ServiceTracker {
    host: Arc<dyn ServiceHost>,
    kind: ServiceKind,
    subscription: Mutex<Option<SubscriptionId>>,
}

impl ServiceTracker {
    /// Subscribes `on_change` to additions and removals of `kind`
    pub fn open(host: Arc<dyn ServiceHost>, kind: ServiceKind, on_change: ChangeCallback) -> Self {
        let subscription = host.subscribe(kind, on_change);
        Self {
            host,
            kind,
            subscription: Mutex::new(Some(subscription)),
        }
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// Current instance of the tracked type, queried from the host on every call
    pub fn service(&self) -> Option<ServiceRef> {
        self.host.lookup(self.kind)
    }

    pub fn is_available(&self) -> bool {
        self.service().is_some()
    }

    pub fn is_open(&self) -> Result<bool> {
        let subscription = self
            .subscription
            .lock()
            .map_err(|_| ServicesError::LockPoisoned("tracker subscription"))?;
        Ok(subscription.is_some())
    }

    /// Stops receiving change notifications. Closing twice does nothing.
    pub fn close(&self) -> Result<()> {
        let mut subscription = self
            .subscription
            .lock()
            .map_err(|_| ServicesError::LockPoisoned("tracker subscription"))?;
        if let Some(id) = subscription.take() {
            self.host.unsubscribe(id);
        }
        Ok(())
    }
}
