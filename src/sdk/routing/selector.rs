use super::service::RoutingProvider;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Online,
    Offline,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Online => write!(f, "online"),
            Backend::Offline => write!(f, "offline"),
        }
    }
}

/// Connectivity flag shared with whoever knows about the network. Clones
/// observe the same value.
#[derive(Debug, Clone, Default)]
pub struct ConnectivitySignal(Arc<AtomicBool>);

impl ConnectivitySignal {
    pub fn new(connected: bool) -> Self {
        Self(Arc::new(AtomicBool::new(connected)))
    }

    pub fn set(&self, connected: bool) {
        self.0.store(connected, Ordering::SeqCst);
    }

    pub fn is_connected(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Hands out the online engine while connected and the offline engine
/// otherwise. Looks only at the current flag.
pub struct BackendSelector {
    online: Arc<dyn RoutingProvider>,
    offline: Arc<dyn RoutingProvider>,
    signal: ConnectivitySignal,
}

impl BackendSelector {
    pub fn new(
        online: Arc<dyn RoutingProvider>,
        offline: Arc<dyn RoutingProvider>,
        signal: ConnectivitySignal,
    ) -> Self {
        Self {
            online,
            offline,
            signal,
        }
    }

    pub fn signal(&self) -> &ConnectivitySignal {
        &self.signal
    }

    pub fn set_connected(&self, connected: bool) {
        self.signal.set(connected);
    }

    pub fn select_for(connected: bool) -> Backend {
        if connected {
            Backend::Online
        } else {
            Backend::Offline
        }
    }

    pub fn current_kind(&self) -> Backend {
        Self::select_for(self.signal.is_connected())
    }

    pub fn provider(&self, backend: Backend) -> Arc<dyn RoutingProvider> {
        match backend {
            Backend::Online => Arc::clone(&self.online),
            Backend::Offline => Arc::clone(&self.offline),
        }
    }

    /// The engine the next request should use.
    pub fn select(&self) -> Arc<dyn RoutingProvider> {
        let backend = self.current_kind();
        log::debug!("[SELECTOR] Using {} engine", backend);
        self.provider(backend)
    }
}
