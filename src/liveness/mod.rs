// Package liveness aggregates service health for the probe endpoint.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Service interface for liveness checking.
pub trait Service: Send + Sync {
    /// Checks if the service is alive.
    fn is_alive(&self) -> bool;
}

impl Service for AtomicBool {
    fn is_alive(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Liveness probe over a set of watched services.
#[derive(Default)]
pub struct Probe {
    services: RwLock<Vec<Arc<dyn Service>>>,
}

impl Probe {
    /// Creates a probe with nothing watched yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds services to the watched set.
    pub fn watch(&self, services: Vec<Arc<dyn Service>>) {
        self.services.write().extend(services);
    }

    /// Alive only when something is watched and every watched service is alive.
    pub fn is_alive(&self) -> bool {
        let services = self.services.read();
        if services.is_empty() {
            warn!(component = "liveness", event = "no_services", "nothing is watched yet");
            return false;
        }
        services.iter().all(|s| s.is_alive())
    }
}
