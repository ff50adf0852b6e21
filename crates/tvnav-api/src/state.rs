//! Shared handler state.

use tokio::sync::watch;
use tvnav_config::ServiceConfig;
use tvnav_navigator::DebugSnapshot;

/// Identity reported by the status endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    /// Long name, reported by `/health`.
    pub name: String,
    /// Short name, reported by `/api/status`.
    pub short_name: String,
    pub version: String,
}

impl ServiceInfo {
    /// Build from config; the version defaults to the crate version.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            name: config.name.clone(),
            short_name: config.short_name.clone(),
            version: config
                .version
                .clone()
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
        }
    }
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self::from_config(&ServiceConfig::default())
    }
}

/// Application state shared across handlers.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub service: ServiceInfo,
    navigator: Option<watch::Receiver<DebugSnapshot>>,
}

impl AppState {
    pub fn new(service: ServiceInfo) -> Self {
        Self {
            service,
            navigator: None,
        }
    }

    /// Expose a running navigator's debug snapshots.
    pub fn with_navigator(mut self, snapshots: watch::Receiver<DebugSnapshot>) -> Self {
        self.navigator = Some(snapshots);
        self
    }

    /// Latest navigator snapshot, if a navigator is attached.
    pub fn navigator_snapshot(&self) -> Option<DebugSnapshot> {
        self.navigator.as_ref().map(|rx| rx.borrow().clone())
    }
}
