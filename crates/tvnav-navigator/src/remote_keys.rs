//! Registration of extended remote keys with the host platform.

use tracing::{info, warn};

use crate::error::NavigatorError;

/// Platform API that routes extra remote keys (media, volume) to the page.
pub trait InputDeviceApi: Send {
    fn register_key_batch(&mut self, keys: &[String]) -> Result<(), NavigatorError>;
}

/// Register `keys` with the platform. Failures are logged and absorbed.
pub fn register_remote_keys(api: &mut dyn InputDeviceApi, keys: &[String]) -> bool {
    if keys.is_empty() {
        return false;
    }
    match api.register_key_batch(keys) {
        Ok(()) => {
            info!("Registered {} remote control keys", keys.len());
            true
        }
        Err(e) => {
            warn!("TV input device registration failed: {}", e);
            false
        }
    }
}
