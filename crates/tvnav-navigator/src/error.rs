//! Navigator error types.

use thiserror::Error;
use tvnav_dom::DomError;

#[derive(Debug, Error)]
pub enum NavigatorError {
    /// A configured selector list failed to compile.
    #[error("Invalid {field} selectors: {source}")]
    Selector {
        field: &'static str,
        #[source]
        source: DomError,
    },

    /// The platform rejected the remote key registration.
    #[error("Remote key registration failed: {0}")]
    Registration(String),

    /// The controller task has stopped and no longer accepts events.
    #[error("Navigator controller is closed")]
    ControllerClosed,
}

impl NavigatorError {
    pub(crate) fn selector(field: &'static str, source: DomError) -> Self {
        Self::Selector { field, source }
    }
}
