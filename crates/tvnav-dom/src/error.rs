//! DOM error types.

use thiserror::Error;

/// Errors raised while building selectors or loading page snapshots.
#[derive(Debug, Error)]
pub enum DomError {
    /// Selector outside the supported subset.
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Two snapshot elements share an id.
    #[error("Duplicate element id: {0}")]
    DuplicateElement(u64),

    /// An element references a parent that is not in the snapshot.
    #[error("Element {child} references unknown parent {parent}")]
    UnknownParent { child: u64, parent: u64 },

    /// Following parent links from an element leads back to it.
    #[error("Element {0} is its own ancestor")]
    ParentCycle(u64),

    /// Snapshot (de)serialization error.
    #[error("Snapshot format error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DomError {
    pub(crate) fn selector(selector: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}
