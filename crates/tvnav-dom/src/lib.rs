//! Host page seam for tvnav.
//!
//! The navigator never touches a browser directly. Everything it needs from the
//! page (element discovery, geometry, computed style, class and style mutation,
//! scrolling, activation, history and media control) goes through [`HostPage`].
//!
//! [`MemoryPage`] is a serde-loadable page snapshot implementing the trait. It
//! records every side effect so callers can inspect what the navigator did.

mod dom_node;
mod dom_types;
mod error;
mod memory_page;
mod page;
mod selector;

pub use dom_node::{ElementId, ElementNode};
pub use dom_types::{BoundingBox, ComputedStyle, MediaState, NodeAttributes};
pub use error::DomError;
pub use memory_page::{Activation, MemoryPage, PageSnapshot, ScrollRecord};
pub use page::{
    CursorStyle, HostPage, MediaEvent, MediaEventKind, ScrollBehavior, ScrollBlock, ScrollOptions,
};
pub use selector::SelectorList;

#[cfg(test)]
#[path = "dom_tests.rs"]
mod tests;
