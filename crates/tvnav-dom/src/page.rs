//! The host page trait and the value types that cross it.

use serde::{Deserialize, Serialize};

use crate::dom_node::ElementId;
use crate::dom_types::{BoundingBox, ComputedStyle, MediaState};
use crate::selector::SelectorList;

/// Scroll animation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

/// Vertical alignment of a scrolled-to element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBlock {
    Start,
    Center,
    End,
    Nearest,
}

/// Options for [`HostPage::scroll_into_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

impl ScrollOptions {
    /// Smooth scroll that centers the element vertically.
    pub fn smooth_center() -> Self {
        Self {
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Center,
        }
    }
}

/// Pointer cursor applied to the document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorStyle {
    Default,
    None,
}

/// Media element state transitions forwarded to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaEventKind {
    Play,
    Pause,
}

/// A media state transition on a listened element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEvent {
    pub target: ElementId,
    pub kind: MediaEventKind,
}

/// Access to the live document the navigator drives.
///
/// Reads are cheap and side-effect free. Writes apply immediately; the host is
/// single-threaded so no write can interleave with a navigator operation.
pub trait HostPage {
    /// All elements in document order.
    fn elements(&self) -> Vec<ElementId>;

    /// Lowercase tag name, `None` if the element no longer exists.
    fn tag_name(&self, id: ElementId) -> Option<String>;

    fn attribute(&self, id: ElementId, name: &str) -> Option<String>;

    fn parent(&self, id: ElementId) -> Option<ElementId>;

    /// Current layout box in viewport coordinates.
    fn bounding_box(&self, id: ElementId) -> Option<BoundingBox>;

    fn computed_style(&self, id: ElementId) -> Option<ComputedStyle>;

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str);

    fn add_class(&mut self, id: ElementId, class: &str);

    fn remove_class(&mut self, id: ElementId, class: &str);

    /// Set an inline style property; `None` removes it.
    fn set_inline_style(&mut self, id: ElementId, property: &str, value: Option<&str>);

    fn scroll_into_view(&mut self, id: ElementId, options: ScrollOptions);

    /// Native activation (`element.click()`).
    fn click(&mut self, id: ElementId);

    /// Dispatch a synthetic mouse `click` event.
    fn dispatch_click(&mut self, id: ElementId, bubbles: bool);

    /// Platform-level backward navigation.
    fn history_back(&mut self);

    fn set_body_cursor(&mut self, cursor: CursorStyle);

    /// Append a stylesheet to the document head.
    fn inject_stylesheet(&mut self, css: &str);

    fn media_state(&self, id: ElementId) -> Option<MediaState>;

    fn play(&mut self, id: ElementId);

    fn pause(&mut self, id: ElementId);

    fn set_current_time(&mut self, id: ElementId, seconds: f64);

    fn set_volume(&mut self, id: ElementId, volume: f64);

    fn set_muted(&mut self, id: ElementId, muted: bool);

    /// Start forwarding play/pause events of `id`. Each call adds a listener.
    fn listen_media(&mut self, id: ElementId);

    /// Media events raised synchronously by the last commands.
    ///
    /// Hosts that deliver media events through the event stream return nothing.
    fn take_media_events(&mut self) -> Vec<MediaEvent> {
        Vec::new()
    }

    fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.attribute(id, "class")
            .is_some_and(|value| value.split_whitespace().any(|c| c == class))
    }

    /// Elements matching `selectors`, in document order.
    fn query_all(&self, selectors: &SelectorList) -> Vec<ElementId> {
        self.elements()
            .into_iter()
            .filter(|id| selectors.matches(self, *id))
            .collect()
    }

    /// First element matching `selectors` in document order.
    fn query_first(&self, selectors: &SelectorList) -> Option<ElementId> {
        self.elements()
            .into_iter()
            .find(|id| selectors.matches(self, *id))
    }

    /// Elements carrying `class`, in document order.
    fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.elements()
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }
}
