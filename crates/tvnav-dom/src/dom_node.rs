//! Element nodes held by a page snapshot.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::dom_types::{BoundingBox, ComputedStyle, MediaState, NodeAttributes};

/// Opaque handle to an element of the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single element of a page snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementNode {
    /// Unique identifier for this node in the page.
    pub id: ElementId,

    /// Tag name (lowercase).
    pub tag_name: String,

    /// Node attributes.
    #[serde(default)]
    pub attributes: NodeAttributes,

    /// Parent node ID.
    #[serde(default)]
    pub parent: Option<ElementId>,

    /// Bounding box in viewport coordinates. `None` when the element has no layout box.
    #[serde(default)]
    pub bounding_box: Option<BoundingBox>,

    #[serde(default)]
    pub style: ComputedStyle,

    /// Inline style properties set on the element.
    #[serde(default)]
    pub inline_style: BTreeMap<String, String>,

    /// Present on `<video>`/`<audio>` elements.
    #[serde(default)]
    pub media: Option<MediaState>,
}

impl ElementNode {
    pub fn new(id: u64, tag_name: impl Into<String>) -> Self {
        let tag_name = tag_name.into().to_ascii_lowercase();
        let media = matches!(tag_name.as_str(), "video" | "audio").then(MediaState::default);
        Self {
            id: ElementId(id),
            tag_name,
            attributes: NodeAttributes::new(),
            parent: None,
            bounding_box: None,
            style: ComputedStyle::default(),
            inline_style: BTreeMap::new(),
            media,
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set(name, value);
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.attributes.add_class(class);
        self
    }

    pub fn with_parent(mut self, parent: u64) -> Self {
        self.parent = Some(ElementId(parent));
        self
    }

    pub fn with_rect(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.bounding_box = Some(BoundingBox::new(x, y, width, height));
        self
    }

    pub fn with_style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_media(mut self, media: MediaState) -> Self {
        self.media = Some(media);
        self
    }

    /// Short human-readable description, e.g. `a.movie-card#12`.
    pub fn describe(&self) -> String {
        let mut out = self.tag_name.clone();
        for class in self.attributes.classes() {
            out.push('.');
            out.push_str(class);
        }
        out.push_str(&self.id.to_string());
        out
    }
}
