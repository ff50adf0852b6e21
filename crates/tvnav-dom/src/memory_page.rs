//! In-memory page snapshot implementing [`HostPage`].

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dom_node::{ElementId, ElementNode};
use crate::dom_types::{BoundingBox, ComputedStyle, MediaState};
use crate::error::DomError;
use crate::page::{CursorStyle, HostPage, MediaEvent, MediaEventKind, ScrollOptions};

/// Serializable page snapshot: the document as the host saw it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PageSnapshot {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    /// Elements in document order.
    pub elements: Vec<ElementNode>,
}

/// How an element was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Activation {
    Native(ElementId),
    Synthetic { target: ElementId, bubbles: bool },
}

/// A recorded `scroll_into_view` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollRecord {
    pub target: ElementId,
    pub options: ScrollOptions,
}

/// A page held entirely in memory.
///
/// Commands are applied to the snapshot and recorded, which makes the page
/// usable both as a test double and as a replay target.
#[derive(Debug, Default)]
pub struct MemoryPage {
    url: String,
    title: String,
    order: Vec<ElementId>,
    nodes: HashMap<ElementId, ElementNode>,
    media_listeners: HashMap<ElementId, usize>,
    pending_media_events: Vec<MediaEvent>,
    activations: Vec<Activation>,
    scrolls: Vec<ScrollRecord>,
    stylesheets: Vec<String>,
    history_back_count: usize,
    body_cursor: Option<CursorStyle>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a page from a snapshot, checking ids, parent references and parent cycles.
    pub fn from_snapshot(snapshot: PageSnapshot) -> Result<Self, DomError> {
        let mut page = Self {
            url: snapshot.url,
            title: snapshot.title,
            ..Self::default()
        };
        for mut node in snapshot.elements {
            node.tag_name.make_ascii_lowercase();
            if node.media.is_none() && matches!(node.tag_name.as_str(), "video" | "audio") {
                node.media = Some(MediaState::default());
            }
            if page.nodes.contains_key(&node.id) {
                return Err(DomError::DuplicateElement(node.id.0));
            }
            page.order.push(node.id);
            page.nodes.insert(node.id, node);
        }
        for node in page.nodes.values() {
            if let Some(parent) = node.parent {
                if !page.nodes.contains_key(&parent) {
                    return Err(DomError::UnknownParent {
                        child: node.id.0,
                        parent: parent.0,
                    });
                }
            }
        }
        for &id in &page.order {
            let mut seen = HashSet::from([id]);
            let mut current = page.parent(id);
            while let Some(ancestor) = current {
                if !seen.insert(ancestor) {
                    return Err(DomError::ParentCycle(id.0));
                }
                current = page.parent(ancestor);
            }
        }
        Ok(page)
    }

    pub fn from_json(json: &str) -> Result<Self, DomError> {
        let snapshot: PageSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    pub fn load(path: &Path) -> Result<Self, DomError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Export the current state as a snapshot.
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            url: self.url.clone(),
            title: self.title.clone(),
            elements: self
                .order
                .iter()
                .filter_map(|id| self.nodes.get(id).cloned())
                .collect(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn node(&self, id: ElementId) -> Option<&ElementNode> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Append an element at the end of the document. Replaces an existing id in place.
    pub fn insert(&mut self, node: ElementNode) {
        if !self.nodes.contains_key(&node.id) {
            self.order.push(node.id);
        }
        self.nodes.insert(node.id, node);
    }

    /// Remove an element and all of its descendants.
    pub fn remove(&mut self, id: ElementId) {
        let mut doomed = HashSet::from([id]);
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            for &child in &self.order {
                if self.nodes.get(&child).and_then(|n| n.parent) == Some(current)
                    && doomed.insert(child)
                {
                    pending.push(child);
                }
            }
        }
        for id in &doomed {
            self.nodes.remove(id);
            self.media_listeners.remove(id);
        }
        self.order.retain(|id| !doomed.contains(id));
    }

    pub fn set_bounding_box(&mut self, id: ElementId, rect: Option<BoundingBox>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.bounding_box = rect;
        }
    }

    pub fn set_style(&mut self, id: ElementId, style: ComputedStyle) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.style = style;
        }
    }

    pub fn inline_style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.nodes
            .get(&id)
            .and_then(|n| n.inline_style.get(property))
            .map(String::as_str)
    }

    pub fn activations(&self) -> &[Activation] {
        &self.activations
    }

    pub fn scrolls(&self) -> &[ScrollRecord] {
        &self.scrolls
    }

    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    pub fn history_back_count(&self) -> usize {
        self.history_back_count
    }

    pub fn body_cursor(&self) -> Option<CursorStyle> {
        self.body_cursor
    }

    /// Number of media listeners registered on `id`.
    pub fn media_listener_count(&self, id: ElementId) -> usize {
        self.media_listeners.get(&id).copied().unwrap_or(0)
    }

    fn media_mut(&mut self, id: ElementId) -> Option<&mut MediaState> {
        self.nodes.get_mut(&id).and_then(|n| n.media.as_mut())
    }

    fn emit(&mut self, target: ElementId, kind: MediaEventKind) {
        let listeners = self.media_listener_count(target);
        for _ in 0..listeners {
            self.pending_media_events.push(MediaEvent { target, kind });
        }
    }
}

impl HostPage for MemoryPage {
    fn elements(&self) -> Vec<ElementId> {
        self.order.clone()
    }

    fn tag_name(&self, id: ElementId) -> Option<String> {
        self.nodes.get(&id).map(|n| n.tag_name.clone())
    }

    fn attribute(&self, id: ElementId, name: &str) -> Option<String> {
        self.nodes
            .get(&id)
            .and_then(|n| n.attributes.get(name))
            .map(str::to_string)
    }

    fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    fn bounding_box(&self, id: ElementId) -> Option<BoundingBox> {
        let node = self.nodes.get(&id)?;
        if node.style.display == "none" {
            return None;
        }
        node.bounding_box
    }

    fn computed_style(&self, id: ElementId) -> Option<ComputedStyle> {
        self.nodes.get(&id).map(|n| n.style.clone())
    }

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.attributes.set(name, value);
        }
    }

    fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.attributes.add_class(class);
        }
    }

    fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.attributes.remove_class(class);
        }
    }

    fn set_inline_style(&mut self, id: ElementId, property: &str, value: Option<&str>) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        match value {
            Some(value) => {
                node.inline_style.insert(property.to_string(), value.to_string());
            }
            None => {
                node.inline_style.remove(property);
            }
        }
    }

    fn scroll_into_view(&mut self, id: ElementId, options: ScrollOptions) {
        if self.nodes.contains_key(&id) {
            self.scrolls.push(ScrollRecord {
                target: id,
                options,
            });
        }
    }

    fn click(&mut self, id: ElementId) {
        if self.nodes.contains_key(&id) {
            debug!("Native click on {}", id);
            self.activations.push(Activation::Native(id));
        }
    }

    fn dispatch_click(&mut self, id: ElementId, bubbles: bool) {
        if self.nodes.contains_key(&id) {
            debug!("Synthetic click on {} (bubbles: {})", id, bubbles);
            self.activations.push(Activation::Synthetic {
                target: id,
                bubbles,
            });
        }
    }

    fn history_back(&mut self) {
        self.history_back_count += 1;
    }

    fn set_body_cursor(&mut self, cursor: CursorStyle) {
        self.body_cursor = Some(cursor);
    }

    fn inject_stylesheet(&mut self, css: &str) {
        self.stylesheets.push(css.to_string());
    }

    fn media_state(&self, id: ElementId) -> Option<MediaState> {
        self.nodes.get(&id).and_then(|n| n.media)
    }

    fn play(&mut self, id: ElementId) {
        let changed = match self.media_mut(id) {
            Some(media) if media.paused => {
                media.paused = false;
                true
            }
            _ => false,
        };
        if changed {
            self.emit(id, MediaEventKind::Play);
        }
    }

    fn pause(&mut self, id: ElementId) {
        let changed = match self.media_mut(id) {
            Some(media) if !media.paused => {
                media.paused = true;
                true
            }
            _ => false,
        };
        if changed {
            self.emit(id, MediaEventKind::Pause);
        }
    }

    fn set_current_time(&mut self, id: ElementId, seconds: f64) {
        if let Some(media) = self.media_mut(id) {
            media.current_time = seconds;
        }
    }

    fn set_volume(&mut self, id: ElementId, volume: f64) {
        if let Some(media) = self.media_mut(id) {
            media.volume = volume;
        }
    }

    fn set_muted(&mut self, id: ElementId, muted: bool) {
        if let Some(media) = self.media_mut(id) {
            media.muted = muted;
        }
    }

    fn listen_media(&mut self, id: ElementId) {
        if self.nodes.contains_key(&id) {
            *self.media_listeners.entry(id).or_insert(0) += 1;
        }
    }

    fn take_media_events(&mut self) -> Vec<MediaEvent> {
        std::mem::take(&mut self.pending_media_events)
    }
}
