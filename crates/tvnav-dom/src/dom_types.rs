//! Shared DOM types: bounding box, attributes, computed style and media state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Bounding box for an element in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when the box has no rendered area.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Element attributes by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct NodeAttributes(BTreeMap<String, String>);

impl NodeAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let value = match self.get("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set("class", value);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let value = self
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set("class", value);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NodeAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// The subset of computed style the navigator consults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedStyle {
    #[serde(default = "default_display")]
    pub display: String,
    #[serde(default = "default_visibility")]
    pub visibility: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: default_display(),
            visibility: default_visibility(),
        }
    }
}

fn default_display() -> String {
    "block".to_string()
}

fn default_visibility() -> String {
    "visible".to_string()
}

impl ComputedStyle {
    pub fn hidden() -> Self {
        Self {
            visibility: "hidden".to_string(),
            ..Self::default()
        }
    }

    pub fn display_none() -> Self {
        Self {
            display: "none".to_string(),
            ..Self::default()
        }
    }

    /// False for `display: none` and `visibility: hidden`.
    pub fn is_rendered(&self) -> bool {
        self.display != "none" && self.visibility != "hidden"
    }
}

/// Playback state of a media element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaState {
    pub paused: bool,
    pub current_time: f64,
    /// Unknown until metadata has loaded.
    pub duration: Option<f64>,
    pub volume: f64,
    pub muted: bool,
}

impl Default for MediaState {
    fn default() -> Self {
        Self {
            paused: true,
            current_time: 0.0,
            duration: None,
            volume: 1.0,
            muted: false,
        }
    }
}
