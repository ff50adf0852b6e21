//! Spatial focus navigation over the host page.

use tracing::{debug, trace};
use tvnav_config::NavigatorConfig;
use tvnav_dom::{BoundingBox, ElementId, HostPage, ScrollOptions, SelectorList};

use crate::direction::Direction;
use crate::error::NavigatorError;
use crate::focus_set::FocusSnapshot;

/// Compiled navigator settings.
#[derive(Debug, Clone)]
pub struct NavigatorSettings {
    pub focusable: SelectorList,
    pub media_cards: SelectorList,
    pub back: SelectorList,
    pub marker_class: String,
    pub row_tolerance_px: f64,
    pub same_row_px: f64,
    pub outline: String,
    pub outline_offset: String,
}

impl NavigatorSettings {
    pub fn from_config(config: &NavigatorConfig) -> Result<Self, NavigatorError> {
        let compile = |field: &'static str, items: &[String]| {
            SelectorList::from_list(items).map_err(|e| NavigatorError::selector(field, e))
        };
        Ok(Self {
            focusable: compile("focusable", &config.focusable_selectors)?,
            media_cards: compile("media card", &config.media_card_selectors)?,
            back: compile("back", &config.back_selectors)?,
            marker_class: config.marker_class.clone(),
            row_tolerance_px: config.row_tolerance_px,
            same_row_px: config.same_row_px,
            outline: config.outline.clone(),
            outline_offset: config.outline_offset.clone(),
        })
    }
}

/// Owns the focusable snapshot and the cursor into it.
///
/// Every operation takes the page explicitly. The navigator holds no
/// references into the document besides element ids.
#[derive(Debug)]
pub struct SpatialNavigator {
    settings: NavigatorSettings,
    snapshot: FocusSnapshot,
    cursor: Option<usize>,
    rebuilds: u64,
}

impl SpatialNavigator {
    pub fn new(settings: NavigatorSettings) -> Self {
        Self {
            settings,
            snapshot: FocusSnapshot::empty(),
            cursor: None,
            rebuilds: 0,
        }
    }

    pub fn from_config(config: &NavigatorConfig) -> Result<Self, NavigatorError> {
        Ok(Self::new(NavigatorSettings::from_config(config)?))
    }

    pub fn settings(&self) -> &NavigatorSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> &FocusSnapshot {
        &self.snapshot
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.cursor
            .and_then(|i| self.snapshot.get(i))
            .map(|entry| entry.id)
    }

    /// Replace the snapshot and re-validate the cursor against it.
    ///
    /// The cursor follows the focused element when it survived the rebuild.
    /// Otherwise it is clamped into the new set and the marker is re-applied.
    pub fn rebuild_focusable_set<P: HostPage + ?Sized>(&mut self, page: &mut P) -> &FocusSnapshot {
        let previous = self.focused();
        self.rebuilds += 1;
        self.snapshot = FocusSnapshot::build(
            &*page,
            &self.settings.focusable,
            &self.settings.media_cards,
            self.settings.row_tolerance_px,
            self.rebuilds,
        );
        debug!(
            "Rebuilt focusable set: {} elements (generation {})",
            self.snapshot.len(),
            self.rebuilds
        );

        if self.snapshot.is_empty() {
            self.cursor = None;
            return &self.snapshot;
        }

        match previous.and_then(|id| self.snapshot.position(id)) {
            Some(index) => self.cursor = Some(index),
            None => {
                let index = self.cursor.unwrap_or(0).min(self.snapshot.len() - 1);
                self.cursor = None;
                self.set_focus(page, index);
            }
        }
        &self.snapshot
    }

    /// Move the focus marker to the element at `index`.
    ///
    /// Out-of-range indices are ignored. Returns whether focus was applied.
    pub fn set_focus<P: HostPage + ?Sized>(&mut self, page: &mut P, index: usize) -> bool {
        let Some(entry) = self.snapshot.get(index) else {
            trace!("Ignoring focus request for index {} (len {})", index, self.snapshot.len());
            return false;
        };
        let target = entry.id;

        self.clear_marker(page);
        page.add_class(target, &self.settings.marker_class);
        self.cursor = Some(index);
        page.scroll_into_view(target, ScrollOptions::smooth_center());
        page.set_inline_style(target, "outline", Some(&self.settings.outline));
        page.set_inline_style(target, "outline-offset", Some(&self.settings.outline_offset));

        debug!("Focused {} at index {}", target, index);
        true
    }

    /// Focus `id` when it is a media card that is not already focused.
    pub fn focus_element<P: HostPage + ?Sized>(&mut self, page: &mut P, id: ElementId) -> bool {
        if page.has_class(id, &self.settings.marker_class) {
            return false;
        }
        match self.snapshot.position(id) {
            Some(index) if self.snapshot.entries()[index].is_media_card => self.set_focus(page, index),
            _ => false,
        }
    }

    /// Move the cursor in `direction`. Returns whether focus moved.
    pub fn navigate<P: HostPage + ?Sized>(&mut self, page: &mut P, direction: Direction) -> bool {
        let Some(cursor) = self.cursor else {
            return false;
        };
        let Some(current) = self.snapshot.get(cursor) else {
            return false;
        };
        let origin = page.bounding_box(current.id).unwrap_or(current.rect);

        let mut best: Option<(usize, f64)> = None;
        for (index, entry) in self.snapshot.entries().iter().enumerate() {
            if index == cursor {
                continue;
            }
            let Some(rect) = page.bounding_box(entry.id) else {
                continue;
            };
            let Some(distance) = directional_distance(&origin, &rect, direction, self.settings.same_row_px)
            else {
                continue;
            };
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }

        if let Some((index, distance)) = best {
            trace!("Navigate {}: index {} at distance {}", direction, index, distance);
            return self.set_focus(page, index);
        }

        // Vertical moves fall back to the neighbor in reading order.
        let fallback = match direction {
            Direction::Down if cursor + 1 < self.snapshot.len() => Some(cursor + 1),
            Direction::Up if cursor > 0 => Some(cursor - 1),
            _ => None,
        };
        match fallback {
            Some(index) => {
                trace!("Navigate {}: falling back to index {}", direction, index);
                self.set_focus(page, index)
            }
            None => false,
        }
    }

    /// Activate the focused element. Returns whether anything was activated.
    pub fn activate<P: HostPage + ?Sized>(&self, page: &mut P) -> bool {
        let Some(target) = self.focused() else {
            return false;
        };
        let native = matches!(page.tag_name(target).as_deref(), Some("a" | "button"))
            || page.attribute(target, "data-play").is_some();
        if native {
            page.click(target);
        } else {
            page.dispatch_click(target, true);
        }
        debug!("Activated {} ({})", target, if native { "native" } else { "synthetic" });
        true
    }

    /// Click the page's back control, or navigate history back.
    pub fn go_back<P: HostPage + ?Sized>(&self, page: &mut P) {
        match page.query_first(&self.settings.back) {
            Some(button) => {
                debug!("Back via control {}", button);
                page.click(button);
            }
            None => {
                debug!("Back via history");
                page.history_back();
            }
        }
    }

    fn clear_marker<P: HostPage + ?Sized>(&self, page: &mut P) {
        for id in page.elements_with_class(&self.settings.marker_class) {
            page.remove_class(id, &self.settings.marker_class);
            page.set_inline_style(id, "outline", None);
            page.set_inline_style(id, "outline-offset", None);
        }
    }
}

/// Distance from `origin` to `candidate` when the candidate lies in `direction`.
///
/// Vertical moves accept anything strictly past the origin's edge and weigh
/// horizontal misalignment. Horizontal moves also require the tops to be
/// within `same_row` pixels.
pub fn directional_distance(
    origin: &BoundingBox,
    candidate: &BoundingBox,
    direction: Direction,
    same_row: f64,
) -> Option<f64> {
    let left_delta = (candidate.left() - origin.left()).abs();
    let top_delta = (candidate.top() - origin.top()).abs();
    match direction {
        Direction::Down if candidate.top() > origin.bottom() => {
            Some(left_delta + (candidate.top() - origin.bottom()))
        }
        Direction::Up if candidate.bottom() < origin.top() => {
            Some(left_delta + (origin.top() - candidate.bottom()))
        }
        Direction::Left if candidate.right() < origin.left() && top_delta < same_row => {
            Some(origin.left() - candidate.right() + top_delta)
        }
        Direction::Right if candidate.left() > origin.right() && top_delta < same_row => {
            Some(candidate.left() - origin.right() + top_delta)
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "navigator_tests.rs"]
mod tests;
