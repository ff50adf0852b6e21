//! Discovery of focusable elements and their reading order.

use serde::Serialize;
use tvnav_dom::{BoundingBox, ComputedStyle, ElementId, HostPage, SelectorList};

/// One focusable element as captured by a rebuild.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusEntry {
    pub id: ElementId,
    /// Geometry at rebuild time. Navigation re-reads live geometry.
    pub rect: BoundingBox,
    pub tag: String,
    pub is_media_card: bool,
}

/// Immutable result of one rebuild, in reading order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FocusSnapshot {
    entries: Vec<FocusEntry>,
    generation: u64,
}

impl FocusSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Query, filter and sort the page's focusable elements.
    pub fn build<P: HostPage + ?Sized>(
        page: &P,
        focusable: &SelectorList,
        media_cards: &SelectorList,
        row_tolerance: f64,
        generation: u64,
    ) -> Self {
        let mut entries: Vec<FocusEntry> = page
            .query_all(focusable)
            .into_iter()
            .filter_map(|id| {
                let rect = page.bounding_box(id)?;
                if !is_visible(&rect, page.computed_style(id).as_ref()) {
                    return None;
                }
                Some(FocusEntry {
                    id,
                    rect,
                    tag: page.tag_name(id).unwrap_or_default(),
                    is_media_card: media_cards.matches(page, id),
                })
            })
            .collect();
        sort_reading_order(&mut entries, row_tolerance);
        Self {
            entries,
            generation,
        }
    }

    pub fn entries(&self) -> &[FocusEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&FocusEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Index of `id` in reading order.
    pub fn position(&self, id: ElementId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.entries.iter().map(|e| e.id).collect()
    }
}

/// Non-zero area and neither `visibility: hidden` nor `display: none`.
pub fn is_visible(rect: &BoundingBox, style: Option<&ComputedStyle>) -> bool {
    !rect.is_empty() && style.is_none_or(ComputedStyle::is_rendered)
}

/// Sort top-to-bottom, then left-to-right within rows.
///
/// A row starts at the first element whose top is at least `row_tolerance`
/// below the top of the row's first element. Both passes are stable, so
/// elements at identical positions keep document order.
pub fn sort_reading_order(entries: &mut [FocusEntry], row_tolerance: f64) {
    entries.sort_by(|a, b| a.rect.top().total_cmp(&b.rect.top()));

    let mut start = 0;
    while start < entries.len() {
        let anchor = entries[start].rect.top();
        let end = entries[start..]
            .iter()
            .position(|e| e.rect.top() - anchor >= row_tolerance)
            .map_or(entries.len(), |offset| start + offset);
        entries[start..end].sort_by(|a, b| a.rect.left().total_cmp(&b.rect.left()));
        start = end;
    }
}
