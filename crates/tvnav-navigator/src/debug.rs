//! Introspection of navigator state.

use serde::{Deserialize, Serialize};
use tvnav_dom::{BoundingBox, ElementId};

use crate::navigator::SpatialNavigator;
use crate::playback::PlaybackShortcuts;

/// One focusable element as reported to debugging clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugElement {
    pub index: usize,
    pub id: ElementId,
    pub tag: String,
    pub rect: BoundingBox,
    pub media_card: bool,
}

/// Point-in-time view of the navigator, published after every event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugSnapshot {
    pub elements: Vec<DebugElement>,
    pub cursor: Option<usize>,
    pub focused: Option<ElementId>,
    pub video_playing: bool,
    pub active_player: Option<ElementId>,
    /// Increments on every rebuild of the focusable set.
    pub generation: u64,
}

impl DebugSnapshot {
    pub fn capture(navigator: &SpatialNavigator, playback: &PlaybackShortcuts) -> Self {
        let snapshot = navigator.snapshot();
        Self {
            elements: snapshot
                .entries()
                .iter()
                .enumerate()
                .map(|(index, entry)| DebugElement {
                    index,
                    id: entry.id,
                    tag: entry.tag.clone(),
                    rect: entry.rect,
                    media_card: entry.is_media_card,
                })
                .collect(),
            cursor: navigator.cursor(),
            focused: navigator.focused(),
            video_playing: playback.video_playing(),
            active_player: playback.active_player(),
            generation: snapshot.generation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvnav_config::{NavigatorConfig, PlaybackConfig};
    use tvnav_dom::{ElementNode, MemoryPage};

    #[test]
    fn test_capture_reports_focus_and_wire_shape() {
        let mut page = MemoryPage::new();
        page.insert(ElementNode::new(1, "button").with_rect(0.0, 0.0, 100.0, 40.0));
        page.insert(
            ElementNode::new(2, "a")
                .with_attr("href", "/movie/2")
                .with_rect(150.0, 0.0, 100.0, 150.0),
        );
        let mut navigator = SpatialNavigator::from_config(&NavigatorConfig::default()).unwrap();
        navigator.rebuild_focusable_set(&mut page);
        navigator.set_focus(&mut page, 1);
        let playback = PlaybackShortcuts::new(&PlaybackConfig::default());

        let snapshot = DebugSnapshot::capture(&navigator, &playback);
        assert_eq!(snapshot.cursor, Some(1));
        assert_eq!(snapshot.focused, Some(ElementId(2)));
        assert!(snapshot.elements[1].media_card);
        assert!(!snapshot.elements[0].media_card);

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["focused"], 2);
        assert_eq!(value["elements"][1]["tag"], "a");
        assert_eq!(value["elements"][1]["rect"]["x"], 150.0);
        assert_eq!(value["active_player"], serde_json::Value::Null);
    }
}
