use std::sync::{Arc, Mutex};

use super::*;
use tvnav_dom::{Activation, CursorStyle, ElementNode, MediaEventKind, MediaState, MemoryPage};

struct RecordingDevice {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    fail: bool,
}

impl InputDeviceApi for RecordingDevice {
    fn register_key_batch(&mut self, keys: &[String]) -> Result<(), NavigatorError> {
        self.calls.lock().unwrap().push(keys.to_vec());
        if self.fail {
            Err(NavigatorError::Registration("tvinputdevice unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

fn button(id: u64, x: f64, y: f64) -> ElementNode {
    ElementNode::new(id, "button").with_rect(x, y, 100.0, 50.0)
}

fn row_page() -> MemoryPage {
    let mut page = MemoryPage::new();
    page.insert(button(1, 0.0, 0.0));
    page.insert(button(2, 200.0, 0.0));
    page.insert(button(3, 400.0, 0.0));
    page
}

fn video_page() -> MemoryPage {
    let mut page = MemoryPage::new();
    page.insert(button(1, 0.0, 0.0));
    page.insert(
        ElementNode::new(2, "video")
            .with_rect(0.0, 200.0, 640.0, 360.0)
            .with_media(MediaState {
                current_time: 30.0,
                ..MediaState::default()
            }),
    );
    page.insert(button(3, 200.0, 0.0));
    page
}

fn started(page: MemoryPage) -> NavigatorController<MemoryPage> {
    let mut controller = NavigatorController::new(page, &Config::default()).unwrap();
    controller.start();
    controller
}

fn key(name: &str) -> HostEvent {
    HostEvent::Key(KeyEvent::new(name))
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn test_start_prepares_page_once() {
    let mut controller = started(row_page());
    controller.start();

    let page = controller.page();
    assert_eq!(page.stylesheets().len(), 1);
    assert!(page.stylesheets()[0].contains(".tv-focused {"));
    assert_eq!(page.body_cursor(), Some(CursorStyle::None));
    assert_eq!(controller.navigator().focused(), Some(ElementId(1)));
    assert_eq!(controller.navigator().snapshot().generation(), 1);
}

#[test]
fn test_start_focuses_first_element_once() {
    let controller = started(row_page());
    let scrolls = controller.page().scrolls();
    assert_eq!(scrolls.len(), 1);
    assert_eq!(scrolls[0].target, ElementId(1));
}

#[test]
fn test_start_without_styles() {
    let mut config = Config::default();
    config.ui.inject_styles = false;
    config.ui.hide_cursor = false;
    let mut controller = NavigatorController::new(row_page(), &config).unwrap();
    controller.start();

    assert!(controller.page().stylesheets().is_empty());
    assert_eq!(controller.page().body_cursor(), None);
}

#[test]
fn test_remote_keys_registered_once() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let device = RecordingDevice {
        calls: calls.clone(),
        fail: false,
    };
    let mut controller = NavigatorController::new(row_page(), &Config::default())
        .unwrap()
        .with_input_device(Box::new(device));
    controller.start();
    controller.start();

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], Config::default().remote.keys);
    assert!(calls[0].contains(&"VolumeMute".to_string()));
}

#[test]
fn test_registration_failure_is_absorbed() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let device = RecordingDevice {
        calls: calls.clone(),
        fail: true,
    };
    let mut controller = NavigatorController::new(row_page(), &Config::default())
        .unwrap()
        .with_input_device(Box::new(device));
    controller.start();

    assert_eq!(calls.lock().unwrap().len(), 1);
    assert_eq!(controller.navigator().focused(), Some(ElementId(1)));
}

#[test]
fn test_keys_drive_navigation() {
    let mut controller = started(row_page());
    let now = Instant::now();

    let outcome = controller.handle_event(key("ArrowRight"), now);
    assert_eq!(outcome, KeyOutcome::handled(true));
    assert_eq!(controller.navigator().focused(), Some(ElementId(2)));

    let outcome = controller.handle_event(key("Enter"), now);
    assert_eq!(outcome, KeyOutcome::handled(true));
    assert_eq!(controller.page().activations(), &[Activation::Native(ElementId(2))]);

    let outcome = controller.handle_event(key("Escape"), now);
    assert_eq!(outcome, KeyOutcome::handled(false));
    assert_eq!(controller.page().history_back_count(), 1);

    controller.handle_event(key("Return"), now);
    assert_eq!(controller.page().history_back_count(), 2);

    assert_eq!(controller.handle_event(key("5"), now), KeyOutcome::ignored());
}

#[test]
fn test_mutation_bursts_coalesce_into_one_rebuild() {
    let mut controller = started(row_page());
    controller.page_mut().insert(button(4, 600.0, 0.0));

    let t0 = Instant::now();
    for offset in [0, 10, 20, 30] {
        controller.handle_event(HostEvent::Mutation, t0 + ms(offset));
    }
    assert!(controller.rescan_pending());
    assert_eq!(controller.next_deadline(), Some(t0 + ms(50)));
    assert_eq!(controller.navigator().snapshot().generation(), 1);

    controller.on_deadline(t0 + ms(49));
    assert_eq!(controller.navigator().snapshot().generation(), 1);

    controller.on_deadline(t0 + ms(50));
    assert!(!controller.rescan_pending());
    assert_eq!(controller.navigator().snapshot().generation(), 2);
    assert_eq!(controller.navigator().snapshot().len(), 4);
    assert_eq!(controller.next_deadline(), None);
}

#[test]
fn test_key_flushes_pending_rescan() {
    let mut controller = started(row_page());
    controller.page_mut().insert(button(4, 0.0, 200.0));
    let now = Instant::now();

    controller.handle_event(HostEvent::Mutation, now);
    controller.handle_event(key("ArrowDown"), now);

    assert!(!controller.rescan_pending());
    assert_eq!(controller.navigator().focused(), Some(ElementId(4)));
}

#[test]
fn test_zero_debounce_rebuilds_immediately() {
    let mut config = Config::default();
    config.navigator.rescan_debounce_ms = 0;
    let mut controller = NavigatorController::new(row_page(), &config).unwrap();
    controller.start();

    controller.page_mut().remove(ElementId(3));
    controller.handle_event(HostEvent::Mutation, Instant::now());
    assert!(!controller.rescan_pending());
    assert_eq!(controller.navigator().snapshot().len(), 2);
}

#[test]
fn test_rebuild_enhances_new_videos() {
    let mut controller = started(row_page());
    controller
        .page_mut()
        .insert(ElementNode::new(9, "video").with_rect(0.0, 300.0, 640.0, 360.0));
    controller.handle_event(HostEvent::Rescan, Instant::now());

    assert_eq!(controller.page().media_listener_count(ElementId(9)), 1);
    assert_eq!(controller.playback().active_player(), Some(ElementId(9)));
}

#[test]
fn test_video_consumes_its_keys() {
    let mut controller = started(video_page());
    let now = Instant::now();
    let video = ElementId(2);

    let event = HostEvent::Key(KeyEvent::new("ArrowRight").with_ctrl().on(video));
    assert_eq!(controller.handle_event(event, now), KeyOutcome::handled(true));
    assert_eq!(controller.page().media_state(video).unwrap().current_time, 40.0);
    assert_eq!(controller.navigator().focused(), Some(ElementId(1)));

    let event = HostEvent::Key(KeyEvent::new("ArrowRight").on(video));
    controller.handle_event(event, now);
    assert_eq!(controller.navigator().focused(), Some(ElementId(3)));
}

#[test]
fn test_media_keys_target_active_player() {
    let mut controller = started(video_page());
    let now = Instant::now();

    let outcome = controller.handle_event(key("MediaPlayPause"), now);
    assert_eq!(outcome, KeyOutcome::handled(false));
    assert!(!controller.page().media_state(ElementId(2)).unwrap().paused);
    assert!(controller.debug_snapshot().video_playing);

    controller.handle_event(key("MediaStop"), now);
    let media = controller.page().media_state(ElementId(2)).unwrap();
    assert!(media.paused);
    assert_eq!(media.current_time, 0.0);
    assert!(!controller.debug_snapshot().video_playing);
}

#[test]
fn test_media_keys_without_video_are_ignored() {
    let mut controller = started(row_page());
    let outcome = controller.handle_event(key("MediaPlay"), Instant::now());
    assert_eq!(outcome, KeyOutcome::ignored());
}

#[test]
fn test_host_media_events_update_playing_flag() {
    let mut controller = started(video_page());
    let event = MediaEvent {
        target: ElementId(2),
        kind: MediaEventKind::Play,
    };
    controller.handle_event(HostEvent::Media(event), Instant::now());
    assert!(controller.playback().video_playing());
}

#[test]
fn test_pointer_enter_focuses_media_card() {
    let mut page = row_page();
    page.insert(
        ElementNode::new(5, "a")
            .with_attr("href", "/tv/5")
            .with_rect(600.0, 0.0, 100.0, 50.0),
    );
    let mut controller = started(page);

    controller.handle_event(HostEvent::PointerEnter(ElementId(2)), Instant::now());
    assert_eq!(controller.navigator().focused(), Some(ElementId(1)));

    controller.handle_event(HostEvent::PointerEnter(ElementId(5)), Instant::now());
    assert_eq!(controller.navigator().focused(), Some(ElementId(5)));
}

#[test]
fn test_pointer_enter_flushes_pending_rescan() {
    let mut controller = started(row_page());
    controller.page_mut().insert(
        ElementNode::new(6, "a")
            .with_class("movie-card")
            .with_attr("href", "/movie/6")
            .with_rect(0.0, 300.0, 100.0, 150.0),
    );
    let now = Instant::now();

    controller.handle_event(HostEvent::Mutation, now);
    controller.handle_event(HostEvent::PointerEnter(ElementId(6)), now);

    assert!(!controller.rescan_pending());
    assert_eq!(controller.navigator().focused(), Some(ElementId(6)));
    assert_eq!(controller.navigator().cursor(), Some(3));
}

#[test]
fn test_set_focus_flushes_pending_rescan() {
    let mut controller = started(row_page());
    controller.page_mut().insert(button(4, 600.0, 0.0));
    let now = Instant::now();

    controller.handle_event(HostEvent::Mutation, now);
    controller.handle_event(HostEvent::SetFocus(3), now);

    assert!(!controller.rescan_pending());
    assert_eq!(controller.navigator().focused(), Some(ElementId(4)));
}

#[test]
fn test_pointer_move_shows_cursor_until_deadline() {
    let mut controller = started(row_page());
    let t0 = Instant::now();

    controller.handle_event(HostEvent::PointerMove, t0);
    assert_eq!(controller.page().body_cursor(), Some(CursorStyle::Default));
    controller.handle_event(HostEvent::PointerMove, t0 + ms(1000));
    assert_eq!(controller.next_deadline(), Some(t0 + ms(4000)));

    controller.on_deadline(t0 + ms(3000));
    assert_eq!(controller.page().body_cursor(), Some(CursorStyle::Default));
    controller.on_deadline(t0 + ms(4000));
    assert_eq!(controller.page().body_cursor(), Some(CursorStyle::None));
}

#[test]
fn test_set_focus_event() {
    let mut controller = started(row_page());
    controller.handle_event(HostEvent::SetFocus(2), Instant::now());
    assert_eq!(controller.navigator().focused(), Some(ElementId(3)));
    controller.handle_event(HostEvent::SetFocus(7), Instant::now());
    assert_eq!(controller.navigator().focused(), Some(ElementId(3)));
}

#[test]
fn test_snapshots_are_published() {
    let mut controller = NavigatorController::new(row_page(), &Config::default()).unwrap();
    let mut rx = controller.subscribe();
    controller.start();

    assert!(rx.has_changed().unwrap());
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.focused, Some(ElementId(1)));
    assert_eq!(snapshot.elements.len(), 3);
    assert_eq!(snapshot.generation, 1);

    controller.handle_event(HostEvent::PointerMove, Instant::now());
    assert!(!rx.has_changed().unwrap());

    controller.handle_event(key("ArrowRight"), Instant::now());
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().cursor, Some(1));
}
