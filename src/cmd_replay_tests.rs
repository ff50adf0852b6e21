use std::path::PathBuf;

use super::*;
use tvnav_dom::{Activation, ElementId};

fn demo_page() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/browse.json")
}

#[test]
fn test_demo_page_reading_order_and_keys() {
    let page = MemoryPage::load(&demo_page()).unwrap();
    let mut controller = NavigatorController::new(page, &Config::default()).unwrap();
    controller.start();

    let snapshot = controller.debug_snapshot();
    let ids: Vec<u64> = snapshot.elements.iter().map(|e| e.id.0).collect();
    assert_eq!(ids, vec![2, 3, 4, 5, 11, 12, 13, 21, 22, 31, 30]);
    assert_eq!(snapshot.focused, Some(ElementId(2)));
    assert_eq!(snapshot.active_player, Some(ElementId(31)));

    for key in ["ArrowDown", "ArrowRight", "Enter"] {
        controller.handle_event(HostEvent::Key(KeyEvent::new(key)), Instant::now());
    }
    assert_eq!(controller.navigator().focused(), Some(ElementId(12)));

    controller.handle_event(HostEvent::Key(KeyEvent::new("Escape")), Instant::now());
    let page = controller.into_page();
    assert_eq!(page.activations()[0], Activation::Native(ElementId(12)));
    assert_eq!(page.activations().len(), 2);
    assert_eq!(page.history_back_count(), 0);
}

#[test]
fn test_replay_runs_demo_page() {
    let keys = vec!["ArrowDown".to_string(), "Ctrl+ArrowRight@31".to_string()];
    assert!(run_replay(&Config::default(), &demo_page(), &keys).is_ok());
}

#[test]
fn test_replay_rejects_malformed_key() {
    let keys = vec!["Ctrl+".to_string()];
    assert!(run_replay(&Config::default(), &demo_page(), &keys).is_err());
}

#[test]
fn test_replay_missing_page() {
    let missing = PathBuf::from("/nonexistent/tvnav/page.json");
    assert!(run_replay(&Config::default(), &missing, &[]).is_err());
}
