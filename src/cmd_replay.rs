//! Replay subcommand: drive a page snapshot with a key sequence.

use std::path::Path;

use serde_json::json;
use tokio::time::Instant;
use tracing::info;

use tvnav_config::Config;
use tvnav_dom::MemoryPage;
use tvnav_navigator::{HostEvent, KeyEvent, NavigatorController};

/// Print the initial state, then one JSON line per key.
pub(crate) fn run_replay(
    config: &Config,
    page_path: &Path,
    keys: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let page = MemoryPage::load(page_path)?;
    info!(
        "Replaying {} keys on {} ({})",
        keys.len(),
        page_path.display(),
        page.url()
    );

    let mut controller = NavigatorController::new(page, config)?;
    controller.start();
    println!("{}", json!({ "step": "start", "snapshot": controller.debug_snapshot() }));

    for raw in keys {
        let key: KeyEvent = raw.parse()?;
        let outcome = controller.handle_event(HostEvent::Key(key.clone()), Instant::now());
        println!(
            "{}",
            json!({
                "step": key.to_string(),
                "outcome": outcome,
                "snapshot": controller.debug_snapshot(),
            })
        );
    }

    let page = controller.into_page();
    info!(
        "Replay finished: {} activations, {} history back",
        page.activations().len(),
        page.history_back_count()
    );
    Ok(())
}

#[cfg(test)]
#[path = "cmd_replay_tests.rs"]
mod tests;
