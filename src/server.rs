//! Status service runner.

use std::path::PathBuf;

use tracing::info;

use tvnav_api::{AppState, ServiceInfo, StatusConfig, StatusServer};
use tvnav_config::Config;
use tvnav_dom::MemoryPage;
use tvnav_navigator::NavigatorController;

/// Run the status service in foreground.
pub(crate) async fn run_server(
    config: Config,
    page: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = ServiceInfo::from_config(&config.service);
    info!("Starting {} v{}", service.name, service.version);

    let mut state = AppState::new(service);

    // Held for the server's lifetime; dropping it stops the controller.
    let mut navigator = None;
    if let Some(path) = page {
        let page = MemoryPage::load(&path)?;
        info!("Driving page snapshot {} ({} elements)", path.display(), page.len());
        let controller = NavigatorController::new(page, &config)?;
        let (handle, _task) = controller.spawn();
        state = state.with_navigator(handle.subscribe());
        navigator = Some(handle);
    }

    let server = StatusServer::new(StatusConfig::from(&config.server), state);
    let result = server.run().await;
    drop(navigator);
    result?;
    Ok(())
}
