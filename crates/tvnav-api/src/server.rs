//! Status server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tvnav_config::ServerConfig;

use crate::error::ApiError;
use crate::http::routes::create_router;
use crate::state::AppState;

/// Status server configuration.
#[derive(Debug, Clone)]
pub struct StatusConfig {
    pub host: String,
    pub port: u16,
}

impl StatusConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for StatusConfig {
    fn from(config: &ServerConfig) -> Self {
        Self::new(config.host.clone(), config.port)
    }
}

/// The status server.
pub struct StatusServer {
    config: StatusConfig,
    state: Arc<AppState>,
}

impl StatusServer {
    pub fn new(config: StatusConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Bind the configured address and serve until the process stops.
    pub async fn run(&self) -> Result<(), ApiError> {
        let addr = self.addr();
        let socket: SocketAddr = addr.parse().map_err(|source| ApiError::InvalidAddress {
            addr: addr.clone(),
            source,
        })?;
        let listener = TcpListener::bind(socket)
            .await
            .map_err(|source| ApiError::Bind { addr, source })?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), ApiError> {
        let app = create_router(self.state.clone());
        info!(
            "{} status server listening on {}",
            self.state.service.short_name,
            listener.local_addr()?
        );
        axum::serve(listener, app).await?;
        Ok(())
    }
}
