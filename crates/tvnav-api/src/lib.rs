//! # tvnav API
//!
//! Minimal status HTTP service for the shell hosting the TV navigator.
//!
//! - `GET /health` reports service name and version
//! - `GET /api/status` reports reachability with a server timestamp
//! - `GET /api/navigator` exposes the navigator debug snapshot when attached
//!
//! Every response carries permissive CORS headers so the web page running
//! on the TV can call the service from any origin.

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use http::routes::create_router;
pub use server::{StatusConfig, StatusServer};
pub use state::{AppState, ServiceInfo};
