//! Status service error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured host/port do not form a socket address.
    #[error("Invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Binding the listener failed.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an IO error.
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}
