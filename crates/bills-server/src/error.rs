//! Server error types.

use thiserror::Error;

/// Failures while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configuration is unusable.
    #[error("invalid server configuration: {0}")]
    Config(String),

    /// The listen socket could not be bound.
    #[error("failed to bind {address}: {source}")]
    Bind {
        /// Address that was requested.
        address: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Other I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
