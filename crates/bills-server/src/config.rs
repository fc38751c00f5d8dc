//! Server configuration types.
//!
//! # Example
//!
//! ```rust
//! use bills_server::ServerConfig;
//! use std::time::Duration;
//!
//! let config = ServerConfig::builder()
//!     .bind_address("127.0.0.1:9000")
//!     .pool_capacity(64)
//!     .shutdown_timeout(Duration::from_secs(5))
//!     .build();
//!
//! assert_eq!(config.bind_address(), "127.0.0.1:9000");
//! assert!(config.validate().is_ok());
//! ```

use crate::ServerError;
use std::net::SocketAddr;
use std::time::Duration;

/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default number of idle contexts kept for reuse.
pub const DEFAULT_POOL_CAPACITY: usize = 1024;

/// Default request body limit (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Default graceful shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default service name attached to logs.
pub const DEFAULT_SERVICE_NAME: &str = "bills";

/// Runtime options of a [`RestServer`](crate::RestServer).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    bind_address: String,
    pool_capacity: usize,
    max_body_bytes: usize,
    shutdown_timeout: Duration,
    service_name: String,
}

impl ServerConfig {
    /// Creates a builder with default values.
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Listen address, e.g. `0.0.0.0:8080`.
    #[must_use]
    pub fn bind_address(&self) -> &str {
        &self.bind_address
    }

    /// Parses the listen address.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_address.parse()
    }

    /// Maximum number of idle contexts kept for reuse.
    #[must_use]
    pub fn pool_capacity(&self) -> usize {
        self.pool_capacity
    }

    /// Largest accepted request body.
    #[must_use]
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    /// How long shutdown waits for open connections.
    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }

    /// Service name attached to logs.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Checks the options before the server starts.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.bind_address.is_empty() {
            return Err(ServerError::Config("bind address is required".to_string()));
        }
        self.socket_addr().map_err(|error| {
            ServerError::Config(format!("invalid bind address `{}`: {error}", self.bind_address))
        })?;
        if self.pool_capacity == 0 {
            return Err(ServerError::Config("pool capacity must be positive".to_string()));
        }
        if self.max_body_bytes == 0 {
            return Err(ServerError::Config("body limit must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`ServerConfig`].
#[derive(Debug, Clone)]
pub struct ServerConfigBuilder {
    bind_address: String,
    pool_capacity: usize,
    max_body_bytes: usize,
    shutdown_timeout: Duration,
    service_name: String,
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            pool_capacity: DEFAULT_POOL_CAPACITY,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

impl ServerConfigBuilder {
    /// Sets the listen address.
    #[must_use]
    pub fn bind_address(mut self, address: impl Into<String>) -> Self {
        self.bind_address = address.into();
        self
    }

    /// Sets the idle context capacity.
    #[must_use]
    pub fn pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    /// Sets the request body limit.
    #[must_use]
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Sets the graceful shutdown timeout.
    #[must_use]
    pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Sets the service name.
    #[must_use]
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            bind_address: self.bind_address,
            pool_capacity: self.pool_capacity,
            max_body_bytes: self.max_body_bytes,
            shutdown_timeout: self.shutdown_timeout,
            service_name: self.service_name,
        }
    }
}
