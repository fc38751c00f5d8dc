//! Typed configuration for Bills services.
//!
//! [`BillsConfig`] holds everything a service reads at startup. It is
//! assembled by [`ConfigLoader`] from layered sources (defaults, a TOML or
//! JSON file, `.env`, environment variables) and validated strictly:
//! unknown fields are errors.
//!
//! # Configuration File Format
//!
//! ```toml
//! service_name = "bills"
//!
//! [server]
//! bind_address = "0.0.0.0:8080"
//! pool_capacity = 1024
//! max_body_bytes = 1048576
//! shutdown_timeout_secs = 30
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! - `BILLS__SERVICE_NAME=ledger`
//! - `BILLS__SERVER__BIND_ADDRESS=0.0.0.0:9000`
//! - `BILLS__LOGGING__FORMAT=pretty`

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::BillsConfig;
pub use error::ConfigError;
pub use loader::{ConfigLoader, DEFAULT_ENV_PREFIX};
pub use schema::{LogFormat, LoggingSection, ServerSection};
