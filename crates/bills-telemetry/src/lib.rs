//! Logging setup for Bills services.
//!
//! Every Bills crate emits events through [`tracing`]; this crate installs
//! the subscriber that formats and filters them. Call [`init_logging`] once
//! at startup, before the server is built.
//!
//! ```rust,no_run
//! use bills_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! # Ok::<(), bills_telemetry::TelemetryError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/bills-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
