//! Application logger handed to handlers through the request context.
//!
//! [`Logger`] is a cheap, cloneable handle that emits `tracing` events tagged
//! with the service name. Subscriber setup lives in `bills-telemetry`.

use std::sync::Arc;

/// Structured logger shared by every request context.
///
/// # Example
///
/// ```
/// use bills_core::Logger;
///
/// let logger = Logger::new("transactions");
/// logger.info("transaction created");
/// assert_eq!(logger.service(), "transactions");
/// ```
#[derive(Debug, Clone)]
pub struct Logger {
    service: Arc<str>,
}

impl Logger {
    /// Creates a logger for `service`.
    pub fn new(service: impl Into<Arc<str>>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// The service name attached to every event.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Emits a trace event.
    pub fn trace(&self, message: &str) {
        tracing::trace!(service = %self.service, "{message}");
    }

    /// Emits a debug event.
    pub fn debug(&self, message: &str) {
        tracing::debug!(service = %self.service, "{message}");
    }

    /// Emits an info event.
    pub fn info(&self, message: &str) {
        tracing::info!(service = %self.service, "{message}");
    }

    /// Emits a warning.
    pub fn warn(&self, message: &str) {
        tracing::warn!(service = %self.service, "{message}");
    }

    /// Emits an error event.
    pub fn error(&self, message: &str) {
        tracing::error!(service = %self.service, "{message}");
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new("bills")
    }
}
