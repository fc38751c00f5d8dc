//! Server wiring for the transaction service.

use crate::module::ModuleProvider;
use bills_core::Logger;
use bills_middleware::stages::{JsonContentType, RequestTracing};
use bills_server::{RestServer, ServerConfig};

/// Builds the server: request tracing, then the JSON content-type check,
/// in front of every transaction route.
pub fn build_server(config: ServerConfig, provider: &ModuleProvider) -> RestServer {
    let service = config.service_name().to_string();
    RestServer::builder()
        .logger(Logger::new(service.as_str()))
        .use_middleware(RequestTracing::new(service))
        .use_middleware(JsonContentType)
        .router(provider.router())
        .config(config)
        .build()
}
