//! HTTP/1.1 transport.
//!
//! Accepts TCP connections, collects each request body up to the configured
//! limit, dispatches through [`RestServer::handle`] and writes the response.
//! Connections are not kept alive: one request per connection.

use crate::error::ServerError;
use crate::server::RestServer;
use crate::shutdown::{ConnectionTracker, ShutdownSignal};
use bills_core::{problem_response, Problem};
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

/// Response body written to the wire.
pub type ResponseBody = Full<Bytes>;

/// Serves `listener` until `shutdown` fires, then waits for open connections.
///
/// Waiting is bounded by [`ServerConfig::shutdown_timeout`](crate::ServerConfig::shutdown_timeout).
pub async fn serve(
    server: Arc<RestServer>,
    listener: TcpListener,
    shutdown: ShutdownSignal,
) -> Result<(), ServerError> {
    let local_addr = listener.local_addr()?;
    tracing::info!(
        address = %local_addr,
        service = server.config().service_name(),
        "server listening"
    );

    let tracker = ConnectionTracker::new();

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, remote_addr)) => {
                    let server = Arc::clone(&server);
                    let token = tracker.acquire();
                    tokio::spawn(async move {
                        if let Err(error) = serve_connection(server, stream).await {
                            tracing::debug!(remote = %remote_addr, error = %error, "connection error");
                        }
                        drop(token);
                    });
                }
                Err(error) => {
                    tracing::error!(error = %error, "failed to accept connection");
                }
            },
            () = shutdown.recv() => {
                tracing::info!("shutdown signal received, no longer accepting connections");
                break;
            }
        }
    }

    let timeout = server.config().shutdown_timeout();
    if tokio::time::timeout(timeout, tracker.wait_for_idle()).await.is_err() {
        tracing::warn!(
            active = tracker.active_connections(),
            "shutdown timeout reached with connections still open"
        );
    }

    tracing::info!("server stopped");
    Ok(())
}

async fn serve_connection(server: Arc<RestServer>, stream: TcpStream) -> Result<(), hyper::Error> {
    let service = service_fn(move |request: Request<Incoming>| {
        let server = Arc::clone(&server);
        async move { Ok::<_, Infallible>(respond(&server, request).await) }
    });

    http1::Builder::new()
        .keep_alive(false)
        .serve_connection(TokioIo::new(stream), service)
        .await
}

async fn respond(server: &RestServer, request: Request<Incoming>) -> Response<ResponseBody> {
    let (parts, body) = request.into_parts();
    let limit = server.config().max_body_bytes();

    let response = match Limited::new(body, limit).collect().await {
        Ok(collected) => {
            server
                .handle(Request::from_parts(parts, collected.to_bytes()))
                .await
        }
        Err(error) => {
            tracing::debug!(
                http.method = %parts.method,
                http.target = %parts.uri,
                error = %error,
                "failed to read request body"
            );
            problem_response(&Problem::malformed_request())
        }
    };

    response.map(Full::new)
}
