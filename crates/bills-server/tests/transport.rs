//! End-to-end tests over a real socket.

use bills_core::{handler_fn, ContextExt};
use bills_server::{transport, RestServer, Router, ServerConfig, ShutdownSignal};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Default, Deserialize, Serialize)]
struct Echo {
    message: String,
}

async fn start(max_body_bytes: usize) -> (std::net::SocketAddr, ShutdownSignal, tokio::task::JoinHandle<()>) {
    let router = Router::new().post(
        "/echo",
        handler_fn(|ctx| {
            Box::pin(async move {
                let echo: Echo = serde_json::from_slice(ctx.body()).unwrap_or_default();
                ctx.write_response(StatusCode::OK, &echo)
            })
        }),
    );
    let config = ServerConfig::builder()
        .max_body_bytes(max_body_bytes)
        .shutdown_timeout(Duration::from_millis(200))
        .build();
    let server = Arc::new(RestServer::builder().config(config).router(router).build());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = ShutdownSignal::new();
    let signal = shutdown.clone();
    let handle = tokio::spawn(async move {
        transport::serve(server, listener, signal).await.unwrap();
    });
    (addr, shutdown, handle)
}

async fn exchange(addr: std::net::SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

fn post(path: &str, body: &str) -> String {
    format!(
        "POST {path} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    )
}

#[tokio::test]
async fn test_request_round_trip() {
    let (addr, shutdown, handle) = start(1024).await;

    let response = exchange(addr, &post("/echo", r#"{"message":"hi"}"#)).await;
    assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
    assert!(response.to_ascii_lowercase().contains("content-type: application/json"));
    assert!(response.ends_with(r#"{"message":"hi"}"#));

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_routing_failures_over_the_wire() {
    let (addr, shutdown, _handle) = start(1024).await;

    let missing = exchange(addr, "GET /missing HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert!(missing.starts_with("HTTP/1.1 404"), "{missing}");
    assert!(missing.contains("The route `/missing` does not exist"));

    let wrong = exchange(addr, "GET /echo HTTP/1.1\r\nHost: localhost\r\n\r\n").await;
    assert!(wrong.starts_with("HTTP/1.1 405"), "{wrong}");

    shutdown.trigger();
}

#[tokio::test]
async fn test_oversize_body_is_malformed() {
    let (addr, shutdown, _handle) = start(8).await;

    let response = exchange(addr, &post("/echo", r#"{"message":"far too long"}"#)).await;
    assert!(response.starts_with("HTTP/1.1 422"), "{response}");
    assert!(response.contains("Malformed request"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_shutdown_stops_accepting() {
    let (addr, shutdown, handle) = start(1024).await;
    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .unwrap()
        .unwrap();
    assert!(TcpStream::connect(addr).await.is_err());
}
