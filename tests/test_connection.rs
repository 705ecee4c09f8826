use std::sync::Arc;
use std::time::Duration;

use docserve::http::connection::{Connection, ConnectionState};
use docserve::http::handler::ServeContext;
use docserve::store::DocumentRoot;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};

fn create_context() -> (Arc<ServeContext>, TempDir) {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), b"<h1>home</h1>").unwrap();
    std::fs::write(dir.path().join("app.js"), b"console.log(1);").unwrap();
    let ctx = ServeContext::new(DocumentRoot::new(dir.path()), "/index.html");
    (Arc::new(ctx), dir)
}

async fn exchange(ctx: Arc<ServeContext>, request: &[u8]) -> String {
    let (mut client, server) = duplex(64 * 1024);
    let mut conn = Connection::new(server, ctx);

    client.write_all(request).await.unwrap();
    conn.run().await.unwrap();
    assert!(matches!(conn.state(), ConnectionState::Closed));
    drop(conn);

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_root_request_serves_default_document() {
    let (ctx, _dir) = create_context();

    let response = exchange(ctx, b"GET / HTTP/1.0\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.0 200 OK\r\n"));
    assert!(response.contains("Content-Type: text/html\r\n"));
    assert!(response.contains("Content-Length: 13\r\n"));
    assert!(response.contains("Connection: close\r\n"));
    assert!(response.ends_with("\r\n\r\n<h1>home</h1>"));
}

#[tokio::test]
async fn test_javascript_file() {
    let (ctx, _dir) = create_context();

    let response = exchange(ctx, b"GET /app.js HTTP/1.0\r\nHost: x\r\n\r\n").await;

    assert!(response.contains("Content-Type: application/javascript\r\n"));
    assert!(response.ends_with("console.log(1);"));
}

#[tokio::test]
async fn test_not_found_response() {
    let (ctx, _dir) = create_context();

    let response = exchange(ctx, b"GET /missing.png HTTP/1.0\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.0 404 Not Found\r\n"));
    assert!(response.contains("Content-Type: text/html\r\n"));
}

#[tokio::test]
async fn test_empty_request_serves_default_document() {
    let (ctx, _dir) = create_context();
    let (mut client, server) = duplex(64 * 1024);
    let mut conn = Connection::new(server, ctx);

    client.shutdown().await.unwrap();
    conn.run().await.unwrap();
    drop(conn);

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    assert!(out.ends_with(b"<h1>home</h1>"));
}

#[tokio::test]
async fn test_write_failure_is_an_error() {
    let (ctx, _dir) = create_context();
    let (client, server) = duplex(64 * 1024);
    let mut conn = Connection::new(server, ctx);

    drop(client);

    assert!(conn.run().await.is_err());
}

#[tokio::test]
async fn test_read_timeout() {
    let (ctx, _dir) = create_context();
    let ctx = Arc::new((*ctx).clone().with_io_timeout(Duration::from_millis(50)));
    let (_client, server) = duplex(1024);
    let mut conn = Connection::new(server, ctx);

    let err = conn.run().await.unwrap_err();

    assert!(format!("{err:#}").contains("timed out"));
}
