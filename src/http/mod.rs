//! HTTP/1.0 request handling for static files.
//!
//! # Architecture
//!
//! - **`connection`**: per-connection state machine driving one request to one response
//! - **`parser`**: reads the request line and extracts the resource path
//! - **`request`**: the parsed request
//! - **`handler`**: resolves a request against the document root
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: serializes and writes responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Parsing   │ ← Read lines until a GET line or end of headers
//!        └──────┬──────┘
//!               │ Request (or default document)
//!               ▼
//!        ┌──────────────────┐
//!        │   Responding     │ ← 200 / 404 / 500 from the document root
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response, shut down write side
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! There is no keep-alive: every connection ends after one response, and an
//! I/O error at any stage drops the connection.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docserve::http::connection::Connection;
//! use docserve::http::handler::ServeContext;
//! use docserve::store::DocumentRoot;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8082").await?;
//!     let ctx = Arc::new(ServeContext::new(DocumentRoot::new("public"), "/index.html"));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let ctx = ctx.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, ctx);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod handler;
pub mod writer;
pub mod mime;
