//! docserve - static file server
//!
//! Serves files from a document root over plain HTTP/1.0, one request per
//! connection.

pub mod config;
pub mod http;
pub mod server;
pub mod store;
