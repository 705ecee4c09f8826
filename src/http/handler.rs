//! Turns a parsed request into a response from the document root.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::http::mime::{ContentTypeTable, is_textual};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::store::DocumentRoot;

/// Read-only state shared by every connection.
#[derive(Debug, Clone)]
pub struct ServeContext {
    pub root: DocumentRoot,
    pub content_types: ContentTypeTable,
    pub default_document: String,
    pub io_timeout: Option<Duration>,
}

impl ServeContext {
    pub fn new(root: DocumentRoot, default_document: impl Into<String>) -> Self {
        Self {
            root,
            content_types: ContentTypeTable::standard(),
            default_document: default_document.into(),
            io_timeout: None,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self {
            root: DocumentRoot::new(cfg.document_root.clone()),
            content_types: ContentTypeTable::standard(),
            default_document: cfg.default_document.clone(),
            io_timeout: cfg.io_timeout(),
        }
    }

    pub fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = Some(timeout);
        self
    }
}

/// Builds the response for `request`.
///
/// Missing files, non-regular files and rejected paths produce the fixed 404
/// page. A file that exists but cannot be read produces the fixed 500 page.
/// Text and binary content are both sent byte for byte.
pub async fn build_response(request: &Request, ctx: &ServeContext) -> Response {
    let key = request.store_key();

    let resource = match ctx.root.open(key).await {
        Ok(resource) => resource,
        Err(e) if e.is_not_found() => {
            warn!(path = %request.path, "404 Not Found");
            return Response::not_found();
        }
        Err(e) => {
            error!(path = %request.path, error = %e, "Failed to read resource");
            return Response::internal_error();
        }
    };

    let content_type = ctx.content_types.for_file_name(resource.file_name());

    info!(
        path = %request.path,
        content_type,
        text = is_textual(content_type),
        bytes = resource.content.len(),
        "Serving file"
    );

    Response::ok(content_type, resource.content)
}
