/// The only request method the server recognizes.
pub const RETRIEVAL_METHOD: &str = "GET";

/// A parsed client request.
///
/// Only the resource path is kept; headers and the protocol version are
/// never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The requested path (e.g. "/index.html"), always beginning with `/`
    /// unless the client sent something unusual.
    pub path: String,
}

impl Request {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The path relative to the document root, i.e. without the leading `/`.
    ///
    /// # Example
    ///
    /// ```
    /// # use docserve::http::request::Request;
    /// assert_eq!(Request::new("/css/site.css").store_key(), "css/site.css");
    /// assert_eq!(Request::new("/").store_key(), "");
    /// ```
    pub fn store_key(&self) -> &str {
        self.path.strip_prefix('/').unwrap_or(&self.path)
    }
}
