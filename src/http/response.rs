use bytes::Bytes;

/// HTTP status codes the server can answer with.
///
/// - `Ok` (200): resource found and sent
/// - `NotFound` (404): nothing servable at the requested path
/// - `InternalServerError` (500): the resource existed but could not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use docserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>404 - File Not Found</title>
    <style>
        body { font-family: Arial, sans-serif; text-align: center; margin-top: 50px; }
        h1 { color: #d32f2f; }
        .error-code { font-size: 72px; color: #d32f2f; margin-bottom: 20px; }
        .message { font-size: 18px; color: #666; }
        .home-link { margin-top: 30px; }
        .home-link a { color: #2196f3; text-decoration: none; }
        .home-link a:hover { text-decoration: underline; }
    </style>
</head>
<body>
    <div class="error-code">404</div>
    <h1>File Not Found</h1>
    <div class="message">The requested resource could not be found on this server.</div>
    <div class="home-link">
        <a href="/">Go to Home Page</a>
    </div>
</body>
</html>
"#;

const INTERNAL_ERROR_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>500 - Internal Server Error</title>
    <style>
        body { font-family: Arial, sans-serif; text-align: center; margin-top: 50px; }
        h1 { color: #d32f2f; }
        .error-code { font-size: 72px; color: #d32f2f; margin-bottom: 20px; }
        .message { font-size: 18px; color: #666; }
        .home-link { margin-top: 30px; }
        .home-link a { color: #2196f3; text-decoration: none; }
    </style>
</head>
<body>
    <div class="error-code">500</div>
    <h1>Internal Server Error</h1>
    <div class="message">The requested resource could not be read.</div>
    <div class="home-link">
        <a href="/">Go to Home Page</a>
    </div>
</body>
</html>
"#;

/// A complete HTTP response ready to be sent to a client.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    /// Headers in the order they are written
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/css")
///     .body(Bytes::from_static(b"body {}"))
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Adds a header, replacing any earlier header of the same name
    /// (compared case-insensitively).
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some(existing) => existing.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the final Response.
    ///
    /// Always sets `Content-Length` from the body and `Connection: close`,
    /// since every connection carries exactly one response.
    pub fn build(self) -> Response {
        let len = self.body.len();
        let builder = self
            .header("Content-Length", len.to_string())
            .header("Connection", "close");

        Response {
            status: builder.status,
            headers: builder.headers,
            body: builder.body,
        }
    }
}

impl Response {
    /// A 200 response carrying `body` as `content_type`.
    pub fn ok(content_type: &str, body: impl Into<Bytes>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", content_type)
            .body(body)
            .build()
    }

    /// The fixed 404 page.
    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NotFound)
            .header("Content-Type", "text/html")
            .body(Bytes::from_static(NOT_FOUND_PAGE.as_bytes()))
            .build()
    }

    /// The fixed 500 page.
    pub fn internal_error() -> Self {
        ResponseBuilder::new(StatusCode::InternalServerError)
            .header("Content-Type", "text/html")
            .body(Bytes::from_static(INTERNAL_ERROR_PAGE.as_bytes()))
            .build()
    }

    /// Value of the first header named `key`, ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
