use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::http::request::{RETRIEVAL_METHOD, Request};

/// Reads request lines from `reader` until a `GET` line, a blank line, or
/// end of stream, and returns the requested resource.
///
/// Anything unrecognized falls back to `default_document`, as does a request
/// for `/`. Lines after the request line are left unread. The only failure is
/// an I/O error on the underlying stream.
pub async fn parse_request<R>(reader: &mut R, default_document: &str) -> std::io::Result<Request>
where
    R: AsyncBufRead + Unpin,
{
    let mut raw = Vec::with_capacity(256);

    loop {
        raw.clear();
        let n = reader.read_until(b'\n', &mut raw).await?;
        if n == 0 {
            // Client closed before sending a request line
            break;
        }

        let line = String::from_utf8_lossy(&raw);
        let line = line.trim_end_matches('\n').trim_end_matches('\r');

        if line.is_empty() {
            break;
        }

        if let Some(path) = parse_request_line(line) {
            return Ok(resolve_path(path, default_document));
        }

        if is_retrieval_line(line) {
            // GET without a target
            break;
        }
    }

    Ok(Request::new(default_document))
}

/// Extracts the resource path from a single `GET <path> <version>` line.
///
/// Returns `None` for any other method and for a `GET` with no path.
pub fn parse_request_line(line: &str) -> Option<&str> {
    let mut parts = line.split_whitespace();
    if parts.next()? != RETRIEVAL_METHOD {
        return None;
    }
    parts.next()
}

fn is_retrieval_line(line: &str) -> bool {
    line.split_whitespace().next() == Some(RETRIEVAL_METHOD)
}

fn resolve_path(path: &str, default_document: &str) -> Request {
    if path == "/" {
        Request::new(default_document)
    } else {
        Request::new(path)
    }
}
