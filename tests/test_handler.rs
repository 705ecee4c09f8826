use bytes::Bytes;
use docserve::http::handler::{ServeContext, build_response};
use docserve::http::request::Request;
use docserve::http::response::{Response, StatusCode};
use docserve::store::DocumentRoot;
use tempfile::TempDir;

fn create_context() -> (ServeContext, TempDir) {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), b"<h1>home</h1>").unwrap();
    std::fs::write(dir.path().join("PHOTO.JPG"), [0xff, 0xd8, 0xff, 0xe0, 0x00]).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "caf\u{e9}\n".as_bytes()).unwrap();
    std::fs::write(dir.path().join("latin1.txt"), [b'c', b'a', b'f', 0xe9]).unwrap();
    std::fs::write(dir.path().join("blob"), b"raw").unwrap();
    let ctx = ServeContext::new(DocumentRoot::new(dir.path()), "/index.html");
    (ctx, dir)
}

#[tokio::test]
async fn test_serves_existing_file() {
    let (ctx, _dir) = create_context();

    let response = build_response(&Request::new("/index.html"), &ctx).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.header("Content-Type"), Some("text/html"));
    assert_eq!(response.header("Content-Length"), Some("13"));
    assert_eq!(response.header("Connection"), Some("close"));
    assert_eq!(&response.body[..], b"<h1>home</h1>");
}

#[tokio::test]
async fn test_content_length_matches_body() {
    let (ctx, _dir) = create_context();

    for path in ["/index.html", "/PHOTO.JPG", "/notes.txt", "/latin1.txt", "/blob"] {
        let response = build_response(&Request::new(path), &ctx).await;
        let length: usize = response.header("Content-Length").unwrap().parse().unwrap();

        assert_eq!(response.status, StatusCode::Ok, "{path}");
        assert_eq!(length, response.body.len(), "{path}");
    }
}

#[tokio::test]
async fn test_uppercase_extension() {
    let (ctx, _dir) = create_context();

    let response = build_response(&Request::new("/PHOTO.JPG"), &ctx).await;

    assert_eq!(response.header("Content-Type"), Some("image/jpeg"));
    assert_eq!(&response.body[..], &[0xff, 0xd8, 0xff, 0xe0, 0x00]);
}

#[tokio::test]
async fn test_text_is_sent_byte_exact() {
    let (ctx, _dir) = create_context();

    let response = build_response(&Request::new("/latin1.txt"), &ctx).await;

    assert_eq!(response.header("Content-Type"), Some("text/plain"));
    assert_eq!(response.body, Bytes::from_static(&[b'c', b'a', b'f', 0xe9]));
}

#[tokio::test]
async fn test_unknown_extension_is_octet_stream() {
    let (ctx, _dir) = create_context();

    let response = build_response(&Request::new("/blob"), &ctx).await;

    assert_eq!(response.header("Content-Type"), Some("application/octet-stream"));
}

#[tokio::test]
async fn test_missing_file_is_fixed_not_found() {
    let (ctx, _dir) = create_context();

    let first = build_response(&Request::new("/nope.html"), &ctx).await;
    let second = build_response(&Request::new("/other/missing.css"), &ctx).await;

    assert_eq!(first.status, StatusCode::NotFound);
    assert_eq!(first.body, second.body);
    assert_eq!(first.body, Response::not_found().body);
}

#[tokio::test]
async fn test_root_key_is_not_found() {
    let (ctx, _dir) = create_context();

    let response = build_response(&Request::new("/"), &ctx).await;

    assert_eq!(response.status, StatusCode::NotFound);
}

#[tokio::test]
async fn test_traversal_is_not_found() {
    let (ctx, _dir) = create_context();

    let response = build_response(&Request::new("/../etc/passwd"), &ctx).await;

    assert_eq!(response.status, StatusCode::NotFound);
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_unreadable_file_is_internal_error() {
    // /proc/self/mem is a regular file, but reading from offset 0 fails
    let ctx = ServeContext::new(DocumentRoot::new("/proc/self"), "/index.html");

    let response = build_response(&Request::new("/mem"), &ctx).await;

    assert_eq!(response.status, StatusCode::InternalServerError);
    assert_eq!(response.header("Content-Type"), Some("text/html"));
    assert_eq!(
        response.header("Content-Length"),
        Some(response.body.len().to_string().as_str())
    );
    assert_eq!(response.body, Response::internal_error().body);
}
