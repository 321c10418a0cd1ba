use std::fs;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt; // oneshot

use api_rest::{app, AppState, ServerConfig};
use cogkit_files::{FileStore, UploadPolicy};

fn test_app(temp: &TempDir, base_path: &str) -> Router {
    let uploads = temp.path().join("uploads");
    let public = temp.path().join("public");
    fs::create_dir_all(&public).unwrap();
    fs::write(public.join("index.html"), "<html>battery</html>").unwrap();
    fs::write(public.join("util.js"), "console.log('cogkit');").unwrap();

    let policy = UploadPolicy::new(uploads, 8 * 1024 * 1024, ["csv"], "text/csv").unwrap();
    let store = FileStore::open(policy.storage_dir()).unwrap();
    let server = ServerConfig::new(base_path, public, None);

    app(AppState {
        policy: Arc::new(policy),
        store: Arc::new(store),
        server: Arc::new(server),
    })
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn root_serves_index_html() {
    let temp = TempDir::new().unwrap();
    let resp = get(test_app(&temp, ""), "/").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"<html>battery</html>");
}

#[tokio::test]
async fn static_file_is_served_with_guessed_content_type() {
    let temp = TempDir::new().unwrap();
    let resp = get(test_app(&temp, ""), "/util.js").await;

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.contains("javascript"), "{content_type}");

    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"console.log('cogkit');");
}

#[tokio::test]
async fn missing_file_returns_404() {
    let temp = TempDir::new().unwrap();
    let resp = get(test_app(&temp, ""), "/missing.csv").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn traversal_paths_return_404() {
    let temp = TempDir::new().unwrap();
    // A file that exists outside the public root must stay unreachable
    fs::write(temp.path().join("secret.txt"), "top secret").unwrap();
    let app = test_app(&temp, "");

    for uri in [
        "/../secret.txt",
        "/../../etc/passwd",
        "/..%2F..%2Fetc%2Fpasswd",
        "/sub/dir.js",
    ] {
        let resp = get(app.clone(), uri).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "uri {uri}");
    }
}

#[tokio::test]
async fn hidden_file_prefixes_are_rejected() {
    let temp = TempDir::new().unwrap();
    let app = test_app(&temp, "");
    // Exists on disk, but its name is not in sanitized form
    fs::write(temp.path().join("public/.env"), "SECRET=1").unwrap();

    let resp = get(app, "/.env").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn base_path_prefixes_all_routes() {
    let temp = TempDir::new().unwrap();
    let app = test_app(&temp, "/battery");

    let resp = get(app.clone(), "/battery/").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = get(app.clone(), "/battery/util.js").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = get(app, "/util.js").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
