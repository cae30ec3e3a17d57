//! Proxy tests: a real API listener on a random port behind the proxy
//! router, with a temporary static asset directory.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use todo_server::{proxy, MemoryTodoStore, Todo};
use tower::ServiceExt;

async fn start_api() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(todo_server::run(listener, Arc::new(MemoryTodoStore::new())));
    addr
}

fn static_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>todo app</html>").unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log('todo');").unwrap();
    dir
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn forwards_api_requests_upstream() {
    let addr = start_api().await;
    let assets = static_dir();
    let app = proxy::router(&format!("http://{addr}"), assets.path());

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/todos")
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(r#"{"text":"via proxy"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Todo = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(created.text, "via proxy");

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/todos")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(todos, vec![created]);
}

#[tokio::test]
async fn api_root_with_trailing_slash_is_forwarded() {
    let addr = start_api().await;
    let assets = static_dir();
    let app = proxy::router(&format!("http://{addr}"), assets.path());

    let resp = app
        .oneshot(Request::builder().uri("/api/").body(axum::body::Body::empty()).unwrap())
        .await
        .unwrap();
    // The API has no `/api/` route, so the upstream 404 comes back, not index.html.
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_ne!(body_string(resp).await, "<html>todo app</html>");
}

#[tokio::test]
async fn upstream_status_codes_pass_through() {
    let addr = start_api().await;
    let assets = static_dir();
    let app = proxy::router(&format!("http://{addr}"), assets.path());

    let resp = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/todos/999")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn serves_static_assets() {
    let assets = static_dir();
    let app = proxy::router("http://127.0.0.1:9", assets.path());

    let resp = app
        .oneshot(Request::builder().uri("/app.js").body(axum::body::Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "console.log('todo');");
}

#[tokio::test]
async fn unknown_paths_fall_back_to_index() {
    let assets = static_dir();
    let app = proxy::router("http://127.0.0.1:9", assets.path());

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/some/client/route")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "<html>todo app</html>");
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let assets = static_dir();
    let app = proxy::router(&format!("http://{addr}"), assets.path());
    let resp = app
        .oneshot(Request::builder().uri("/api/todos").body(axum::body::Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}
