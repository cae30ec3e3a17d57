//! Reverse proxy and static file server in front of the API.
//!
//! `/api` and everything below it is forwarded untouched to the API service.
//! Any other path is served from the static asset directory, with unknown
//! paths answered by `index.html` so client-side routes resolve.

use std::path::Path;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::ErrorBody;

type HttpClient = Client<HttpConnector, Body>;

#[derive(Clone)]
struct ProxyState {
    client: HttpClient,
    upstream: String,
}

/// Build the proxy router. `upstream` is the API base URL, e.g.
/// `http://127.0.0.1:3000`.
pub fn router(upstream: &str, static_dir: &Path) -> Router {
    let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
    let state = ProxyState {
        client,
        upstream: upstream.trim_end_matches('/').to_string(),
    };
    let assets = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api", any(forward))
        .route("/api/", any(forward))
        .route("/api/{*rest}", any(forward))
        .fallback_service(assets)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn forward(State(state): State<ProxyState>, mut req: Request) -> Response {
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let target = format!("{}{}", state.upstream, path_and_query);

    match target.parse::<Uri>() {
        Ok(uri) => *req.uri_mut() = uri,
        Err(err) => {
            warn!(%target, error = %err, "cannot build upstream uri");
            return bad_gateway();
        }
    }

    match state.client.request(req).await {
        Ok(response) => response.into_response(),
        Err(err) => {
            warn!(%target, error = %err, "upstream request failed");
            bad_gateway()
        }
    }
}

fn bad_gateway() -> Response {
    let body = ErrorBody {
        error: "Bad gateway".to_string(),
    };
    (StatusCode::BAD_GATEWAY, Json(body)).into_response()
}
