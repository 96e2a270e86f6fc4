#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use gestora_api::config::ServerConfig;
use gestora_api::router::build_app_router;
use gestora_api::state::AppState;
use gestora_events::{InMemorySource, NotificationStore, NotificationStoreConfig, Scheduler};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// Everything a test needs to drive the app and inspect its state.
pub struct TestApp {
    pub router: Router,
    pub store: NotificationStore,
    pub source: Arc<InMemorySource>,
}

/// Build the full application router over an in-memory data source.
///
/// Uses the same [`build_app_router`] as `main.rs`, so the middleware stack
/// (CORS, request ID, timeout, tracing, panic recovery) is exercised too.
pub fn build_test_app() -> TestApp {
    build_test_app_with(Arc::new(InMemorySource::new()))
}

pub fn build_test_app_with(source: Arc<InMemorySource>) -> TestApp {
    let config = test_config();
    let store_config = NotificationStoreConfig {
        max_notifications: 5,
        auto_remove_delay: Duration::from_secs(3_600),
    };
    let (store, _actor) = NotificationStore::spawn(store_config, Scheduler::new());

    let state = AppState {
        config: Arc::new(config.clone()),
        store: store.clone(),
        source: source.clone(),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        source,
    }
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, Body::empty()).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Body::empty()).await
}

async fn send(app: &Router, method: Method, uri: &str, body: Body) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
