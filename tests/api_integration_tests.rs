//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle through the router: admin
//! endpoints and requests served by the worker.

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use common::{settings, FakeOrigin};
use offline_shell::api::create_router;
use offline_shell::cache::MemoryStorage;
use offline_shell::{AppState, OfflineWorker, ServiceHost};

// == Helper Functions ==

async fn create_test_app(origin: Arc<FakeOrigin>, start: bool) -> Router {
    let storage = Arc::new(MemoryStorage::new());
    let worker = OfflineWorker::new(
        settings("fahrschul-app-v1.0"),
        storage.clone(),
        origin.clone(),
    );
    let host = Arc::new(ServiceHost::new(worker, origin));
    if start {
        host.start().await.unwrap();
    }
    create_router(AppState::new(host, storage))
}

async fn body_to_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX).await.unwrap().to_vec()
}

async fn body_to_json(body: Body) -> Value {
    serde_json::from_slice(&body_to_bytes(body).await).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn navigate(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("sec-fetch-dest", "document")
        .body(Body::empty())
        .unwrap()
}

// == Admin Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(FakeOrigin::with_shell(), false).await;

    let response = app.oneshot(get("/__worker/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_status_endpoint_after_start() {
    let app = create_test_app(FakeOrigin::with_shell(), true).await;

    let response = app.oneshot(get("/__worker/status")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["version"], "fahrschul-app-v1.0");
    assert_eq!(json["state"], "activated");
    assert_eq!(json["skip_waiting"], true);
    assert_eq!(json["clients_claimed"], true);
    assert_eq!(json["cache"]["total_entries"], 4);
    assert_eq!(json["cache"]["stores"][0], "fahrschul-app-v1.0");
    assert_eq!(json["cache"]["opens"], 1);
    assert_eq!(json["cache"]["deletions"], 0);
}

#[tokio::test]
async fn test_status_endpoint_before_start() {
    let app = create_test_app(FakeOrigin::with_shell(), false).await;

    let response = app.oneshot(get("/__worker/status")).await.unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["state"], "parsed");
    assert_eq!(json["cache"]["total_entries"], 0);
}

#[tokio::test]
async fn test_sync_endpoint() {
    let app = create_test_app(FakeOrigin::with_shell(), true).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/__worker/sync/background-sync")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["tag"], "background-sync");
    assert_eq!(json["handled"], true);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/__worker/sync/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["handled"], false);
}

// == Fetch Tests ==

#[tokio::test]
async fn test_shell_served_from_cache_when_origin_offline() {
    let origin = FakeOrigin::with_shell();
    let app = create_test_app(origin.clone(), true).await;
    origin.set_offline(true);

    let response = app.oneshot(get("/fahrschul.html")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_bytes(response.into_body()).await, b"<html>app</html>");
}

#[tokio::test]
async fn test_new_page_is_cached_for_later_offline_use() {
    let origin = FakeOrigin::with_shell();
    origin.serve("/lessons/1", "<html>lesson 1</html>");
    let app = create_test_app(origin.clone(), true).await;

    let online = app.clone().oneshot(navigate("/lessons/1")).await.unwrap();
    assert_eq!(online.status(), StatusCode::OK);

    origin.set_offline(true);
    let offline = app.oneshot(navigate("/lessons/1")).await.unwrap();

    assert_eq!(offline.status(), StatusCode::OK);
    assert_eq!(
        body_to_bytes(offline.into_body()).await,
        b"<html>lesson 1</html>"
    );
}

#[tokio::test]
async fn test_offline_navigation_serves_offline_page() {
    let origin = FakeOrigin::with_shell();
    let app = create_test_app(origin.clone(), true).await;
    origin.set_offline(true);

    let response = app.oneshot(navigate("/lessons/9")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_to_bytes(response.into_body()).await,
        b"<html>offline</html>"
    );
}

#[tokio::test]
async fn test_offline_subresource_is_bad_gateway() {
    let origin = FakeOrigin::with_shell();
    let app = create_test_app(origin.clone(), true).await;
    origin.set_offline(true);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/theme.css")
                .header("sec-fetch-dest", "style")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("Network error"));
}

#[tokio::test]
async fn test_origin_status_passes_through() {
    let app = create_test_app(FakeOrigin::with_shell(), true).await;

    let response = app.oneshot(get("/does-not-exist")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_goes_to_origin() {
    let origin = FakeOrigin::with_shell();
    let app = create_test_app(origin.clone(), true).await;
    let calls_after_start = origin.calls();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .body(Body::from("answer=b"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(origin.calls(), calls_after_start + 1);
}

#[tokio::test]
async fn test_session_response_is_not_shared_between_clients() {
    let origin = FakeOrigin::with_shell();
    origin.serve_session("/account");
    let app = create_test_app(origin.clone(), true).await;

    let alice = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/account")
                .header("cookie", "alice-secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(alice.headers()["set-cookie"], "session=alice-secret");
    assert_eq!(body_to_bytes(alice.into_body()).await, b"hello alice-secret");

    let calls_before = origin.calls();
    let anonymous = app.oneshot(get("/account")).await.unwrap();

    assert_eq!(origin.calls(), calls_before + 1);
    assert!(anonymous.headers().get("set-cookie").is_none());
    assert_eq!(body_to_bytes(anonymous.into_body()).await, b"hello ");
}

#[tokio::test]
async fn test_redirect_passes_through_uncached() {
    let origin = FakeOrigin::with_shell();
    origin.redirect("/dashboard", "/login");
    let app = create_test_app(origin.clone(), true).await;

    let online = app.clone().oneshot(navigate("/dashboard")).await.unwrap();
    assert_eq!(online.status(), StatusCode::FOUND);
    assert_eq!(online.headers()["location"], "/login");

    origin.set_offline(true);
    let offline = app.oneshot(navigate("/dashboard")).await.unwrap();

    assert_eq!(offline.status(), StatusCode::OK);
    assert_eq!(
        body_to_bytes(offline.into_body()).await,
        b"<html>offline</html>"
    );
}
