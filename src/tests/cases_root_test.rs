// Integration tests for the root redirect, static front-end and health probe.

use axum::{body::Body, http::Request};
use tower::ServiceExt;

use crate::support::{assert_equal, assert_ok, client, do_json, TestServer};

/// Test that root path redirects to static index.
#[tokio::test]
async fn test_root_redirects_to_index() {
    let srv = TestServer::start().await.unwrap();

    let resp = assert_ok(client().get(format!("{}/", srv.base())).send().await);
    assert_equal(307, resp.status().as_u16());

    let location = resp.headers()["location"].to_str().unwrap();
    assert!(location.contains("/static/index.html"), "{}", location);

    srv.stop().await;
}

/// Test the redirect target is actually served.
#[tokio::test]
async fn test_static_index_is_served() {
    let srv = TestServer::start().await.unwrap();

    let resp = assert_ok(
        client()
            .get(format!("{}/static/index.html", srv.base()))
            .send()
            .await,
    );
    assert_equal(200, resp.status().as_u16());
    let body = assert_ok(resp.text().await);
    assert!(body.contains("Mergington High School"));

    srv.stop().await;
}

/// Test missing static files report not found.
#[tokio::test]
async fn test_static_missing_file() {
    let srv = TestServer::start().await.unwrap();

    let resp = assert_ok(
        client()
            .get(format!("{}/static/nope.html", srv.base()))
            .send()
            .await,
    );
    assert_equal(404, resp.status().as_u16());

    srv.stop().await;
}

/// Test the health endpoint reports alive while serving.
#[tokio::test]
async fn test_healthz_reports_alive() {
    let srv = TestServer::start().await.unwrap();

    let (status, _, _, data) =
        assert_ok(do_json::<serde_json::Value>("GET", &format!("{}/healthz", srv.base())).await);
    assert_equal(200, status);
    assert_equal(200, data.unwrap()["status"].as_u64().unwrap());

    srv.stop().await;
}

/// Test the assembled router answers in-process, without the listener.
#[tokio::test]
async fn test_router_in_process() {
    let srv = TestServer::start().await.unwrap();
    let router = srv.app().router();

    let resp = router
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_equal(307, resp.status().as_u16());
    assert_equal(
        "/static/index.html",
        resp.headers()["location"].to_str().unwrap(),
    );

    srv.stop().await;
}
