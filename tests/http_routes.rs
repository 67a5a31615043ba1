//! End-to-end tests against a running site.

use axum::http::StatusCode;
use serde_json::Value;

mod common;

#[tokio::test]
async fn health_reports_ok_with_timestamp() {
    let (addr, shutdown) = common::spawn_site(common::valid_config()).await;

    let res = common::client()
        .get(format!("http://{}/api/health", addr))
        .send()
        .await
        .expect("site unreachable");
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "nlc-website");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert!(timestamp.ends_with('Z'));

    shutdown.trigger();
}

#[tokio::test]
async fn public_home_renders_layout() {
    let (addr, shutdown) = common::spawn_site(common::valid_config()).await;

    let res = common::client()
        .get(format!("http://{}/", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()["content-type"].to_str().unwrap().starts_with("text/html"));

    let html = res.text().await.unwrap();
    assert!(html.contains("<html lang=\"en\">"));
    assert!(html.contains("<title>NLC Website</title>"));
    assert!(html.contains("content=\"NLC public site and admin portal\""));
    assert!(html.contains("<link rel=\"canonical\" href=\"https://nlc.example.org/\">"));
    assert!(html.contains("<h1 class=\"text-4xl font-bold tracking-tight\">NLC Website</h1>"));

    shutdown.trigger();
}

#[tokio::test]
async fn admin_home_renders() {
    let (addr, shutdown) = common::spawn_site(common::valid_config()).await;

    let res = common::client()
        .get(format!("http://{}/admin", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let html = res.text().await.unwrap();
    assert!(html.contains("Admin Dashboard"));
    assert!(html.contains("Admin routes are mounted under /admin."));
    assert!(html.contains("href=\"https://nlc.example.org/admin\""));

    shutdown.trigger();
}

#[tokio::test]
async fn unknown_path_is_404_with_escaped_path() {
    let (addr, shutdown) = common::spawn_site(common::valid_config()).await;

    let res = common::client()
        .get(format!("http://{}/it's&more", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let html = res.text().await.unwrap();
    assert!(html.contains("Page not found"));
    assert!(html.contains("<code>/it&#x27;s&amp;more</code>"), "html: {html}");
    assert!(!html.contains("it's&more"));

    shutdown.trigger();
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let (addr, shutdown) = common::spawn_site(common::valid_config()).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/api/health", addr))
        .send()
        .await
        .unwrap();
    let headers = res.headers();
    let id = headers["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");

    let res = client
        .get(format!("http://{}/api/health", addr))
        .header("x-request-id", "trace-me-123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me-123");

    shutdown.trigger();
}

#[tokio::test]
async fn server_stops_on_shutdown() {
    let (addr, shutdown) = common::spawn_site(common::valid_config()).await;
    shutdown.trigger();
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let result = common::client()
        .get(format!("http://{}/api/health", addr))
        .send()
        .await;
    assert!(result.is_err(), "server should refuse connections after shutdown");
}

#[tokio::test]
async fn router_serves_in_process() {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use nlc_website::{HttpServer, ServerSettings};
    use tower::ServiceExt;

    let server = HttpServer::new(Arc::new(common::valid_config()), ServerSettings::default());
    let response = server
        .router()
        .oneshot(Request::builder().uri("/admin").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Admin Dashboard"));
}
