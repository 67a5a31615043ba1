//! Registry connectivity checks against mock registries.

use std::time::Duration;

use nlc_website::registry::{RegistryChecker, RegistryError};

mod common;

fn checker(registry: String) -> RegistryChecker {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    RegistryChecker::with_client(client, &registry).unwrap()
}

#[tokio::test]
async fn healthy_registry_passes_both_checks() {
    let addr = common::start_programmable_backend(|path| match path {
        "/-/ping" => (200, "{}".into()),
        "/react" => (200, r#"{"name":"react","dist-tags":{"latest":"19.1.0"}}"#.into()),
        _ => (404, "{}".into()),
    })
    .await;

    let report = checker(format!("http://{}", addr)).check("react").await;
    assert!(report.is_ok(), "unexpected failure: {:?}", report);
    assert_eq!(report.latest.unwrap(), "19.1.0");
}

#[tokio::test]
async fn forbidden_registry_is_blamed_on_policy() {
    let addr = common::start_programmable_backend(|_| (403, r#"{"error":"forbidden"}"#.into())).await;

    let report = checker(format!("http://{}", addr)).check("react").await;
    assert!(!report.is_ok());
    assert!(report.ping.as_ref().unwrap_err().is_forbidden());
    assert!(report.latest.as_ref().unwrap_err().is_forbidden());
    assert!(report.likely_cause().contains("403"));
}

#[tokio::test]
async fn failed_ping_still_runs_view() {
    let addr = common::start_programmable_backend(|path| match path {
        "/-/ping" => (500, "{}".into()),
        _ => (200, r#"{"dist-tags":{"latest":"1.0.0"}}"#.into()),
    })
    .await;

    let report = checker(format!("http://{}", addr)).check("react").await;
    assert!(matches!(report.ping, Err(RegistryError::Status { .. })));
    assert_eq!(report.latest.as_deref().unwrap(), "1.0.0");
    assert!(!report.is_ok());
}

#[tokio::test]
async fn metadata_without_latest_tag_fails() {
    let addr = common::start_programmable_backend(|path| match path {
        "/-/ping" => (200, "{}".into()),
        _ => (200, r#"{"name":"react","dist-tags":{}}"#.into()),
    })
    .await;

    let report = checker(format!("http://{}", addr)).check("react").await;
    assert!(report.ping.is_ok());
    assert!(matches!(report.latest, Err(RegistryError::MissingLatest { .. })));
}

#[tokio::test]
async fn unreachable_registry_is_a_request_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let report = checker(format!("http://{}", addr)).check("react").await;
    assert!(matches!(report.ping, Err(RegistryError::Request(_))));
    assert!(report.likely_cause().contains("unreachable"));
}
