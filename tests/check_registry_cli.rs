//! Exit behavior of the `check-registry` binary.

use tokio::process::Command;

mod common;

#[tokio::test]
async fn unparseable_registry_prints_remediation() {
    let output = Command::new(env!("CARGO_BIN_EXE_check-registry"))
        .args(["--registry", "registry.npmjs.org"])
        .env_clear()
        .output()
        .await
        .expect("failed to spawn check-registry");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Registry check failed."), "stderr: {stderr}");
    assert!(stderr.contains("registry URL is not an absolute URL"), "stderr: {stderr}");
    assert!(
        stderr.contains("1) Set an approved registry: NPM_CONFIG_REGISTRY=<your-internal-registry>"),
        "stderr: {stderr}"
    );
    assert!(!stderr.contains("InvalidRegistry {"), "debug output leaked: {stderr}");
}

#[tokio::test]
async fn healthy_registry_exits_cleanly() {
    let addr = common::start_programmable_backend(|path| match path {
        "/-/ping" => (200, "{}".into()),
        "/react" => (200, r#"{"dist-tags":{"latest":"19.1.0"}}"#.into()),
        _ => (404, "{}".into()),
    })
    .await;

    let output = Command::new(env!("CARGO_BIN_EXE_check-registry"))
        .args(["--registry", &format!("http://{}", addr)])
        .env_clear()
        .output()
        .await
        .expect("failed to spawn check-registry");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("react@19.1.0"), "stdout: {stdout}");
    assert!(stdout.contains("Registry connectivity looks good."), "stdout: {stdout}");
}
