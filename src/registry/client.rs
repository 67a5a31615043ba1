//! HTTP checks against an npm-compatible package registry.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::registry::report::RegistryReport;
use crate::registry::RegistryError;

pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org";
pub const DEFAULT_PACKAGE: &str = "react";

/// Runs the connectivity checks against one registry.
#[derive(Debug, Clone)]
pub struct RegistryChecker {
    client: reqwest::Client,
    base: Url,
}

impl RegistryChecker {
    /// Build a checker with a client that honors the standard proxy variables.
    pub fn new(registry: &str, timeout: Duration) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nlc-website-check-registry/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(client, registry)
    }

    pub fn with_client(client: reqwest::Client, registry: &str) -> Result<Self, RegistryError> {
        let base = Url::parse(registry).map_err(|source| RegistryError::InvalidRegistry {
            url: registry.to_string(),
            source,
        })?;
        Ok(Self { client, base })
    }

    pub fn registry(&self) -> &Url {
        &self.base
    }

    /// `GET <registry>/-/ping`, expecting a 2xx.
    pub async fn ping(&self) -> Result<(), RegistryError> {
        let url = self.endpoint("-/ping")?;
        tracing::debug!(url = %url, "Pinging registry");
        self.get(url).await?;
        Ok(())
    }

    /// `GET <registry>/<package>`, returning `dist-tags.latest`.
    pub async fn view_latest(&self, package: &str) -> Result<String, RegistryError> {
        // Scoped names keep their `@` but encode the separator.
        let url = self.endpoint(&package.replace('/', "%2F"))?;
        tracing::debug!(url = %url, package, "Fetching package metadata");

        let document: Value = self.get(url).await?.json().await?;
        document
            .pointer("/dist-tags/latest")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| RegistryError::MissingLatest {
                package: package.to_string(),
            })
    }

    /// Run both checks. The second runs even when the first fails.
    pub async fn check(&self, package: &str) -> RegistryReport {
        let ping = self.ping().await;
        let latest = self.view_latest(package).await;
        RegistryReport {
            package: package.to_string(),
            ping,
            latest,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, RegistryError> {
        let joined = format!("{}/{}", self.base.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|source| RegistryError::InvalidRegistry { url: joined, source })
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, RegistryError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "Registry returned non-success status");
            return Err(RegistryError::Status { url: url.to_string(), status });
        }
        Ok(response)
    }
}

impl RegistryError {
    pub fn is_forbidden(&self) -> bool {
        matches!(self, RegistryError::Status { status, .. } if *status == StatusCode::FORBIDDEN)
    }
}
