//! Configuration schema definitions.
//!
//! Two groups of settings are defined here:
//! - application settings read from the environment and checked against a
//!   [`ConfigSchema`] at startup, producing an [`AppConfig`];
//! - server settings ([`ServerSettings`]) supplied on the command line.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;
use url::Url;

/// Environment key for the runtime mode.
pub const NODE_ENV: &str = "NODE_ENV";

/// Environment key for the public base URL of the site.
pub const NEXT_PUBLIC_APP_URL: &str = "NEXT_PUBLIC_APP_URL";

/// Environment key for the database connection string.
pub const DATABASE_URL: &str = "DATABASE_URL";

/// Accepted values for [`NODE_ENV`], in declaration order.
pub const RUNTIME_MODES: &[&str] = &["development", "test", "production"];

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Accepted shape of a single setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// One of a fixed set of strings.
    OneOf(&'static [&'static str]),
    /// Absolute URL with a scheme and a host.
    AbsoluteUrl,
    /// Any string with at least one character.
    NonEmpty,
}

impl Shape {
    /// Human-readable description of a conforming value.
    pub fn expected(&self) -> String {
        match self {
            Shape::OneOf(choices) => format!("one of {}", choices.join(", ")),
            Shape::AbsoluteUrl => "an absolute URL with scheme and host".to_string(),
            Shape::NonEmpty => "a non-empty string".to_string(),
        }
    }

    /// Whether `value` conforms to this shape.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Shape::OneOf(choices) => choices.contains(&value),
            Shape::AbsoluteUrl => parse_absolute_url(value).is_some(),
            Shape::NonEmpty => !value.is_empty(),
        }
    }
}

/// Parse `value` as a URL, rejecting relative URLs and URLs without a host
/// (`mailto:`, `data:`, `file:///`).
pub(crate) fn parse_absolute_url(value: &str) -> Option<Url> {
    Url::parse(value)
        .ok()
        .filter(|url| url.host_str().is_some_and(|host| !host.is_empty()))
}

/// Validation rule for one named setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRule {
    /// Environment key the value is read from.
    pub key: &'static str,

    /// Accepted shape of the value.
    pub shape: Shape,

    /// Substituted when the key is absent. A rule without a default is required.
    pub default: Option<&'static str>,
}

impl SettingRule {
    pub const fn required(key: &'static str, shape: Shape) -> Self {
        Self { key, shape, default: None }
    }

    pub const fn with_default(key: &'static str, shape: Shape, default: &'static str) -> Self {
        Self { key, shape, default: Some(default) }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Ordered set of recognized settings.
///
/// Rule order is the order violations are reported in. A schema passed to
/// [`validate`](crate::config::validation::validate) must include rules for
/// the three [`AppConfig`] keys; extra rules are checked and reported too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSchema {
    rules: Vec<SettingRule>,
}

impl ConfigSchema {
    pub fn new(rules: Vec<SettingRule>) -> Self {
        Self { rules }
    }

    /// The schema the site is started with.
    pub fn app() -> Self {
        Self::new(vec![
            SettingRule::with_default(NODE_ENV, Shape::OneOf(RUNTIME_MODES), "development"),
            SettingRule::required(NEXT_PUBLIC_APP_URL, Shape::AbsoluteUrl),
            SettingRule::required(DATABASE_URL, Shape::NonEmpty),
        ])
    }

    pub fn rules(&self) -> &[SettingRule] {
        &self.rules
    }

    pub fn rule(&self, key: &str) -> Option<&SettingRule> {
        self.rules.iter().find(|rule| rule.key == key)
    }
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self::app()
    }
}

/// Deployment mode of the running process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Development,
    Test,
    Production,
}

impl RuntimeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeMode::Development => "development",
            RuntimeMode::Test => "test",
            RuntimeMode::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, RuntimeMode::Production)
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown runtime mode `{0}`")]
pub struct UnknownRuntimeMode(pub String);

impl FromStr for RuntimeMode {
    type Err = UnknownRuntimeMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(RuntimeMode::Development),
            "test" => Ok(RuntimeMode::Test),
            "production" => Ok(RuntimeMode::Production),
            other => Err(UnknownRuntimeMode(other.to_string())),
        }
    }
}

/// Public base URL of the site.
///
/// Keeps the operator's exact text alongside the parsed form, so the value
/// round-trips unchanged (`https://example.com` does not gain a trailing `/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppUrl {
    raw: String,
    parsed: Url,
}

impl AppUrl {
    pub fn parse(value: &str) -> Option<Self> {
        parse_absolute_url(value).map(|parsed| Self {
            raw: value.to_string(),
            parsed,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.parsed
    }

    /// Absolute link to `path` under this base.
    pub fn link(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.raw.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Display for AppUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for AppUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Database connection string. Redacted in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseUrl(String);

impl DatabaseUrl {
    pub fn parse(value: &str) -> Option<Self> {
        (!value.is_empty()).then(|| Self(value.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DatabaseUrl(<redacted>)")
    }
}

/// Validated, immutable application configuration.
///
/// Only [`validate`](crate::config::validation::validate) constructs one, so
/// holding an `AppConfig` means every setting passed its rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    runtime_mode: RuntimeMode,
    public_app_url: AppUrl,
    database_url: DatabaseUrl,
}

impl AppConfig {
    pub(crate) fn new(
        runtime_mode: RuntimeMode,
        public_app_url: AppUrl,
        database_url: DatabaseUrl,
    ) -> Self {
        Self {
            runtime_mode,
            public_app_url,
            database_url,
        }
    }

    pub fn runtime_mode(&self) -> RuntimeMode {
        self.runtime_mode
    }

    pub fn public_app_url(&self) -> &AppUrl {
        &self.public_app_url
    }

    pub fn database_url(&self) -> &DatabaseUrl {
        &self.database_url
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Prometheus exporter address. No exporter is installed when unset.
    pub metrics_address: Option<SocketAddr>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            metrics_address: None,
        }
    }
}
