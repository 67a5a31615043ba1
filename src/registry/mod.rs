//! Package registry connectivity diagnostics.
//!
//! Backs the `check-registry` binary: two checks against an npm-compatible
//! registry (ping, then a package metadata lookup) and remediation guidance
//! when either fails.

pub mod client;
pub mod report;

use thiserror::Error;

pub use client::{RegistryChecker, DEFAULT_PACKAGE, DEFAULT_REGISTRY};
pub use report::{RegistryReport, REMEDIATION_STEPS};

/// Errors from registry checks.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid registry URL `{url}`: {source}")]
    InvalidRegistry {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: reqwest::StatusCode },

    #[error("no dist-tags.latest published for `{package}`")]
    MissingLatest { package: String },
}
