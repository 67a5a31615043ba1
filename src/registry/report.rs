//! Outcome of a registry check and the guidance printed on failure.

use crate::registry::RegistryError;

/// Steps printed when any check fails.
pub const REMEDIATION_STEPS: &[&str] = &[
    "Set an approved registry: NPM_CONFIG_REGISTRY=<your-internal-registry>",
    "Ensure proxy env vars are valid: HTTP_PROXY/HTTPS_PROXY/NO_PROXY",
    "Authenticate if your registry requires an auth token",
];

#[derive(Debug)]
pub struct RegistryReport {
    pub package: String,
    pub ping: Result<(), RegistryError>,
    pub latest: Result<String, RegistryError>,
}

impl RegistryReport {
    pub fn is_ok(&self) -> bool {
        self.ping.is_ok() && self.latest.is_ok()
    }

    pub fn errors(&self) -> impl Iterator<Item = &RegistryError> {
        self.ping.as_ref().err().into_iter().chain(self.latest.as_ref().err())
    }

    /// Best guess at why the check failed, from the errors observed.
    pub fn likely_cause(&self) -> &'static str {
        if self.errors().any(RegistryError::is_forbidden) {
            RegistryError::FORBIDDEN_CAUSE
        } else {
            self.errors()
                .next()
                .map(RegistryError::likely_cause)
                .unwrap_or("registry responded, but not with the expected package metadata.")
        }
    }
}

impl RegistryError {
    const FORBIDDEN_CAUSE: &'static str = "restricted network/proxy policy returning HTTP 403.";

    /// Best guess at the root cause of this single error.
    pub fn likely_cause(&self) -> &'static str {
        match self {
            RegistryError::InvalidRegistry { .. } => {
                "registry URL is not an absolute URL (check --registry / NPM_CONFIG_REGISTRY)."
            }
            RegistryError::Request(_) => {
                "registry unreachable (DNS, proxy or firewall blocking the connection)."
            }
            _ if self.is_forbidden() => Self::FORBIDDEN_CAUSE,
            RegistryError::Status { .. } | RegistryError::MissingLatest { .. } => {
                "registry responded, but not with the expected package metadata."
            }
        }
    }
}
