//! Startup orchestration.
//!
//! Order: capture environment → validate → init logging → serve. A failed
//! validation ends the process here; nothing downstream ever sees a partial
//! configuration.

use crate::config::ValidationFailure;

/// Report every configuration violation and terminate with status 1.
pub fn fail_startup(failure: &ValidationFailure) -> ! {
    let report = serde_json::to_string(failure.report()).unwrap_or_default();
    tracing::error!(
        violations = failure.report().len(),
        report = %report,
        "Invalid environment variables"
    );
    eprintln!("{}", failure);
    std::process::exit(1)
}
