//! Service health endpoint.
//!
//! `GET /api/health` always answers `200` with a fixed status document while
//! the process is serving.

use axum::Json;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

pub const SERVICE_NAME: &str = "nlc-website";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub timestamp: String,
}

impl HealthStatus {
    pub fn ok_at(now: DateTime<Utc>) -> Self {
        Self {
            status: "ok",
            service: SERVICE_NAME,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok_at(Utc::now()))
}
