//! Admin portal routes. Everything here is mounted under `/admin`.

pub mod handlers;

use axum::{routing::get, Router};

use crate::http::AppState;

pub fn setup_admin_router() -> Router<AppState> {
    Router::new().route("/admin", get(handlers::home))
}
