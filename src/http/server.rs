//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with page, admin and API handlers
//! - Wire up middleware (request ID, tracing, timeout, security headers, metrics)
//! - Bind server to listener and serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, Uri},
    middleware,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin::setup_admin_router;
use crate::config::{AppConfig, ServerSettings};
use crate::health;
use crate::http::request::{MakeRequestUuidV4, RequestIdExt, X_REQUEST_ID};
use crate::observability::metrics;
use crate::pages;
use crate::security::headers::with_security_headers;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

/// HTTP server for the site.
pub struct HttpServer {
    router: Router,
    settings: ServerSettings,
}

impl HttpServer {
    /// Create a new HTTP server around a validated configuration.
    pub fn new(config: Arc<AppConfig>, settings: ServerSettings) -> Self {
        let state = AppState { config };
        let router = Self::build_router(&settings, state);
        Self { router, settings }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(settings: &ServerSettings, state: AppState) -> Router {
        let router = Router::new()
            .route("/", get(pages::public::home))
            .route("/api/health", get(health::health))
            .merge(setup_admin_router())
            .route_layer(middleware::from_fn(metrics::track_metrics))
            .fallback(not_found)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "http_request",
                            request_id = %request.request_id(),
                            method = %request.method(),
                            path = %request.uri().path(),
                        )
                    }))
                    .layer(TimeoutLayer::new(Duration::from_secs(settings.request_timeout_secs))),
            );

        with_security_headers(router)
    }

    /// Router with all layers applied, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.settings.request_timeout_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }
}

async fn not_found(State(state): State<AppState>, uri: Uri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "No route matched");
    (
        StatusCode::NOT_FOUND,
        Html(pages::not_found(&state.config, uri.path())),
    )
}
