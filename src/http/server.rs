//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the REST handlers
//! - Wire up middleware (access log, request ID, body limit, content type)
//! - Build the dispatcher and configuration reader once and inject them
//! - Serve over plain TCP or TLS until the shutdown signal

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::config::{ConfigReader, GatewayConfig};
use crate::dispatch::outcome::error_body;
use crate::dispatch::{DispatchError, Dispatcher, HttpDispatcher};
use crate::http::handlers::{cats, favorites, votes};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdSpan};
use crate::http::response::JsonBytes;

/// How long in-flight requests get to finish once shutdown starts (TLS listener).
const TLS_DRAIN_SECS: u64 = 10;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<dyn Dispatcher>,
    pub config: Arc<ConfigReader>,
    /// Bounded waiter deadline.
    pub deadline: Duration,
}

impl AppState {
    pub fn new(dispatcher: Arc<dyn Dispatcher>, config: Arc<ConfigReader>) -> Self {
        let deadline = config.request_timeout();
        Self {
            dispatcher,
            config,
            deadline,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server that forwards to the configured upstream.
    pub fn new(config: GatewayConfig) -> Result<Self, DispatchError> {
        let reader = Arc::new(ConfigReader::new(config.upstream.clone()));
        let dispatcher = Arc::new(HttpDispatcher::new(reader.clone())?);
        Ok(Self::with_parts(config, dispatcher, reader))
    }

    /// Create a server around an existing dispatcher.
    pub fn with_dispatcher(config: GatewayConfig, dispatcher: Arc<dyn Dispatcher>) -> Self {
        let reader = Arc::new(ConfigReader::new(config.upstream.clone()));
        Self::with_parts(config, dispatcher, reader)
    }

    fn with_parts(
        config: GatewayConfig,
        dispatcher: Arc<dyn Dispatcher>,
        reader: Arc<ConfigReader>,
    ) -> Self {
        let state = AppState::new(dispatcher, reader);
        let router = build_router(state, config.listener.max_body_bytes);
        Self { router, config }
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the server over TLS on the configured bind address.
    pub async fn run_tls(
        self,
        tls: axum_server::tls_rustls::RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .listener
            .bind_address
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let handle = axum_server::Handle::new();
        let drain = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received");
            drain.graceful_shutdown(Some(Duration::from_secs(TLS_DRAIN_SECS)));
        });

        tracing::info!(address = %addr, "HTTPS server starting");
        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/cats/random", get(cats::get_random_cat))
        .route("/api/breeds", get(cats::get_breeds))
        .route("/api/breed-images", get(cats::get_breed_images))
        .route("/api/vote", post(votes::vote))
        .route("/api/vote_history", get(votes::get_vote_history))
        .route(
            "/api/favorites",
            get(favorites::get_favorites).post(favorites::add_favorite),
        )
        .route("/api/favorites/{id}", delete(favorites::remove_favorite))
        .fallback(not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http().make_span_with(RequestIdSpan))
        .layer(set_request_id_layer())
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn not_found() -> Response {
    let mut response = JsonBytes(error_body("Not found")).into_response();
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}
