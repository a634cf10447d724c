//! HTTP surface of the dashboard.
//!
//! One axum router serves the three dashboard pages and the two JSON mock
//! endpoints they draw from. Pages and endpoints read through the same
//! [`StatusFeed`]; each request makes at most one feed call.

mod handlers;
pub mod render;

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::Request;
use axum::middleware::{from_fn, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{debug, info, warn, Instrument};

use crate::config::SiteConfig;
use crate::error::{Error, Result};
use crate::feed::StatusFeed;

/// Shared, read-only request state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Site metadata for page chrome.
    pub site: Arc<SiteConfig>,
    /// Where listings come from.
    pub feed: Arc<dyn StatusFeed>,
}

impl AppState {
    /// Create request state.
    #[must_use]
    pub fn new(site: SiteConfig, feed: Arc<dyn StatusFeed>) -> Self {
        Self {
            site: Arc::new(site),
            feed,
        }
    }
}

/// Build the dashboard router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home_handler))
        .route("/dashboard", get(handlers::dashboard_handler))
        .route("/drones", get(handlers::drones_handler))
        .route("/api/damage-status", get(handlers::damage_status_handler))
        .route("/api/drone-status", get(handlers::drone_status_handler))
        .route("/healthz", get(handlers::healthz_handler))
        .layer(from_fn(request_tracing_middleware))
        .with_state(state)
}

/// Bind a TCP listener on `addr`.
///
/// # Errors
///
/// Returns [`Error::Bind`] if the address is unavailable.
pub async fn bind(addr: &str) -> Result<TcpListener> {
    TcpListener::bind(addr).await.map_err(|source| Error::Bind {
        addr: addr.to_string(),
        source,
    })
}

/// Serve `router` on `listener` until ctrl-c.
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("Dashboard listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn request_tracing_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request.uri().path().to_string();
    let span = tracing::info_span!("http.request", method = %method, route = %route);

    let started = Instant::now();
    let response = next.run(request).instrument(span).await;
    debug!(
        method = %method,
        route = %route,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis(),
        "request completed"
    );
    response
}
