//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router (placeholder index only)
//! - Wire up middleware (tracing, optional request timeout)
//! - Serve on a bound listener until shutdown
//! - Bound the graceful drain by the configured shutdown timeout

use std::future::IntoFuture;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ResolvedConfig;
use crate::lifecycle::Shutdown;

/// Body served at `/`.
#[derive(Debug, Serialize)]
struct ServiceInfo {
    name: String,
    version: String,
    description: String,
}

/// HTTP server for the service.
pub struct HttpServer {
    router: Router,
    config: Arc<ResolvedConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: Arc<ResolvedConfig>) -> Self {
        let router = Self::build_router(Arc::clone(&config));
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: Arc<ResolvedConfig>) -> Router {
        let timeout = config.api.request_timeout();

        let router = Router::new().route("/", get(index)).with_state(config);
        let router = match timeout {
            Some(timeout) => router.layer(TimeoutLayer::new(timeout)),
            None => router,
        };
        router.layer(TraceLayer::new_for_http())
    }

    /// Serve on `listener` until `shutdown` triggers, then drain in-flight
    /// requests for at most `app.shutdown_timeout`.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let deadline = self.config.app.shutdown_timeout();
        tracing::info!(
            address = %addr,
            name = %self.config.app.name,
            "HTTP server starting"
        );

        let stop = shutdown.listen();
        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.listen())
            .into_future();
        tokio::pin!(serve);

        tokio::select! {
            result = &mut serve => {
                result?;
                tracing::info!("HTTP server stopped");
                return Ok(());
            }
            _ = stop => {
                tracing::info!(timeout = ?deadline, "Draining connections");
            }
        }

        match tokio::time::timeout(deadline, serve).await {
            Ok(result) => {
                result?;
                tracing::info!("HTTP server stopped");
            }
            Err(_) => {
                tracing::warn!(timeout = ?deadline, "Shutdown deadline exceeded, abandoning open connections");
            }
        }
        Ok(())
    }
}

async fn index(State(config): State<Arc<ResolvedConfig>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: config.app.name.clone(),
        version: config.app.version.clone(),
        description: config.app.description.clone(),
    })
}
