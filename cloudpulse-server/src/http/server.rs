//! Axum server setup
//!
//! Server skeleton with:
//! - Tracing middleware
//! - Permissive CORS scoped to the /api routes (public read-only data);
//!   the HTML pages and the form post stay same-origin
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use cloudpulse_core::DeployInfo;

use super::routes;
use crate::db::Provisioner;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8000)
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
        }
    }
}

/// Shared application state
pub struct AppState {
    /// Lazily bootstrapped database handle
    pub db: Provisioner,
    /// Platform metadata shown on the status page
    pub deploy: DeployInfo,
}

/// Build the application router with all routes
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .merge(routes::guestbook::api_router())
        .merge(routes::stats::router())
        .layer(cors);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::dashboard::router())
        .merge(routes::guestbook::router())
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(AppState { db, deploy });
/// run_server(state, ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: Arc<AppState>, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Provisioner;
    use axum::body::Body;
    use axum::http::Request;
    use cloudpulse_core::{DatabaseName, DbConfig};
    use tower::ServiceExt;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8000);
    }

    fn test_state() -> Arc<AppState> {
        let config = DbConfig {
            host: "127.0.0.1".to_string(),
            port: 9,
            user: "root".to_string(),
            password: String::new(),
            database: DatabaseName::new("cloudpulse_test").expect("valid name"),
        };
        Arc::new(AppState {
            db: Provisioner::new(config),
            deploy: DeployInfo {
                instance_id: "local-dev".to_string(),
                region: "Southeast Asia".to_string(),
                deploy_source: "GitHub Actions".to_string(),
            },
        })
    }

    fn preflight(uri: &str) -> Request<Body> {
        Request::builder()
            .method("OPTIONS")
            .uri(uri)
            .header("origin", "https://example.com")
            .header("access-control-request-method", "GET")
            .body(Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn api_routes_answer_cors_preflight() {
        let app = build_router(test_state());
        let response = app.oneshot(preflight("/api/stats")).await.expect("response");
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn page_routes_stay_same_origin() {
        let app = build_router(test_state());
        let response = app.oneshot(preflight("/")).await.expect("response");
        assert!(!response
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}
