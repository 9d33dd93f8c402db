//! Health check endpoint
//!
//! GET /health - liveness plus whether the database pool has been
//! provisioned. Provisioning is lazy, so `"database": "pending"` is the
//! normal answer until the first request that needs data access; it flips
//! to `"ready"` after the first successful bootstrap.

use std::sync::Arc;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// "ready" once the pool has been provisioned, "pending" before
    pub database: &'static str,
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = if state.db.is_provisioned() {
        "ready"
    } else {
        "pending"
    };

    Json(HealthResponse {
        status: "ok",
        service: "cloudpulse",
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Provisioner;
    use cloudpulse_core::{DatabaseName, DbConfig, DeployInfo};

    fn unprovisioned_state() -> Arc<AppState> {
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

    #[tokio::test]
    async fn alive_with_database_pending_before_first_provision() {
        let Json(body) = health(State(unprovisioned_state())).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.service, "cloudpulse");
        assert_eq!(body.database, "pending");
    }
}
