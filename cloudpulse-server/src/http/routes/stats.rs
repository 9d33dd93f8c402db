//! Hit counter endpoint
//!
//! GET /api/stats - bump the counter and return the new value. Same
//! semantics as a dashboard view, for clients that want the number
//! without the HTML.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::db::GuestbookRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Stats response
#[derive(Serialize)]
pub struct StatsResponse {
    pub hits: u64,
}

/// GET /api/stats
async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>, ApiError> {
    let pool = state.db.acquire().await?;
    let hits = GuestbookRepo::new(pool).increment_and_read_hits().await?;

    Ok(Json(StatsResponse { hits }))
}

/// Stats routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/stats", get(stats))
}
