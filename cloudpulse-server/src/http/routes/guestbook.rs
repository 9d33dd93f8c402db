//! Guestbook endpoints
//!
//! POST /guestbook - sign via the dashboard form, redirect back
//! GET /api/guestbook/recent - recent signatures as JSON
//! GET /api/guestbook/leaderboard - top visitors as JSON

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};

use cloudpulse_core::VisitorName;

use crate::db::guestbook::{DEFAULT_LEADERBOARD_LIMIT, DEFAULT_RECENT_LIMIT};
use crate::db::{GuestbookRepo, LeaderboardEntry, VisitorRow};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Largest limit the list endpoints will honor
const MAX_LIMIT: u32 = 50;

/// Sign request from the dashboard form
#[derive(Deserialize)]
pub struct SignRequest {
    pub name: String,
}

/// Optional ?limit=N for the list endpoints
#[derive(Deserialize)]
pub struct LimitParams {
    pub limit: Option<u32>,
}

fn clamp_limit(params: &LimitParams, default: u32) -> u32 {
    params.limit.unwrap_or(default).clamp(1, MAX_LIMIT)
}

/// Visitor response
#[derive(Serialize)]
pub struct VisitorResponse {
    pub id: u64,
    pub name: String,
    pub visit_time: String,
}

impl From<VisitorRow> for VisitorResponse {
    fn from(v: VisitorRow) -> Self {
        Self {
            id: v.id,
            name: v.name,
            visit_time: v.visit_time.to_rfc3339(),
        }
    }
}

/// Leaderboard entry response
#[derive(Serialize)]
pub struct LeaderboardResponse {
    pub name: String,
    pub visits: i64,
}

impl From<LeaderboardEntry> for LeaderboardResponse {
    fn from(e: LeaderboardEntry) -> Self {
        Self {
            name: e.name,
            visits: e.visits,
        }
    }
}

/// POST /guestbook - record a visit and bounce back to the dashboard
async fn sign(
    State(state): State<Arc<AppState>>,
    Form(req): Form<SignRequest>,
) -> Result<Redirect, ApiError> {
    let name = VisitorName::new(&req.name)?;
    let pool = state.db.acquire().await?;
    GuestbookRepo::new(pool).record_visit(&name).await?;

    Ok(Redirect::to("/"))
}

/// GET /api/guestbook/recent - most recent signatures, newest first
async fn recent(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<VisitorResponse>>, ApiError> {
    let limit = clamp_limit(&params, DEFAULT_RECENT_LIMIT);
    let pool = state.db.acquire().await?;
    let rows = GuestbookRepo::new(pool).list_recent(limit).await?;

    Ok(Json(rows.into_iter().map(VisitorResponse::from).collect()))
}

/// GET /api/guestbook/leaderboard - top visitors by signature count
async fn leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<LeaderboardResponse>>, ApiError> {
    let limit = clamp_limit(&params, DEFAULT_LEADERBOARD_LIMIT);
    let pool = state.db.acquire().await?;
    let entries = GuestbookRepo::new(pool).top_visitors(limit).await?;

    Ok(Json(
        entries.into_iter().map(LeaderboardResponse::from).collect(),
    ))
}

/// Browser-facing guestbook routes (no CORS - same-origin form post)
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/guestbook", post(sign))
}

/// JSON API routes, mounted behind the permissive CORS layer
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/guestbook/recent", get(recent))
        .route("/api/guestbook/leaderboard", get(leaderboard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_when_absent() {
        let params = LimitParams { limit: None };
        assert_eq!(clamp_limit(&params, DEFAULT_RECENT_LIMIT), 5);
    }

    #[test]
    fn limit_is_clamped_to_range() {
        assert_eq!(clamp_limit(&LimitParams { limit: Some(0) }, 5), 1);
        assert_eq!(clamp_limit(&LimitParams { limit: Some(500) }, 5), MAX_LIMIT);
        assert_eq!(clamp_limit(&LimitParams { limit: Some(10) }, 5), 10);
    }
}
