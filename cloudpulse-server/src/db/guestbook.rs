//! Guestbook repository
//!
//! Four fixed queries against the provisioned pool: record a visit, bump
//! and read the hit counter, list recent signatures, and aggregate the
//! leaderboard. Reads are always fresh — nothing is cached or persisted
//! outside the database.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};

use cloudpulse_core::VisitorName;

/// Default number of recent signatures shown on the dashboard
pub const DEFAULT_RECENT_LIMIT: u32 = 5;

/// Default leaderboard size
pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 3;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// One guestbook signature
#[derive(Debug, Clone, FromRow)]
pub struct VisitorRow {
    pub id: u64,
    pub name: String,
    pub visit_time: DateTime<Utc>,
}

/// Derived leaderboard entry; recomputed on every read, never stored
#[derive(Debug, Clone, FromRow)]
pub struct LeaderboardEntry {
    pub name: String,
    pub visits: i64,
}

/// Guestbook repository borrowing an acquired pool
pub struct GuestbookRepo<'a> {
    pool: &'a MySqlPool,
}

impl<'a> GuestbookRepo<'a> {
    pub fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert one visitor row with a server-assigned timestamp.
    ///
    /// Repeated identical names are all recorded as distinct entries;
    /// frequency is the leaderboard signal.
    pub async fn record_visit(&self, name: &VisitorName) -> Result<(), DbError> {
        sqlx::query("INSERT INTO visitors (name) VALUES (?)")
            .bind(name.as_str())
            .execute(self.pool)
            .await?;

        tracing::debug!(visitor = %name, "visit recorded");
        Ok(())
    }

    /// Increment the singleton hit counter and return the new value.
    ///
    /// The UPDATE and the read-back share one transaction: the row lock
    /// taken by the UPDATE is held to commit, so concurrent requests
    /// serialize and each sees its own post-increment value.
    pub async fn increment_and_read_hits(&self) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE site_stats SET hits = hits + 1 WHERE id = 1")
            .execute(&mut *tx)
            .await?;

        let (hits,): (u64,) = sqlx::query_as("SELECT hits FROM site_stats WHERE id = 1")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(hits)
    }

    /// Most recent signatures, newest first (id order, equivalently
    /// insertion order).
    pub async fn list_recent(&self, limit: u32) -> Result<Vec<VisitorRow>, DbError> {
        let rows = sqlx::query_as::<_, VisitorRow>(
            "SELECT id, name, visit_time FROM visitors ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Top visitors by signature count, descending.
    ///
    /// Tie order among equal counts is whatever the engine returns;
    /// callers must not depend on it. An empty table yields an empty Vec.
    pub async fn top_visitors(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, DbError> {
        let rows = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT name, COUNT(*) AS visits
            FROM visitors
            GROUP BY name
            ORDER BY visits DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
