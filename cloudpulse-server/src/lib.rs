//! cloudpulse-server: status portal and guestbook HTTP server
//!
//! Serves the deployment status dashboard, a database-backed guestbook
//! with a visit-frequency leaderboard, and a page-view hit counter. The
//! database and its schema are provisioned lazily on the first request
//! that needs them; connectivity failures are rendered as diagnostic
//! text, not generic error pages.

pub mod db;
pub mod http;

pub use db::{GuestbookRepo, ProvisionError, Provisioner};
pub use http::{build_router, run_server, AppState, ServerConfig};
