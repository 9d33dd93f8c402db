//! Dashboard page - deployment status card plus the guestbook panel
//!
//! GET / - renders inline HTML, no template engine. Every view bumps the
//! hit counter. When the database can't be provisioned the page still
//! renders, with the full diagnostic text in the guestbook panel - showing
//! exactly why connectivity failed is a feature of this portal, not a leak
//! to hide.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use cloudpulse_core::localtime::kathmandu_now;
use cloudpulse_core::DeployInfo;

use crate::db::{GuestbookRepo, LeaderboardEntry, VisitorRow};
use crate::db::guestbook::{DEFAULT_LEADERBOARD_LIMIT, DEFAULT_RECENT_LIMIT};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Everything the guestbook panel needs, fetched in one pass
struct GuestbookPanel {
    hits: u64,
    recent: Vec<VisitorRow>,
    leaders: Vec<LeaderboardEntry>,
}

async fn load_panel(state: &AppState) -> Result<GuestbookPanel, ApiError> {
    let pool = state.db.acquire().await?;
    let repo = GuestbookRepo::new(pool);

    let hits = repo.increment_and_read_hits().await?;
    let recent = repo.list_recent(DEFAULT_RECENT_LIMIT).await?;
    let leaders = repo.top_visitors(DEFAULT_LEADERBOARD_LIMIT).await?;

    Ok(GuestbookPanel {
        hits,
        recent,
        leaders,
    })
}

/// GET /
async fn dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    let panel = match load_panel(&state).await {
        Ok(panel) => render_panel(&panel),
        Err(err) => render_diagnostic(&err.to_string()),
    };

    Html(render_page(&state.deploy, &panel))
}

/// Dashboard routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(dashboard))
}

/// Minimal HTML escaping for values interpolated into the page
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_panel(panel: &GuestbookPanel) -> String {
    let recent_items: String = panel
        .recent
        .iter()
        .map(|v| {
            format!(
                "<li><span class=\"name\">{}</span> <span class=\"when\">{}</span></li>\n",
                escape_html(&v.name),
                v.visit_time.format("%Y-%m-%d %H:%M:%S")
            )
        })
        .collect();
    let recent_block = if recent_items.is_empty() {
        "<p class=\"empty\">No signatures yet.</p>".to_string()
    } else {
        format!("<ul class=\"recent\">\n{}</ul>", recent_items)
    };

    let leader_rows: String = panel
        .leaders
        .iter()
        .map(|e| {
            format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape_html(&e.name),
                e.visits
            )
        })
        .collect();
    let leader_block = if leader_rows.is_empty() {
        "<p class=\"empty\">Leaderboard is empty.</p>".to_string()
    } else {
        format!(
            "<table class=\"leaders\"><tr><th>Visitor</th><th>Visits</th></tr>\n{}</table>",
            leader_rows
        )
    };

    format!(
        r#"<p class="hits">Page views: <strong>{hits}</strong></p>
<h2>Recent signatures</h2>
{recent_block}
<h2>Top visitors</h2>
{leader_block}
<form method="post" action="/guestbook">
    <input type="text" name="name" maxlength="100" placeholder="Your name" required>
    <button type="submit">Sign the guestbook</button>
</form>"#,
        hits = panel.hits,
        recent_block = recent_block,
        leader_block = leader_block,
    )
}

fn render_diagnostic(detail: &str) -> String {
    format!(
        "<p class=\"error\">Guestbook unavailable:</p><pre class=\"error\">{}</pre>",
        escape_html(detail)
    )
}

fn render_page(deploy: &DeployInfo, panel: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Cloudpulse Portal</title>
    <meta http-equiv="refresh" content="60">
    <style>
        body {{ font-family: 'Segoe UI', sans-serif; background-color: #f4f4f4; text-align: center; padding-top: 50px; }}
        .container {{ background-color: #ffffff; width: 600px; margin: 0 auto; padding: 40px; border-radius: 12px; box-shadow: 0 4px 20px rgba(0,0,0,0.1); }}
        h1 {{ color: #0078d4; }}
        .subtitle {{ color: #666; margin-bottom: 30px; }}
        .info-grid {{ display: grid; grid-template-columns: 1fr 1fr; gap: 15px; text-align: left; background: #f8f9fa; padding: 20px; border-radius: 8px; }}
        .label {{ font-weight: bold; color: #333; }}
        .value {{ color: #0078d4; font-family: monospace; }}
        .guestbook {{ margin-top: 30px; text-align: left; }}
        .recent {{ list-style: none; padding: 0; }}
        .when {{ color: #888; font-size: 0.85em; }}
        .leaders {{ width: 100%; border-collapse: collapse; }}
        .leaders td, .leaders th {{ border-bottom: 1px solid #eee; padding: 6px; text-align: left; }}
        .error {{ color: #c0392b; text-align: left; white-space: pre-wrap; }}
        .footer {{ margin-top: 30px; font-size: 0.9em; color: #888; border-top: 1px solid #eee; padding-top: 20px; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>Cloudpulse Portal</h1>
        <div class="subtitle">Automated CI/CD Deployment</div>

        <div class="info-grid">
            <div class="label">Cloud Provider:</div>
            <div class="value">Microsoft Azure (PaaS)</div>
            <div class="label">Region:</div>
            <div class="value">{region}</div>
            <div class="label">Instance ID:</div>
            <div class="value">{instance_id}</div>
            <div class="label">Deploy Source:</div>
            <div class="value">{deploy_source}</div>
        </div>

        <div class="guestbook">
{panel}
        </div>

        <div class="footer">
            <p>System Operational | Time (NPT): {time}</p>
            <p><em>Migrated by Cloud Pulse Pvt Ltd.</em></p>
        </div>
    </div>
</body>
</html>"#,
        region = escape_html(&deploy.region),
        instance_id = escape_html(&deploy.instance_id),
        deploy_source = escape_html(&deploy.deploy_source),
        panel = panel,
        time = kathmandu_now(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn deploy() -> DeployInfo {
        DeployInfo {
            instance_id: "abc123".to_string(),
            region: "Southeast Asia".to_string(),
            deploy_source: "GitHub Actions".to_string(),
        }
    }

    fn panel() -> GuestbookPanel {
        GuestbookPanel {
            hits: 42,
            recent: vec![VisitorRow {
                id: 7,
                name: "Alice".to_string(),
                visit_time: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            }],
            leaders: vec![LeaderboardEntry {
                name: "Alice".to_string(),
                visits: 3,
            }],
        }
    }

    #[test]
    fn page_shows_deployment_metadata() {
        let html = render_page(&deploy(), &render_panel(&panel()));
        assert!(html.contains("abc123"));
        assert!(html.contains("Southeast Asia"));
        assert!(html.contains("Time (NPT)"));
    }

    #[test]
    fn panel_shows_hits_and_entries() {
        let html = render_panel(&panel());
        assert!(html.contains("Page views: <strong>42</strong>"));
        assert!(html.contains("Alice"));
        assert!(html.contains("<td>3</td>"));
    }

    #[test]
    fn empty_panel_renders_placeholders() {
        let empty = GuestbookPanel {
            hits: 1,
            recent: vec![],
            leaders: vec![],
        };
        let html = render_panel(&empty);
        assert!(html.contains("No signatures yet"));
        assert!(html.contains("Leaderboard is empty"));
    }

    #[test]
    fn visitor_names_are_escaped() {
        let mut p = panel();
        p.recent[0].name = "<script>alert(1)</script>".to_string();
        p.leaders[0].name = "<b>bold</b>".to_string();
        let html = render_panel(&p);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn diagnostic_is_rendered_in_page() {
        let html = render_page(
            &deploy(),
            &render_diagnostic("database connection failed: connection refused"),
        );
        assert!(html.contains("Guestbook unavailable"));
        assert!(html.contains("connection refused"));
    }
}
