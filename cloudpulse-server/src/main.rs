//! cloudpulse server binary
//!
//! Reads configuration from the environment (with `.env` support for
//! local development), then runs the portal until SIGTERM/Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cloudpulse_core::{DbConfig, DeployInfo};
use cloudpulse_server::db::Provisioner;
use cloudpulse_server::http::{run_server, AppState, ServerConfig};

/// Status portal and guestbook server
#[derive(Parser, Debug)]
#[command(name = "cloudpulse", version)]
struct Args {
    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0:8000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // PaaS hosts assign the listening port via PORT.
    let mut bind_addr = args.bind;
    if let Ok(port) = std::env::var("PORT") {
        bind_addr.set_port(port.parse().context("PORT must be a port number")?);
    }

    let db_config = DbConfig::from_env().context("invalid database configuration")?;
    let deploy = DeployInfo::from_env();
    tracing::info!(
        instance = %deploy.instance_id,
        region = %deploy.region,
        "starting cloudpulse portal"
    );

    let state = Arc::new(AppState {
        db: Provisioner::new(db_config),
        deploy,
    });

    run_server(state, ServerConfig { bind_addr }).await?;
    Ok(())
}
