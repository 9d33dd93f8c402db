//! Connection provisioning and schema bootstrap
//!
//! The portal targets ephemeral PaaS instances with no guaranteed
//! pre-traffic initialization phase, so there is no separate migration
//! step: the first request that needs data access provisions everything.
//! Bootstrap runs once per process — both the pool and the schema pass are
//! guarded by `OnceCell`, so concurrent first requests don't race the DDL
//! and later requests pay nothing.
//!
//! A failed attempt does not poison the cells; if the database is
//! unreachable at startup, each request surfaces the diagnostic and the
//! next one retries.

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{Connection, MySqlConnection, MySqlPool};
use tokio::sync::OnceCell;

use cloudpulse_core::DbConfig;

/// Maximum connections for the pool. Kept low for a single small app.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Provisioning failure, with full driver diagnostics preserved.
///
/// Verbose error text is deliberate: surfacing exactly why a connectivity
/// attempt failed is part of what this system is for.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    /// Network or auth failure reaching the server
    #[error("database connection failed: {0}")]
    ConnectFailed(String),

    /// DDL statement failed, typically a permissions issue
    #[error("schema bootstrap failed: {0}")]
    SchemaFailed(String),
}

/// Lazily provisioned database handle.
///
/// `acquire` hands out the shared pool, connecting and bootstrapping the
/// schema on first use.
pub struct Provisioner {
    config: DbConfig,
    pool: OnceCell<MySqlPool>,
    schema: OnceCell<()>,
}

impl Provisioner {
    pub fn new(config: DbConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
            schema: OnceCell::new(),
        }
    }

    /// Get the connection pool, provisioning database and schema on the
    /// first successful call.
    ///
    /// # Errors
    ///
    /// `ConnectFailed` if the server is unreachable or rejects the
    /// credentials; `SchemaFailed` if any bootstrap DDL is refused.
    pub async fn acquire(&self) -> Result<&MySqlPool, ProvisionError> {
        let pool = self
            .pool
            .get_or_try_init(|| connect(&self.config))
            .await?;
        self.schema
            .get_or_try_init(|| ensure_schema(pool))
            .await?;
        Ok(pool)
    }

    /// Whether a pool has been provisioned yet. The portal serves traffic
    /// before its first database contact, so "not yet" is a normal state.
    pub fn is_provisioned(&self) -> bool {
        self.pool.initialized()
    }
}

/// Connect to the server, create the target database if absent, and open
/// the pool against it.
async fn connect(config: &DbConfig) -> Result<MySqlPool, ProvisionError> {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password);

    // Administrative connection with no schema selected, so the target
    // database can be created before the pool binds to it.
    let mut admin = MySqlConnection::connect_with(&options)
        .await
        .map_err(|e| ProvisionError::ConnectFailed(e.to_string()))?;

    // The database name passed an identifier allow-list at config load;
    // identifiers can't be bound as parameters.
    let create_db = format!(
        "CREATE DATABASE IF NOT EXISTS `{}`",
        config.database.as_str()
    );
    sqlx::query(&create_db)
        .execute(&mut admin)
        .await
        .map_err(|e| ProvisionError::SchemaFailed(e.to_string()))?;

    if let Err(e) = admin.close().await {
        tracing::debug!("admin connection close failed: {}", e);
    }

    let pool = MySqlPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect_with(options.database(config.database.as_str()))
        .await
        .map_err(|e| ProvisionError::ConnectFailed(e.to_string()))?;

    tracing::info!(database = %config.database, host = %config.host, "database pool ready");
    Ok(pool)
}

/// Idempotent schema bootstrap: create both tables and seed the singleton
/// counter row.
async fn ensure_schema(pool: &MySqlPool) -> Result<(), ProvisionError> {
    tracing::info!("ensuring guestbook schema");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS visitors (
            id BIGINT UNSIGNED PRIMARY KEY AUTO_INCREMENT,
            name VARCHAR(100) NOT NULL,
            visit_time TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| ProvisionError::SchemaFailed(e.to_string()))?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS site_stats (
            id INT PRIMARY KEY,
            hits BIGINT UNSIGNED NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| ProvisionError::SchemaFailed(e.to_string()))?;

    // Insert-if-absent: rerunning bootstrap must never reset the counter.
    sqlx::query("INSERT IGNORE INTO site_stats (id, hits) VALUES (1, 0)")
        .execute(pool)
        .await
        .map_err(|e| ProvisionError::SchemaFailed(e.to_string()))?;

    Ok(())
}
