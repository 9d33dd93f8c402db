//! Environment-sourced configuration
//!
//! The portal is built for ephemeral PaaS instances: everything it needs
//! arrives through the process environment, and every field has a
//! local-development default so `cargo run` works with no setup.

use std::env;

use crate::ident::DatabaseName;
use crate::validation::ValidationError;

/// Default schema name when DB_NAME is absent
const DEFAULT_DATABASE: &str = "cloudpulse";

/// Database connection settings
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: DatabaseName,
}

impl DbConfig {
    /// Load from `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` /
    /// `DB_NAME`, with local-dev defaults for anything unset.
    ///
    /// Fails only when `DB_NAME` is present but not a valid identifier, or
    /// `DB_PORT` is not a number.
    pub fn from_env() -> Result<Self, ValidationError> {
        let host = env::var("DB_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("DB_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ValidationError::InvalidFormat {
                field: "DB_PORT",
                reason: "must be a port number",
            })?,
            Err(_) => 3306,
        };
        let user = env::var("DB_USER").unwrap_or_else(|_| "root".to_string());
        let password = env::var("DB_PASSWORD").unwrap_or_default();
        let database = DatabaseName::new(
            &env::var("DB_NAME").unwrap_or_else(|_| DEFAULT_DATABASE.to_string()),
        )?;

        Ok(Self {
            host,
            port,
            user,
            password,
            database,
        })
    }
}

/// Deployment metadata shown on the status page
#[derive(Debug, Clone)]
pub struct DeployInfo {
    /// Short instance identifier (first 6 chars of the platform-assigned id)
    pub instance_id: String,
    pub region: String,
    pub deploy_source: String,
}

impl DeployInfo {
    /// Read platform metadata from the environment.
    ///
    /// `WEBSITE_INSTANCE_ID` and `WEBSITE_SITE_REGION` are what Azure App
    /// Service injects; outside that environment the page shows
    /// local-development placeholders.
    pub fn from_env() -> Self {
        let instance_id = env::var("WEBSITE_INSTANCE_ID")
            .map(|id| truncate_id(&id))
            .unwrap_or_else(|_| "local-dev".to_string());
        let region =
            env::var("WEBSITE_SITE_REGION").unwrap_or_else(|_| "Southeast Asia".to_string());
        let deploy_source =
            env::var("DEPLOY_SOURCE").unwrap_or_else(|_| "GitHub Actions".to_string());

        Self {
            instance_id,
            region,
            deploy_source,
        }
    }
}

/// First six characters of a platform instance id, for display
fn truncate_id(id: &str) -> String {
    id.chars().take(6).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_instance_ids() {
        assert_eq!(truncate_id("abcdef0123456789"), "abcdef");
        assert_eq!(truncate_id("ab"), "ab");
        assert_eq!(truncate_id(""), "");
    }

    #[test]
    fn default_database_name_is_valid() {
        assert!(DatabaseName::new(DEFAULT_DATABASE).is_ok());
    }
}
