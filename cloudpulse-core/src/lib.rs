//! cloudpulse-core: configuration and validated domain values
//!
//! Shared building blocks for the cloudpulse portal:
//! - environment-sourced configuration (database + deployment metadata)
//! - validated value types (database name, visitor name)
//! - local-time helpers for the status page clock

pub mod config;
pub mod ident;
pub mod localtime;
pub mod validation;
pub mod visitor;

pub use config::{DbConfig, DeployInfo};
pub use ident::DatabaseName;
pub use validation::ValidationError;
pub use visitor::VisitorName;
