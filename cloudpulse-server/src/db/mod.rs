//! Database layer - lazy provisioning and the guestbook repository
//!
//! # Design Principles
//!
//! - One shared pool, provisioned on first use - no per-request connections
//! - Idempotent bootstrap guarded by OnceCell - runs once per process
//! - Insert-if-absent for the counter seed - no check-then-insert
//! - Transaction around the counter increment-and-read

pub mod guestbook;
pub mod provision;

pub use guestbook::{DbError, GuestbookRepo, LeaderboardEntry, VisitorRow};
pub use provision::{ProvisionError, Provisioner};
