//! Route handlers organized by resource

pub mod dashboard;
pub mod guestbook;
pub mod health;
pub mod stats;
