//! Siteconf: Site and Connection Configuration Resolution
//!
//! Merges partial persisted site settings over compiled defaults, and governs how
//! the backing-store connection configuration is loaded, validated, saved,
//! snapshotted, cached, and recovered when persistence is unavailable.

pub mod api;
pub mod cli;
pub mod clock;
pub mod config;
pub mod connection;
pub mod env;
pub mod error;
pub mod logging;
pub mod site;
pub mod store;
