//! # Taskboard Shared Library
//!
//! Data layer and fixture seeding for the Taskboard task manager.
//!
//! ## Module Organization
//!
//! - `db`: Connection pooling and migrations
//! - `models`: Users, categories, tasks and their category links
//! - `auth`: Credential hashing
//! - `seed`: Idempotent fixture seeding (ensurers and the association assigner)
//! - `stats`: Dashboard aggregation

pub mod auth;
pub mod db;
pub mod models;
pub mod seed;
pub mod stats;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
