//! # Taskboard Seeder Library
//!
//! Environment configuration and the PostgreSQL seeding run used by the
//! `taskboard-seeder` binary.
//!
//! ## Modules
//!
//! - `config`: `SEED_*` and `DATABASE_*` settings
//! - `runner`: database preparation, seeding, dashboard summary
//!
//! ## Example
//!
//! ```no_run
//! use taskboard_seeder::{config::SeederConfig, runner};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let summary = runner::run(SeederConfig::from_env()?).await?;
//! println!("Created {} tasks", summary.report.tasks_created);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod runner;
