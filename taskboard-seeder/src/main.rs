//! # Taskboard Seeder
//!
//! Seeds a Taskboard database with baseline fixtures: canonical categories,
//! a test account with supplementary users, placeholder tasks, and random
//! category links for every task that has none. Safe to run repeatedly.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/taskboard cargo run -p taskboard-seeder
//! ```
//!
//! The run summary is printed to stdout as JSON.

use taskboard_seeder::config::{LogFormat, SeederConfig};
use taskboard_seeder::runner;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "taskboard_seeder=info,taskboard_shared=info".into());
    let registry = tracing_subscriber::registry().with(filter);
    match LogFormat::from_env() {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Taskboard Seeder v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = SeederConfig::from_env()?;
    let summary = runner::run(config).await?;

    tracing::info!(
        tasks_created = summary.report.tasks_created,
        associations_created = summary.report.associations_created,
        "Seeding complete"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
