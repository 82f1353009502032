/// Seeding run against PostgreSQL
///
/// ```text
/// ensure database -> pool -> migrations -> Seeder::run -> dashboard summary
/// ```

use crate::config::SeederConfig;
use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use taskboard_shared::db::migrations::{ensure_database_exists, run_migrations};
use taskboard_shared::db::pool::{close_pool, create_pool};
use taskboard_shared::seed::{PgStore, RngSource, SeedReport, Seeder};
use taskboard_shared::stats::{to_series, DashboardStats, SeriesPoint};
use tracing::info;

/// What a run did and what the dashboard shows afterwards
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub report: SeedReport,
    pub dashboard: DashboardSummary,
}

/// Dashboard figures after seeding
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub pending_due_today: i64,
    pub completion: Vec<SeriesPoint>,
    pub created_by_weekday: Vec<SeriesPoint>,
}

impl From<DashboardStats> for DashboardSummary {
    fn from(stats: DashboardStats) -> Self {
        Self {
            pending_due_today: stats.pending_due_today,
            completion: to_series(&stats.completion_chart()),
            created_by_weekday: to_series(&stats.weekday_chart()),
        }
    }
}

/// Prepares the database and runs the seeder once
///
/// # Errors
///
/// Fails on invalid configuration (before any write), on connection or
/// migration errors, and on the first failed store call. Data written before
/// a failure stays; running again completes it.
pub async fn run(config: SeederConfig) -> anyhow::Result<RunSummary> {
    ensure_database_exists(&config.database.url)
        .await
        .context("Failed to ensure database exists")?;

    let pool = create_pool(&config.database)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await.context("Failed to run migrations")?;

    let seeder = Seeder::new(PgStore::new(pool.clone()), config.seed)?;
    let mut rng = RngSource::from_seed_or_entropy(seeder.config().rng_seed);

    let report = seeder.run(&mut rng).await.context("Seeding failed")?;

    let stats = DashboardStats::collect(&pool, Utc::now().date_naive())
        .await
        .context("Failed to collect dashboard stats")?;
    info!(
        completed = stats.completed,
        pending = stats.pending,
        pending_due_today = stats.pending_due_today,
        "Dashboard summary"
    );

    close_pool(pool).await;

    Ok(RunSummary {
        report,
        dashboard: stats.into(),
    })
}
