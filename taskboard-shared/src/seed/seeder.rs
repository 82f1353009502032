/// Seeding orchestrator
///
/// Runs the four steps in dependency order:
///
/// ```text
/// Seeder::run
///   ├─> ensure_categories   canonical names -> category ids
///   ├─> ensure_users        test account (+ supplementary users on first run)
///   ├─> ensure_tasks        placeholder tasks when the table is empty
///   └─> AssociationAssigner category backfill for link-free tasks
/// ```
///
/// Every step is idempotent, so running the seeder twice leaves the same
/// counts as running it once. A store failure aborts the run; calling `run`
/// again resumes where it stopped.
///
/// # Example
///
/// ```
/// use taskboard_shared::seed::{MemoryStore, RngSource, SeedConfig, Seeder};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let seeder = Seeder::new(MemoryStore::new(), SeedConfig::default())?;
/// let mut rng = RngSource::seeded(42);
///
/// let report = seeder.run(&mut rng).await?;
/// assert_eq!(report.tasks_created, 100);
/// # Ok(())
/// # }
/// ```

use crate::auth::password::{hash_password, HashParams};
use crate::models::Ensured;
use crate::seed::associations::{AssignmentStats, AssociationAssigner};
use crate::seed::categories::ensure_categories;
use crate::seed::config::{to_count, SeedConfig};
use crate::seed::error::SeedError;
use crate::seed::random::RandomSource;
use crate::seed::store::{CategoryStore, TaskStore, UserStore};
use crate::seed::tasks::ensure_tasks;
use crate::seed::users::{ensure_users, TestAccount};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Summary of one seeding run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Resolved category ids, in canonical order
    pub category_ids: Vec<i64>,
    pub categories_created: usize,
    pub test_user: Ensured,
    pub supplementary_users_created: u64,
    pub tasks_created: u64,
    pub association_batches: usize,
    pub tasks_associated: usize,
    pub associations_created: u64,
}

/// Fixture seeder over any store implementing the three store traits
pub struct Seeder<S> {
    store: S,
    config: SeedConfig,
    hash_params: HashParams,
}

impl<S> Seeder<S>
where
    S: UserStore + CategoryStore + TaskStore,
{
    /// Validates the configuration and builds a seeder
    ///
    /// # Errors
    ///
    /// Returns `SeedError::InvalidConfig` before any store call if the
    /// configuration is rejected.
    pub fn new(store: S, config: SeedConfig) -> Result<Self, SeedError> {
        config.check()?;

        Ok(Self {
            store,
            config,
            hash_params: HashParams::fixture(),
        })
    }

    /// Overrides the Argon2 cost used for placeholder credentials
    pub fn with_hash_params(mut self, params: HashParams) -> Self {
        self.hash_params = params;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Runs every seeding step with the current time
    pub async fn run<R>(&self, rng: &mut R) -> Result<SeedReport, SeedError>
    where
        R: RandomSource + ?Sized,
    {
        self.run_at(Utc::now(), rng).await
    }

    /// Runs every seeding step as of `now`
    ///
    /// `now` stamps the verification time of created users and anchors the
    /// due-date window of created tasks.
    pub async fn run_at<R>(&self, now: DateTime<Utc>, rng: &mut R) -> Result<SeedReport, SeedError>
    where
        R: RandomSource + ?Sized,
    {
        let batch_size = to_count(self.config.batch_size);
        info!(
            task_count = self.config.task_count,
            categories = self.config.categories.len(),
            batch_size,
            "Seeding started"
        );

        let categories = ensure_categories(&self.store, &self.config.categories).await?;

        let password_hash = hash_password(&self.config.test_user_password, self.hash_params)?;
        let account = TestAccount {
            email: &self.config.test_user_email,
            name: &self.config.test_user_name,
            password_hash: &password_hash,
        };
        let users = ensure_users(
            &self.store,
            &account,
            to_count(self.config.supplementary_users),
            batch_size,
            now,
            rng,
        )
        .await?;

        let tasks_created = ensure_tasks(
            &self.store,
            to_count(self.config.task_count),
            batch_size,
            now.date_naive(),
            rng,
        )
        .await?;

        let associations = self.assigner(&categories.ids).assign_all(rng).await?;

        let report = SeedReport {
            category_ids: categories.ids,
            categories_created: categories.created,
            test_user: users.test_user,
            supplementary_users_created: users.supplementary_created,
            tasks_created,
            association_batches: associations.batches,
            tasks_associated: associations.tasks_associated,
            associations_created: associations.links_created,
        };

        info!(
            categories_created = report.categories_created,
            test_user_created = report.test_user.was_created(),
            supplementary_users_created = report.supplementary_users_created,
            tasks_created = report.tasks_created,
            tasks_associated = report.tasks_associated,
            associations_created = report.associations_created,
            "Seeding finished"
        );
        Ok(report)
    }

    /// Runs only the association backfill, drawing from every stored category
    pub async fn backfill_associations<R>(&self, rng: &mut R) -> Result<AssignmentStats, SeedError>
    where
        R: RandomSource + ?Sized,
    {
        let category_ids = self.store.list_category_ids().await?;
        Ok(self.assigner(&category_ids).assign_all(rng).await?)
    }

    fn assigner<'a>(&'a self, category_ids: &[i64]) -> AssociationAssigner<'a, S> {
        AssociationAssigner::new(&self.store, category_ids)
            .with_batch_size(to_count(self.config.batch_size))
            .with_max_per_task(to_count(self.config.max_categories_per_task))
    }
}
