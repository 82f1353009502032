/// Association assigner
///
/// One-time backfill of task-category links. Only tasks with no link at all
/// are touched; each gets between 1 and `max_per_task` distinct categories
/// (fewer if fewer exist). Tasks that already have links keep exactly the
/// links they have.
///
/// # Batching
///
/// ```text
/// cursor = start
/// loop:
///   batch = unassociated tasks with id > cursor, ascending, at most batch_size
///   for task in batch: choose categories, attach missing links
///   cursor = last id of batch
/// until batch is short
/// ```
///
/// Each batch is fully persisted before the next one is fetched, so memory is
/// bounded by one batch and a failure keeps every earlier batch.
///
/// # Example
///
/// ```
/// use taskboard_shared::seed::associations::AssociationAssigner;
/// use taskboard_shared::seed::memory::MemoryStore;
/// use taskboard_shared::seed::random::RngSource;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let mut rng = RngSource::seeded(1);
///
/// let stats = AssociationAssigner::new(&store, &[1, 2, 3])
///     .assign_all(&mut rng)
///     .await?;
/// println!("linked {} tasks", stats.tasks_associated);
/// # Ok(())
/// # }
/// ```

use crate::seed::config::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_CATEGORIES_PER_TASK};
use crate::seed::cursor::BatchCursor;
use crate::seed::error::StoreResult;
use crate::seed::random::RandomSource;
use crate::seed::selection::choose_categories;
use crate::seed::store::TaskStore;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// Result of one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    /// Cursor for the next call; None once the scan is exhausted
    pub next: Option<BatchCursor>,

    /// Tasks fetched in this batch
    pub tasks_seen: usize,

    /// Tasks that received at least one new link
    pub tasks_associated: usize,

    /// Link rows created
    pub links_created: u64,
}

/// Totals over a full scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentStats {
    pub batches: usize,
    pub tasks_associated: usize,
    pub links_created: u64,
}

/// Assigns random category subsets to link-free tasks
pub struct AssociationAssigner<'a, S: ?Sized> {
    store: &'a S,
    category_ids: Vec<i64>,
    batch_size: usize,
    max_per_task: usize,
}

impl<'a, S> AssociationAssigner<'a, S>
where
    S: TaskStore + ?Sized,
{
    /// Creates an assigner over the resolved category ids
    ///
    /// Duplicate ids are dropped, keeping the first occurrence.
    pub fn new(store: &'a S, category_ids: &[i64]) -> Self {
        let mut seen = HashSet::new();
        let category_ids = category_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();

        Self {
            store,
            category_ids,
            batch_size: DEFAULT_BATCH_SIZE as usize,
            max_per_task: DEFAULT_MAX_CATEGORIES_PER_TASK as usize,
        }
    }

    /// Tasks fetched per batch (at least 1)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Upper bound of the per-task draw (at least 1)
    pub fn with_max_per_task(mut self, max_per_task: usize) -> Self {
        self.max_per_task = max_per_task.max(1);
        self
    }

    /// Category ids this assigner draws from
    pub fn category_ids(&self) -> &[i64] {
        &self.category_ids
    }

    /// Processes the batch after `cursor`
    ///
    /// With no categories this does nothing and reports the scan as
    /// exhausted. The returned cursor can be stored and passed back later to
    /// resume.
    pub async fn assign_batch<R>(
        &self,
        cursor: BatchCursor,
        rng: &mut R,
    ) -> StoreResult<BatchProgress>
    where
        R: RandomSource + ?Sized,
    {
        if self.category_ids.is_empty() {
            return Ok(BatchProgress {
                next: None,
                tasks_seen: 0,
                tasks_associated: 0,
                links_created: 0,
            });
        }

        let batch = self.store.unassociated_tasks(cursor, self.batch_size).await?;

        let mut tasks_associated = 0;
        let mut links_created = 0;

        for &task_id in &batch {
            let chosen: Vec<i64> = choose_categories(&self.category_ids, self.max_per_task, rng)
                .into_iter()
                .collect();

            let created = self.store.attach_missing(task_id, &chosen).await?;
            debug!(task_id, categories = ?chosen, created, "Task categories attached");

            if created > 0 {
                tasks_associated += 1;
            }
            links_created += created;
        }

        let next = if batch.len() < self.batch_size {
            None
        } else {
            Some(cursor.advance(&batch))
        };

        Ok(BatchProgress {
            next,
            tasks_seen: batch.len(),
            tasks_associated,
            links_created,
        })
    }

    /// Runs batches from the start until the scan is exhausted
    pub async fn assign_all<R>(&self, rng: &mut R) -> StoreResult<AssignmentStats>
    where
        R: RandomSource + ?Sized,
    {
        let mut stats = AssignmentStats::default();

        if self.category_ids.is_empty() {
            info!("No categories available, skipping association assignment");
            return Ok(stats);
        }

        let mut cursor = Some(BatchCursor::start());
        while let Some(current) = cursor {
            let progress = self.assign_batch(current, rng).await?;
            if progress.tasks_seen == 0 {
                break;
            }

            stats.batches += 1;
            stats.tasks_associated += progress.tasks_associated;
            stats.links_created += progress.links_created;
            debug!(
                batch = stats.batches,
                tasks = progress.tasks_seen,
                links = progress.links_created,
                "Association batch committed"
            );

            cursor = progress.next;
        }

        info!(
            batches = stats.batches,
            tasks_associated = stats.tasks_associated,
            links_created = stats.links_created,
            "Associations assigned"
        );
        Ok(stats)
    }
}
