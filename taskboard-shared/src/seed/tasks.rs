/// Task ensurer
///
/// Guarded bulk insert: placeholder tasks are created only while the task
/// table is completely empty, and all of them at once.

use crate::models::task::NewTask;
use crate::seed::error::StoreResult;
use crate::seed::fixtures::placeholder_task;
use crate::seed::random::RandomSource;
use crate::seed::store::TaskStore;
use chrono::NaiveDate;
use tracing::info;

/// Creates `count` placeholder tasks if no task exists
///
/// The tasks are inserted in one all-or-nothing bulk create, `chunk_size`
/// rows per statement. A failed insert leaves the table empty, so the next
/// run creates the full set. Returns the number of tasks created (0 when any
/// task already existed).
pub async fn ensure_tasks<S, R>(
    store: &S,
    count: usize,
    chunk_size: usize,
    today: NaiveDate,
    rng: &mut R,
) -> StoreResult<u64>
where
    S: TaskStore + ?Sized,
    R: RandomSource + ?Sized,
{
    if store.any_tasks().await? {
        info!("Tasks already present, skipping task creation");
        return Ok(0);
    }

    if count == 0 {
        return Ok(0);
    }

    let tasks: Vec<NewTask> = (0..count).map(|_| placeholder_task(&mut *rng, today)).collect();
    let created = store.create_tasks(&tasks, chunk_size.max(1)).await?;

    info!(created, chunk_size, "Tasks ensured");
    Ok(created)
}
