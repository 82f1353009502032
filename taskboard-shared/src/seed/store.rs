/// Store seams used by the seeder
///
/// The seeder never talks to a database directly. It sees three narrow
/// capabilities, each implemented by `PgStore` for PostgreSQL and by
/// `MemoryStore` for tests. Method names differ across the traits so one type
/// can implement all three without ambiguity.
///
/// # Contract
///
/// - Find-or-create calls are keyed by the natural key (email, name) and
///   leave existing rows untouched.
/// - Bulk creates are all-or-nothing: the rows go out in statements of at
///   most `chunk_size` rows, and a failure part way leaves none of them
///   stored. The guards in front of them (no task yet, a single user) stay
///   open until a bulk create has fully succeeded.
/// - `attach_missing` links categories only to a task with no link at all,
///   and settles concurrent callers so one of them wins.
/// - `unassociated_tasks` returns ids ahead of the cursor, ascending, with no
///   category link at the time of the query.

use crate::models::task::NewTask;
use crate::models::user::NewUser;
use crate::models::Ensured;
use crate::seed::cursor::BatchCursor;
use crate::seed::error::StoreResult;
use async_trait::async_trait;

/// User records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts the user unless its email is taken
    async fn find_or_create_user(&self, user: &NewUser) -> StoreResult<Ensured>;

    /// Inserts users atomically, skipping taken emails; returns rows inserted
    async fn create_users(&self, users: &[NewUser], chunk_size: usize) -> StoreResult<u64>;

    /// Total number of users
    async fn count_users(&self) -> StoreResult<i64>;
}

/// Category records
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Inserts the category unless its name is taken
    async fn find_or_create_category(&self, name: &str) -> StoreResult<Ensured>;

    /// Every category id, ascending
    async fn list_category_ids(&self) -> StoreResult<Vec<i64>>;
}

/// Task records and task-category links
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Whether any task exists
    async fn any_tasks(&self) -> StoreResult<bool>;

    /// Inserts tasks atomically; returns rows inserted
    async fn create_tasks(&self, tasks: &[NewTask], chunk_size: usize) -> StoreResult<u64>;

    /// Up to `limit` ids of link-free tasks ahead of `cursor`, ascending
    async fn unassociated_tasks(&self, cursor: BatchCursor, limit: usize) -> StoreResult<Vec<i64>>;

    /// Links the categories if the task has no link yet; returns links created
    async fn attach_missing(&self, task_id: i64, category_ids: &[i64]) -> StoreResult<u64>;
}
