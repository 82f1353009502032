/// PostgreSQL-backed seeding store
///
/// Thin adapter from the store traits to the model queries. Uniqueness races
/// are settled in SQL (`ON CONFLICT DO NOTHING`, a row lock for attaching), so
/// two seeders running against one database never create duplicate users,
/// categories or links. Bulk creates run in a single transaction.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::seed::postgres::PgStore;
/// use taskboard_shared::seed::store::CategoryStore;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let store = PgStore::new(pool);
/// let ids = store.list_category_ids().await?;
/// println!("{} categories", ids.len());
/// # Ok(())
/// # }
/// ```

use crate::models::category::Category;
use crate::models::task::{NewTask, Task};
use crate::models::user::{NewUser, User};
use crate::models::Ensured;
use crate::seed::cursor::BatchCursor;
use crate::seed::error::StoreResult;
use crate::seed::store::{CategoryStore, TaskStore, UserStore};
use async_trait::async_trait;
use sqlx::PgPool;

/// Seeding store over a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_or_create_user(&self, user: &NewUser) -> StoreResult<Ensured> {
        Ok(User::find_or_create(&self.pool, user).await?)
    }

    async fn create_users(&self, users: &[NewUser], chunk_size: usize) -> StoreResult<u64> {
        Ok(User::create_many(&self.pool, users, chunk_size).await?)
    }

    async fn count_users(&self) -> StoreResult<i64> {
        Ok(User::count(&self.pool).await?)
    }
}

#[async_trait]
impl CategoryStore for PgStore {
    async fn find_or_create_category(&self, name: &str) -> StoreResult<Ensured> {
        Ok(Category::find_or_create(&self.pool, name).await?)
    }

    async fn list_category_ids(&self) -> StoreResult<Vec<i64>> {
        Ok(Category::list_ids(&self.pool).await?)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn any_tasks(&self) -> StoreResult<bool> {
        Ok(Task::exists_any(&self.pool).await?)
    }

    async fn create_tasks(&self, tasks: &[NewTask], chunk_size: usize) -> StoreResult<u64> {
        Ok(Task::create_many(&self.pool, tasks, chunk_size).await?)
    }

    async fn unassociated_tasks(&self, cursor: BatchCursor, limit: usize) -> StoreResult<Vec<i64>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        Ok(Task::unassociated_after(&self.pool, cursor.after_id(), limit).await?)
    }

    async fn attach_missing(&self, task_id: i64, category_ids: &[i64]) -> StoreResult<u64> {
        Ok(Task::attach_if_unlinked(&self.pool, task_id, category_ids).await?)
    }
}
