/// Task model and database operations
///
/// Tasks link to categories through the `task_categories` join table. The
/// composite primary key makes every link unique. Categories are attached
/// once per task: a task that already has links is left as it is.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     is_completed BOOLEAN NOT NULL DEFAULT FALSE,
///     due_date DATE,
///     media VARCHAR(512),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE task_categories (
///     task_id BIGINT NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     category_id BIGINT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (task_id, category_id)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::{NewTask, Task};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, work_id: i64) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, &NewTask {
///     name: "Buy groceries".to_string(),
///     is_completed: false,
///     due_date: None,
///     media: None,
/// }).await?;
///
/// Task::attach_if_unlinked(&pool, task.id, &[work_id]).await?;
/// assert_eq!(Task::category_ids(&pool, task.id).await?, vec![work_id]);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

/// Rows per multi-row INSERT
const INSERT_CHUNK: usize = 1000;

/// A unit of work
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,

    pub name: String,

    /// Whether the task is done
    pub is_completed: bool,

    /// Optional due date (calendar day, no time zone)
    pub due_date: Option<NaiveDate>,

    /// Opaque reference to uploaded media, if any
    pub media: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub name: String,
    pub is_completed: bool,
    pub due_date: Option<NaiveDate>,
    pub media: Option<String>,
}

impl Task {
    /// Inserts a single task
    pub async fn create(pool: &PgPool, data: &NewTask) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (name, is_completed, due_date, media)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, is_completed, due_date, media, created_at, updated_at
            "#,
        )
        .bind(&data.name)
        .bind(data.is_completed)
        .bind(data.due_date)
        .bind(&data.media)
        .fetch_one(pool)
        .await
    }

    /// Inserts many tasks in one transaction
    ///
    /// Rows go out as multi-row INSERTs of at most `chunk_size` rows (capped
    /// at 1000). Either every row is inserted or none is. Returns the number
    /// of rows inserted.
    pub async fn create_many(
        pool: &PgPool,
        tasks: &[NewTask],
        chunk_size: usize,
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut inserted = 0;

        for chunk in tasks.chunks(chunk_size.clamp(1, INSERT_CHUNK)) {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO tasks (name, is_completed, due_date, media) ");
            builder.push_values(chunk, |mut row, task| {
                row.push_bind(&task.name)
                    .push_bind(task.is_completed)
                    .push_bind(task.due_date)
                    .push_bind(&task.media);
            });

            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Finds a task by id
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, is_completed, due_date, media, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Whether at least one task exists
    pub async fn exists_any(pool: &PgPool) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tasks)")
            .fetch_one(pool)
            .await
    }

    /// Counts all tasks
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await
    }

    /// Marks a task completed or pending
    ///
    /// Returns false if the task does not exist.
    pub async fn set_completed(
        pool: &PgPool,
        id: i64,
        completed: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET is_completed = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(completed)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Ids of tasks with no category link and an id greater than `after_id`
    ///
    /// Ordered by id and capped at `limit`. `None` starts from the first task;
    /// passing the last id of the previous page moves forward without
    /// rescanning.
    pub async fn unassociated_after(
        pool: &PgPool,
        after_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<i64>, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT t.id
            FROM tasks t
            WHERE ($1::BIGINT IS NULL OR t.id > $1)
              AND NOT EXISTS (
                  SELECT 1 FROM task_categories tc WHERE tc.task_id = t.id
              )
            ORDER BY t.id
            LIMIT $2
            "#,
        )
        .bind(after_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Links categories to a task that has no category link yet
    ///
    /// The task row is locked for the duration of the insert, so of two
    /// callers racing on the same task only the first one links anything;
    /// the other sees the committed links and inserts nothing. Returns the
    /// number of new link rows.
    pub async fn attach_if_unlinked(
        pool: &PgPool,
        task_id: i64,
        category_ids: &[i64],
    ) -> Result<u64, sqlx::Error> {
        if category_ids.is_empty() {
            return Ok(0);
        }

        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM tasks WHERE id = $1 FOR UPDATE")
            .bind(task_id)
            .fetch_optional(&mut *tx)
            .await?;

        let result = sqlx::query(
            r#"
            INSERT INTO task_categories (task_id, category_id)
            SELECT $1, category_id FROM UNNEST($2::BIGINT[]) AS category_id
            WHERE NOT EXISTS (
                SELECT 1 FROM task_categories WHERE task_id = $1
            )
            ON CONFLICT (task_id, category_id) DO NOTHING
            "#,
        )
        .bind(task_id)
        .bind(category_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    /// Category ids linked to a task, ordered by id
    pub async fn category_ids(pool: &PgPool, task_id: i64) -> Result<Vec<i64>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT category_id FROM task_categories WHERE task_id = $1 ORDER BY category_id",
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }
}
