/// Category model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE categories (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use crate::models::Ensured;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A task category label
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,

    /// Display name, unique across categories
    pub name: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Inserts the category unless one with the same name exists
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable.
    pub async fn find_or_create(pool: &PgPool, name: &str) -> Result<Ensured, sqlx::Error> {
        let inserted: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await?;

        match inserted {
            Some(id) => Ok(Ensured::Created(id)),
            None => {
                let id: i64 = sqlx::query_scalar("SELECT id FROM categories WHERE name = $1")
                    .bind(name)
                    .fetch_one(pool)
                    .await?;
                Ok(Ensured::Existing(id))
            }
        }
    }

    /// Finds a category by its exact name
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    /// Lists all categories ordered by id
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    /// Lists all category ids ordered by id
    pub async fn list_ids(pool: &PgPool) -> Result<Vec<i64>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM categories ORDER BY id")
            .fetch_all(pool)
            .await
    }
}
