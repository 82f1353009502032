/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     email_verified_at TIMESTAMPTZ,
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::user::{NewUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let outcome = User::find_or_create(&pool, &NewUser {
///     name: "Test User".to_string(),
///     email: "test@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     email_verified_at: None,
/// }).await?;
///
/// println!("user id {}", outcome.id());
/// # Ok(())
/// # }
/// ```

use crate::models::Ensured;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

/// Rows per multi-row INSERT (4 binds each, well under the 65535 bind limit)
const INSERT_CHUNK: usize = 1000;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Primary key
    pub id: i64,

    /// Display name
    pub name: String,

    /// Email address, unique across all users
    pub email: String,

    /// When the address was verified (None if never)
    pub email_verified_at: Option<DateTime<Utc>>,

    /// Argon2id PHC hash, never plaintext
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub email_verified_at: Option<DateTime<Utc>>,
}

impl User {
    /// Inserts the user unless one with the same email exists
    ///
    /// An existing row is returned untouched. Two concurrent callers racing on
    /// the same email both resolve to the single stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable.
    pub async fn find_or_create(pool: &PgPool, data: &NewUser) -> Result<Ensured, sqlx::Error> {
        let inserted: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, email, email_verified_at, password_hash)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.email_verified_at)
        .bind(&data.password_hash)
        .fetch_optional(pool)
        .await?;

        if let Some(id) = inserted {
            return Ok(Ensured::Created(id));
        }

        let id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
            .bind(&data.email)
            .fetch_one(pool)
            .await?;

        Ok(Ensured::Existing(id))
    }

    /// Inserts many users in one transaction, skipping emails that already exist
    ///
    /// Rows go out as multi-row INSERTs of at most `chunk_size` rows (capped
    /// at 1000). A failure rolls back every chunk. Returns the number of rows
    /// actually inserted.
    pub async fn create_many(
        pool: &PgPool,
        users: &[NewUser],
        chunk_size: usize,
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut inserted = 0;

        for chunk in users.chunks(chunk_size.clamp(1, INSERT_CHUNK)) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO users (name, email, email_verified_at, password_hash) ",
            );
            builder.push_values(chunk, |mut row, user| {
                row.push_bind(&user.name)
                    .push_bind(&user.email)
                    .push_bind(user.email_verified_at)
                    .push_bind(&user.password_hash);
            });
            builder.push(" ON CONFLICT (email) DO NOTHING");

            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Finds a user by email address
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, email_verified_at, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Counts all users
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
