/// Database models for Taskboard
///
/// # Models
///
/// - `user`: User accounts
/// - `category`: Task categories, unique by name
/// - `task`: Tasks and their many-to-many links to categories
///
/// All primary keys are `BIGSERIAL`, so ordering by id follows insertion
/// order. The association assigner relies on this to page through tasks.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::category::Category;
/// use taskboard_shared::models::Ensured;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// match Category::find_or_create(&pool, "Work").await? {
///     Ensured::Created(id) => println!("created category {}", id),
///     Ensured::Existing(id) => println!("category {} already present", id),
/// }
/// # Ok(())
/// # }
/// ```

pub mod category;
pub mod task;
pub mod user;

use serde::{Deserialize, Serialize};

/// Outcome of a find-or-create keyed by a natural key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "id", rename_all = "lowercase")]
pub enum Ensured {
    /// A new row was inserted
    Created(i64),

    /// A row with the same natural key already existed
    Existing(i64),
}

impl Ensured {
    /// Primary key of the resolved row
    pub fn id(&self) -> i64 {
        match self {
            Ensured::Created(id) | Ensured::Existing(id) => *id,
        }
    }

    /// Whether this call inserted the row
    pub fn was_created(&self) -> bool {
        matches!(self, Ensured::Created(_))
    }
}
