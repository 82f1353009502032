/// Error types for fixture seeding
///
/// A store error aborts the run at once. Nothing is retried: every step is
/// idempotent, so the remedy is to run the seeder again.

use crate::auth::password::PasswordError;

/// Failure reported by a backing store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store cannot be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Query failed in the database
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a seeding run
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Configuration rejected before any store call
    #[error("Invalid seed configuration: {0}")]
    InvalidConfig(String),

    /// A store call failed; batches finished before it stay committed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The placeholder credential could not be hashed
    #[error("Failed to hash placeholder credential: {0}")]
    Credential(#[from] PasswordError),
}
