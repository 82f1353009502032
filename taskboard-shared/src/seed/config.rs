/// Seeding configuration
///
/// Counts are signed so that a negative value coming from the environment is
/// reported by validation instead of failing somewhere inside a conversion.
/// `Seeder::new` validates before touching any store.

use crate::seed::error::SeedError;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Default canonical category names
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Work", "Personal", "Shopping", "Others"];

/// Tasks fetched and processed per batch
pub const DEFAULT_BATCH_SIZE: i64 = 50;

/// Upper bound of the per-task category draw
pub const DEFAULT_MAX_CATEGORIES_PER_TASK: i64 = 3;

/// Settings for a seeding run
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SeedConfig {
    /// Email of the designated test account
    #[validate(email(message = "Test user email must be a valid address"))]
    pub test_user_email: String,

    /// Display name of the test account
    #[validate(length(min = 1, max = 255, message = "Test user name must be 1-255 characters"))]
    pub test_user_name: String,

    /// Plaintext placeholder password, hashed before storage
    #[serde(skip_serializing)]
    #[validate(length(min = 1, message = "Test user password must not be empty"))]
    pub test_user_password: String,

    /// Extra users created on the first run only
    #[validate(range(
        min = 0,
        max = 100000,
        message = "Supplementary users must be between 0 and 100000"
    ))]
    pub supplementary_users: i64,

    /// Tasks created when the task table is empty
    #[validate(range(min = 0, max = 1000000, message = "Task count must be between 0 and 1000000"))]
    pub task_count: i64,

    /// Canonical category names, in order
    #[validate(custom(function = "validate_category_names"))]
    pub categories: Vec<String>,

    /// Tasks per batch for creation and association
    #[validate(range(min = 1, max = 10000, message = "Batch size must be between 1 and 10000"))]
    pub batch_size: i64,

    /// Upper bound of the per-task category draw
    #[validate(range(
        min = 1,
        max = 100,
        message = "Max categories per task must be between 1 and 100"
    ))]
    pub max_categories_per_task: i64,

    /// Fixed RNG seed for reproducible runs (None = OS entropy)
    pub rng_seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            test_user_email: "test@example.com".to_string(),
            test_user_name: "Test User".to_string(),
            test_user_password: "password".to_string(),
            supplementary_users: 10,
            task_count: 100,
            categories: DEFAULT_CATEGORIES.iter().map(|name| name.to_string()).collect(),
            batch_size: DEFAULT_BATCH_SIZE,
            max_categories_per_task: DEFAULT_MAX_CATEGORIES_PER_TASK,
            rng_seed: None,
        }
    }
}

impl SeedConfig {
    /// Runs field validation, mapping failures to `SeedError::InvalidConfig`
    pub fn check(&self) -> Result<(), SeedError> {
        self.validate()
            .map_err(|e| SeedError::InvalidConfig(e.to_string()))
    }
}

fn validate_category_names(names: &Vec<String>) -> Result<(), ValidationError> {
    if names.iter().any(|name| name.trim().is_empty()) {
        let mut err = ValidationError::new("blank_category");
        err.message = Some("Category names must not be blank".into());
        return Err(err);
    }

    if names.iter().any(|name| name.chars().count() > 255) {
        let mut err = ValidationError::new("category_too_long");
        err.message = Some("Category names must be at most 255 characters".into());
        return Err(err);
    }

    Ok(())
}

/// Converts a validated, non-negative count
pub(crate) fn to_count(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}
