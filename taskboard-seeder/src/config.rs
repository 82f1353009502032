/// Seeder configuration
///
/// Loads the seeding settings and the database settings from the environment.
/// The binary loads a `.env` file, if present, before reading them.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
/// - `SEED_TEST_USER_EMAIL`: Test account email (default: test@example.com)
/// - `SEED_TEST_USER_NAME`: Test account name (default: Test User)
/// - `SEED_TEST_USER_PASSWORD`: Test account password (default: password)
/// - `SEED_SUPPLEMENTARY_USERS`: Users added on the first run (default: 10)
/// - `SEED_TASK_COUNT`: Tasks created into an empty table (default: 100)
/// - `SEED_CATEGORIES`: Comma-separated names (default: Work,Personal,Shopping,Others)
/// - `SEED_BATCH_SIZE`: Tasks per batch (default: 50)
/// - `SEED_MAX_CATEGORIES_PER_TASK`: Upper bound of the per-task draw (default: 3)
/// - `SEED_RNG_SEED`: Fixed seed for reproducible data (default: OS entropy)
/// - `LOG_FORMAT`: `json` for JSON log lines (default: plain text)
///
/// # Example
///
/// ```no_run
/// use taskboard_seeder::config::SeederConfig;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = SeederConfig::from_env()?;
/// println!("Seeding {} tasks", config.seed.task_count);
/// # Ok(())
/// # }
/// ```

use config::{Config, ConfigError, Environment, Map};
use std::env;
use taskboard_shared::db::pool::DatabaseConfig;
use taskboard_shared::seed::SeedConfig;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Reads `LOG_FORMAT`; anything other than `json` means plain text
    pub fn from_env() -> Self {
        match env::var("LOG_FORMAT") {
            Ok(value) if value.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Complete seeder configuration
#[derive(Debug, Clone)]
pub struct SeederConfig {
    /// Seeding settings
    pub seed: SeedConfig,

    /// Connection pool settings
    pub database: DatabaseConfig,
}

impl SeederConfig {
    /// Loads configuration from environment variables
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a variable has an
    /// unparseable value. Range checks happen later, when the seeder is built.
    pub fn from_env() -> anyhow::Result<Self> {
        let seed = load_seed_config(None)?;
        let database = DatabaseConfig::from_env()?;

        Ok(Self { seed, database })
    }
}

/// Reads `SEED_*` variables into a `SeedConfig`
///
/// `source` replaces the process environment when given. Unset variables
/// keep their `SeedConfig::default()` value.
pub fn load_seed_config(source: Option<Map<String, String>>) -> Result<SeedConfig, ConfigError> {
    Config::builder()
        .add_source(
            Environment::with_prefix("SEED")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("categories")
                .source(source),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_map(vars: &[(&str, &str)]) -> Map<String, String> {
        vars.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = load_seed_config(Some(Map::new())).unwrap();

        assert_eq!(config.test_user_email, "test@example.com");
        assert_eq!(config.task_count, 100);
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.categories, vec!["Work", "Personal", "Shopping", "Others"]);
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn test_overrides_from_variables() {
        let config = load_seed_config(Some(env_map(&[
            ("SEED_TASK_COUNT", "250"),
            ("SEED_SUPPLEMENTARY_USERS", "0"),
            ("SEED_TEST_USER_EMAIL", "qa@example.com"),
            ("SEED_CATEGORIES", "Home,Garden"),
            ("SEED_RNG_SEED", "7"),
        ])))
        .unwrap();

        assert_eq!(config.task_count, 250);
        assert_eq!(config.supplementary_users, 0);
        assert_eq!(config.test_user_email, "qa@example.com");
        assert_eq!(config.categories, vec!["Home", "Garden"]);
        assert_eq!(config.rng_seed, Some(7));
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_negative_count_fails_validation() {
        let config = load_seed_config(Some(env_map(&[("SEED_TASK_COUNT", "-5")]))).unwrap();
        assert!(config.check().is_err());
    }

    #[test]
    fn test_unparseable_count_is_an_error() {
        let result = load_seed_config(Some(env_map(&[("SEED_BATCH_SIZE", "many")])));
        assert!(result.is_err());
    }

    #[test]
    fn test_log_format_default_is_text() {
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }
}
