/// Fixture seeding
///
/// Populates an empty (or partially populated) store with baseline data and
/// backfills task categories. Safe to run any number of times.
///
/// # Modules
///
/// - `config`: `SeedConfig` and its validation
/// - `store`: the `UserStore`, `CategoryStore` and `TaskStore` seams
/// - `postgres` / `memory`: store implementations
/// - `categories`, `users`, `tasks`: idempotent ensurers
/// - `associations`: batched category backfill
/// - `selection`, `random`, `cursor`: the pieces the backfill is built from
/// - `fixtures`: placeholder record generation
/// - `seeder`: runs the steps in order and reports what changed

pub mod associations;
pub mod categories;
pub mod config;
pub mod cursor;
pub mod error;
pub mod fixtures;
pub mod memory;
pub mod postgres;
pub mod random;
pub mod seeder;
pub mod selection;
pub mod store;
pub mod tasks;
pub mod users;

pub use config::SeedConfig;
pub use cursor::BatchCursor;
pub use error::{SeedError, StoreError, StoreResult};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use random::{RandomSource, RngSource};
pub use seeder::{SeedReport, Seeder};
