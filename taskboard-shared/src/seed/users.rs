/// User ensurer
///
/// Makes sure the designated test account exists. On a first run (exactly
/// one user after that step) it also creates the supplementary accounts. The
/// check is on the population, not on whether the test user was just
/// created, so re-runs never multiply the supplementary users.

use crate::models::user::NewUser;
use crate::models::Ensured;
use crate::seed::error::StoreResult;
use crate::seed::fixtures::placeholder_user;
use crate::seed::random::RandomSource;
use crate::seed::store::UserStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

/// Identity of the designated test account
#[derive(Debug, Clone)]
pub struct TestAccount<'a> {
    pub email: &'a str,
    pub name: &'a str,
    /// Already-hashed credential
    pub password_hash: &'a str,
}

/// What the user ensurer did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserOutcome {
    pub test_user: Ensured,
    pub supplementary_created: u64,
}

/// Ensures the test account, then the supplementary accounts on a first run
///
/// Supplementary accounts share the test account's hashed credential. They
/// are inserted in one all-or-nothing bulk create, `chunk_size` rows per
/// statement, so a failure leaves the population at one and the next run
/// creates them all.
pub async fn ensure_users<S, R>(
    store: &S,
    account: &TestAccount<'_>,
    supplementary: usize,
    chunk_size: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> StoreResult<UserOutcome>
where
    S: UserStore + ?Sized,
    R: RandomSource + ?Sized,
{
    let test_user = store
        .find_or_create_user(&NewUser {
            name: account.name.to_string(),
            email: account.email.to_string(),
            password_hash: account.password_hash.to_string(),
            email_verified_at: Some(now),
        })
        .await?;
    debug!(
        email = %account.email,
        id = test_user.id(),
        created = test_user.was_created(),
        "Test user resolved"
    );

    let population = store.count_users().await?;
    if population != 1 {
        info!(population, "Users already seeded, skipping supplementary users");
        return Ok(UserOutcome {
            test_user,
            supplementary_created: 0,
        });
    }

    let users: Vec<NewUser> = (0..supplementary)
        .map(|i| placeholder_user(&mut *rng, i, account.password_hash, now))
        .collect();
    let supplementary_created = if users.is_empty() {
        0
    } else {
        store.create_users(&users, chunk_size.max(1)).await?
    };

    info!(supplementary_created, "Users ensured");
    Ok(UserOutcome {
        test_user,
        supplementary_created,
    })
}
