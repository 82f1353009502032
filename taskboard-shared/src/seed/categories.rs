/// Category ensurer
///
/// Resolves canonical category names to ids, creating the missing ones.

use crate::seed::error::StoreResult;
use crate::seed::store::CategoryStore;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// Ids resolved for the canonical names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryResolution {
    /// One id per distinct name, in name order
    pub ids: Vec<i64>,

    /// How many of them were created by this call
    pub created: usize,
}

/// Find-or-creates one category per distinct name
///
/// Repeated names in `names` resolve once. Existing categories are left as
/// they are, so calling this again with the same names creates nothing.
pub async fn ensure_categories<S>(store: &S, names: &[String]) -> StoreResult<CategoryResolution>
where
    S: CategoryStore + ?Sized,
{
    let mut seen = HashSet::new();
    let mut resolution = CategoryResolution::default();

    for name in names {
        if !seen.insert(name.as_str()) {
            continue;
        }

        let outcome = store.find_or_create_category(name).await?;
        debug!(
            category = %name,
            id = outcome.id(),
            created = outcome.was_created(),
            "Category resolved"
        );

        if outcome.was_created() {
            resolution.created += 1;
        }
        resolution.ids.push(outcome.id());
    }

    info!(
        resolved = resolution.ids.len(),
        created = resolution.created,
        "Categories ensured"
    );
    Ok(resolution)
}
