/// In-process seeding store
///
/// Keeps users, categories, tasks and links in ordered maps behind a mutex,
/// with the same uniqueness rules as the database schema. Ids are assigned
/// sequentially from 1, mirroring `BIGSERIAL`.
///
/// The store can be told to fail: after a write budget is spent, or on
/// demand, every call returns `StoreError::Unavailable`. A bulk insert is
/// charged one write per chunk and is all-or-nothing. This makes abort and
/// resume behavior testable without a database.
///
/// # Example
///
/// ```
/// use taskboard_shared::seed::memory::MemoryStore;
/// use taskboard_shared::seed::store::CategoryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let first = store.find_or_create_category("Work").await?;
/// let again = store.find_or_create_category("Work").await?;
/// assert_eq!(first.id(), again.id());
/// assert!(!again.was_created());
/// # Ok(())
/// # }
/// ```

use crate::models::task::NewTask;
use crate::models::user::NewUser;
use crate::models::Ensured;
use crate::seed::cursor::BatchCursor;
use crate::seed::error::{StoreError, StoreResult};
use crate::seed::store::{CategoryStore, TaskStore, UserStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::Mutex;

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub password_hash: String,
}

/// Copy of the store contents at one point in time
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    pub users: Vec<MemoryUser>,
    pub categories: BTreeMap<i64, String>,
    pub tasks: BTreeMap<i64, NewTask>,
    /// `(task_id, category_id)` pairs
    pub links: BTreeSet<(i64, i64)>,
}

impl MemorySnapshot {
    /// Category ids linked to a task
    pub fn categories_of(&self, task_id: i64) -> BTreeSet<i64> {
        links_of(&self.links, task_id).collect()
    }

    pub fn user_by_email(&self, email: &str) -> Option<&MemoryUser> {
        self.users.iter().find(|user| user.email == email)
    }

    pub fn category_id(&self, name: &str) -> Option<i64> {
        self.categories
            .iter()
            .find(|(_, stored)| stored.as_str() == name)
            .map(|(id, _)| *id)
    }
}

fn links_of(links: &BTreeSet<(i64, i64)>, task_id: i64) -> impl Iterator<Item = i64> + '_ {
    links
        .range((task_id, i64::MIN)..=(task_id, i64::MAX))
        .map(|(_, category_id)| *category_id)
}

#[derive(Debug, Default)]
struct MemoryState {
    data: MemorySnapshot,
    last_user_id: i64,
    last_category_id: i64,
    last_task_id: i64,
    writes: usize,
    write_budget: Option<usize>,
    unavailable: bool,
}

impl MemoryState {
    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }

    /// Counts a mutating call against the write budget
    fn begin_write(&mut self) -> StoreResult<()> {
        self.check_available()?;

        if let Some(budget) = self.write_budget {
            if self.writes >= budget {
                self.unavailable = true;
                return Err(StoreError::Unavailable(format!(
                    "memory store went offline after {} writes",
                    budget
                )));
            }
        }

        self.writes += 1;
        Ok(())
    }

    /// Counts one write per chunk of a bulk insert
    ///
    /// Every chunk is charged before any row is applied, so a bulk insert
    /// that runs out of budget part way stores nothing, like a rolled back
    /// transaction.
    fn begin_bulk_write(&mut self, rows: usize, chunk_size: usize) -> StoreResult<()> {
        self.check_available()?;
        for _ in 0..rows.div_ceil(chunk_size.max(1)) {
            self.begin_write()?;
        }
        Ok(())
    }

    fn insert_task(&mut self, task: NewTask) -> i64 {
        self.last_task_id += 1;
        self.data.tasks.insert(self.last_task_id, task);
        self.last_task_id
    }
}

/// Mutex-guarded in-memory implementation of all three store traits
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that accepts `budget` mutating calls, then goes offline
    pub fn failing_after_writes(budget: usize) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                write_budget: Some(budget),
                ..Default::default()
            }),
        }
    }

    /// Takes the store offline or brings it back
    ///
    /// Bringing it back also clears any write budget.
    pub async fn set_unavailable(&self, unavailable: bool) {
        let mut state = self.state.lock().await;
        state.unavailable = unavailable;
        if !unavailable {
            state.write_budget = None;
        }
    }

    /// Number of mutating calls accepted so far
    pub async fn writes(&self) -> usize {
        self.state.lock().await.writes
    }

    pub async fn snapshot(&self) -> MemorySnapshot {
        self.state.lock().await.data.clone()
    }

    /// Inserts a task directly, outside the failure accounting
    pub async fn insert_task(&self, task: NewTask) -> i64 {
        self.state.lock().await.insert_task(task)
    }

    /// Links a category to a task directly; returns false if already linked
    pub async fn link(&self, task_id: i64, category_id: i64) -> bool {
        self.state.lock().await.data.links.insert((task_id, category_id))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_or_create_user(&self, user: &NewUser) -> StoreResult<Ensured> {
        let mut state = self.state.lock().await;
        state.begin_write()?;

        if let Some(existing) = state.data.user_by_email(&user.email) {
            return Ok(Ensured::Existing(existing.id));
        }

        state.last_user_id += 1;
        let id = state.last_user_id;
        state.data.users.push(MemoryUser {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            email_verified_at: user.email_verified_at,
            password_hash: user.password_hash.clone(),
        });

        Ok(Ensured::Created(id))
    }

    async fn create_users(&self, users: &[NewUser], chunk_size: usize) -> StoreResult<u64> {
        let mut state = self.state.lock().await;
        state.begin_bulk_write(users.len(), chunk_size)?;

        let mut inserted = 0;
        for user in users {
            if state.data.user_by_email(&user.email).is_some() {
                continue;
            }
            state.last_user_id += 1;
            let id = state.last_user_id;
            state.data.users.push(MemoryUser {
                id,
                name: user.name.clone(),
                email: user.email.clone(),
                email_verified_at: user.email_verified_at,
                password_hash: user.password_hash.clone(),
            });
            inserted += 1;
        }

        Ok(inserted)
    }

    async fn count_users(&self) -> StoreResult<i64> {
        let state = self.state.lock().await;
        state.check_available()?;
        Ok(state.data.users.len() as i64)
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn find_or_create_category(&self, name: &str) -> StoreResult<Ensured> {
        let mut state = self.state.lock().await;
        state.begin_write()?;

        if let Some(id) = state.data.category_id(name) {
            return Ok(Ensured::Existing(id));
        }

        state.last_category_id += 1;
        let id = state.last_category_id;
        state.data.categories.insert(id, name.to_string());
        Ok(Ensured::Created(id))
    }

    async fn list_category_ids(&self) -> StoreResult<Vec<i64>> {
        let state = self.state.lock().await;
        state.check_available()?;
        let ids = state.data.categories.keys().copied().collect();
        Ok(ids)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn any_tasks(&self) -> StoreResult<bool> {
        let state = self.state.lock().await;
        state.check_available()?;
        Ok(!state.data.tasks.is_empty())
    }

    async fn create_tasks(&self, tasks: &[NewTask], chunk_size: usize) -> StoreResult<u64> {
        let mut state = self.state.lock().await;
        state.begin_bulk_write(tasks.len(), chunk_size)?;

        for task in tasks {
            state.insert_task(task.clone());
        }
        Ok(tasks.len() as u64)
    }

    async fn unassociated_tasks(&self, cursor: BatchCursor, limit: usize) -> StoreResult<Vec<i64>> {
        let state = self.state.lock().await;
        state.check_available()?;

        let ids = state
            .data
            .tasks
            .keys()
            .copied()
            .filter(|&id| cursor.admits(id))
            .filter(|&id| links_of(&state.data.links, id).next().is_none())
            .take(limit)
            .collect();
        Ok(ids)
    }

    async fn attach_missing(&self, task_id: i64, category_ids: &[i64]) -> StoreResult<u64> {
        let mut state = self.state.lock().await;
        state.begin_write()?;

        if links_of(&state.data.links, task_id).next().is_some() {
            return Ok(0);
        }

        let mut created = 0;
        for &category_id in category_ids {
            if state.data.links.insert((task_id, category_id)) {
                created += 1;
            }
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str) -> NewTask {
        NewTask {
            name: name.to_string(),
            is_completed: false,
            due_date: None,
            media: None,
        }
    }

    fn user(email: &str) -> NewUser {
        NewUser {
            name: "Someone".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            email_verified_at: None,
        }
    }

    #[tokio::test]
    async fn test_user_email_is_unique() {
        let store = MemoryStore::new();

        let first = store.find_or_create_user(&user("a@example.com")).await.unwrap();
        let second = store.find_or_create_user(&user("a@example.com")).await.unwrap();
        assert_eq!(first, Ensured::Created(1));
        assert_eq!(second, Ensured::Existing(1));

        let inserted = store
            .create_users(&[user("a@example.com"), user("b@example.com")], 50)
            .await
            .unwrap();
        assert_eq!(inserted, 1);
        assert_eq!(store.count_users().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unassociated_tasks_respects_cursor_and_links() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store.insert_task(task(&format!("task {}", i))).await;
        }
        store.link(2, 1).await;

        let all = store.unassociated_tasks(BatchCursor::start(), 10).await.unwrap();
        assert_eq!(all, vec![1, 3, 4, 5]);

        let page = store.unassociated_tasks(BatchCursor::after(3), 1).await.unwrap();
        assert_eq!(page, vec![4]);
    }

    #[tokio::test]
    async fn test_attach_missing_only_links_unlinked_tasks() {
        let store = MemoryStore::new();
        let id = store.insert_task(task("t")).await;

        assert_eq!(store.attach_missing(id, &[1, 2]).await.unwrap(), 2);
        // a second draw for the same task loses
        assert_eq!(store.attach_missing(id, &[2, 3]).await.unwrap(), 0);
        assert_eq!(store.snapshot().await.categories_of(id), BTreeSet::from([1, 2]));
    }

    #[tokio::test]
    async fn test_racing_attachers_keep_one_draw() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let id = store.insert_task(task("t")).await;

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.attach_missing(id, &[1, 2, 3]).await }
        });
        let second = tokio::spawn({
            let store = store.clone();
            async move { store.attach_missing(id, &[4, 5, 6]).await }
        });

        let created = first.await.unwrap().unwrap() + second.await.unwrap().unwrap();
        assert_eq!(created, 3);
        assert_eq!(store.snapshot().await.categories_of(id).len(), 3);
    }

    #[tokio::test]
    async fn test_bulk_insert_is_all_or_nothing() {
        // 120 rows in chunks of 50 need three writes; only two are allowed
        let store = MemoryStore::failing_after_writes(2);
        let tasks: Vec<NewTask> = (0..120).map(|i| task(&format!("task {}", i))).collect();

        assert!(store.create_tasks(&tasks, 50).await.is_err());
        store.set_unavailable(false).await;
        assert!(store.snapshot().await.tasks.is_empty());

        let users: Vec<NewUser> = (0..3).map(|i| user(&format!("u{}@example.com", i))).collect();
        let store = MemoryStore::failing_after_writes(1);
        assert!(store.create_users(&users, 2).await.is_err());
        store.set_unavailable(false).await;
        assert_eq!(store.count_users().await.unwrap(), 0);

        assert_eq!(store.create_users(&users, 2).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_write_budget_takes_store_offline() {
        let store = MemoryStore::failing_after_writes(1);

        assert!(store.find_or_create_category("Work").await.is_ok());
        assert!(matches!(
            store.find_or_create_category("Home").await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.list_category_ids().await.is_err());

        store.set_unavailable(false).await;
        assert_eq!(store.list_category_ids().await.unwrap(), vec![1]);
        assert_eq!(store.writes().await, 1);
    }
}
