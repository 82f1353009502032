/// Integration tests for the full seeding procedure
///
/// Runs `Seeder` end to end against the in-process store. No database needed.
/// Run with: cargo test --test seed_tests

use chrono::{TimeZone, Utc};
use std::collections::BTreeSet;
use taskboard_shared::auth::password::verify_password;
use taskboard_shared::models::task::NewTask;
use taskboard_shared::models::Ensured;
use taskboard_shared::seed::associations::AssociationAssigner;
use taskboard_shared::seed::memory::MemorySnapshot;
use taskboard_shared::seed::store::CategoryStore;
use taskboard_shared::seed::{MemoryStore, RngSource, SeedConfig, SeedError, Seeder};

fn seeder(store: MemoryStore) -> Seeder<MemoryStore> {
    Seeder::new(store, SeedConfig::default()).expect("default config is valid")
}

fn assert_links_bounded(snapshot: &MemorySnapshot, max: usize) {
    for task_id in snapshot.tasks.keys() {
        let linked = snapshot.categories_of(*task_id);
        assert!(
            (1..=max).contains(&linked.len()),
            "task {} has {} categories",
            task_id,
            linked.len()
        );
    }
}

#[tokio::test]
async fn test_first_run_seeds_everything() {
    let seeder = seeder(MemoryStore::new());
    let mut rng = RngSource::seeded(2024);

    let report = seeder.run(&mut rng).await.expect("seeding failed");

    assert_eq!(report.categories_created, 4);
    assert_eq!(report.test_user, Ensured::Created(1));
    assert_eq!(report.supplementary_users_created, 10);
    assert_eq!(report.tasks_created, 100);
    assert_eq!(report.tasks_associated, 100);

    let snapshot = seeder.store().snapshot().await;
    assert_eq!(snapshot.categories.len(), 4);
    assert_eq!(snapshot.users.len(), 11);
    assert_eq!(snapshot.tasks.len(), 100);
    assert_links_bounded(&snapshot, 3);
    assert_eq!(report.associations_created as usize, snapshot.links.len());
}

#[tokio::test]
async fn test_second_run_changes_nothing() {
    let seeder = seeder(MemoryStore::new());
    let mut rng = RngSource::seeded(7);

    seeder.run(&mut rng).await.expect("first run failed");
    let before = seeder.store().snapshot().await;

    let report = seeder.run(&mut rng).await.expect("second run failed");
    let after = seeder.store().snapshot().await;

    assert_eq!(report.categories_created, 0);
    assert_eq!(report.test_user, Ensured::Existing(1));
    assert_eq!(report.supplementary_users_created, 0);
    assert_eq!(report.tasks_created, 0);
    assert_eq!(report.associations_created, 0);

    assert_eq!(before.users, after.users);
    assert_eq!(before.categories, after.categories);
    assert_eq!(before.tasks, after.tasks);
    assert_eq!(before.links, after.links);
}

#[tokio::test]
async fn test_test_user_credential_verifies() {
    let seeder = seeder(MemoryStore::new());
    let mut rng = RngSource::seeded(3);
    seeder.run(&mut rng).await.expect("seeding failed");

    let snapshot = seeder.store().snapshot().await;
    let user = snapshot.user_by_email("test@example.com").expect("test user missing");
    assert_eq!(user.name, "Test User");
    assert!(user.email_verified_at.is_some());
    assert!(verify_password("password", &user.password_hash).expect("hash unreadable"));
}

#[tokio::test]
async fn test_emails_and_category_names_unique() {
    let seeder = seeder(MemoryStore::new());
    let mut rng = RngSource::seeded(11);
    seeder.run(&mut rng).await.expect("seeding failed");
    seeder.run(&mut rng).await.expect("re-run failed");

    let snapshot = seeder.store().snapshot().await;
    let emails: BTreeSet<&str> = snapshot.users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails.len(), snapshot.users.len());

    let names: BTreeSet<&str> = snapshot.categories.values().map(String::as_str).collect();
    assert_eq!(names.len(), snapshot.categories.len());
}

#[tokio::test]
async fn test_due_dates_within_window() {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
    let seeder = seeder(MemoryStore::new());
    let mut rng = RngSource::seeded(99);

    seeder.run_at(now, &mut rng).await.expect("seeding failed");

    let today = now.date_naive();
    let snapshot = seeder.store().snapshot().await;
    for task in snapshot.tasks.values() {
        let due = task.due_date.expect("seeded tasks carry a due date");
        let offset = (due - today).num_days();
        assert!((-30..=30).contains(&offset), "offset {} out of window", offset);
        assert!(task.media.is_none());
    }
}

#[tokio::test]
async fn test_empty_category_set_writes_no_links() {
    let config = SeedConfig {
        categories: Vec::new(),
        ..Default::default()
    };
    let seeder = Seeder::new(MemoryStore::new(), config).expect("config is valid");
    let mut rng = RngSource::seeded(5);

    let report = seeder.run(&mut rng).await.expect("seeding failed");

    assert_eq!(report.tasks_created, 100);
    assert_eq!(report.associations_created, 0);
    assert_eq!(report.association_batches, 0);
    assert!(seeder.store().snapshot().await.links.is_empty());
}

#[tokio::test]
async fn test_assigner_rerun_creates_no_rows() {
    let store = MemoryStore::new();
    let mut category_ids = Vec::new();
    for name in ["Work", "Personal", "Shopping", "Others"] {
        category_ids.push(store.find_or_create_category(name).await.unwrap().id());
    }
    for i in 0..100 {
        store
            .insert_task(NewTask {
                name: format!("Task {}", i),
                is_completed: false,
                due_date: None,
                media: None,
            })
            .await;
    }

    let assigner = AssociationAssigner::new(&store, &category_ids);
    let mut rng = RngSource::seeded(8);

    let first = assigner.assign_all(&mut rng).await.unwrap();
    assert_eq!(first.tasks_associated, 100);
    let links = store.snapshot().await.links;

    let second = assigner.assign_all(&mut rng).await.unwrap();
    assert_eq!(second.links_created, 0);
    assert_eq!(store.snapshot().await.links, links);
}

#[tokio::test]
async fn test_preexisting_links_are_preserved() {
    let store = MemoryStore::new();
    let work = store.find_or_create_category("Work").await.unwrap().id();
    let linked = store
        .insert_task(NewTask {
            name: "Already filed".to_string(),
            is_completed: true,
            due_date: None,
            media: None,
        })
        .await;
    store.link(linked, work).await;

    let seeder = seeder(store);
    let mut rng = RngSource::seeded(13);
    let report = seeder.run(&mut rng).await.expect("seeding failed");

    // the table was not empty, so no placeholder tasks
    assert_eq!(report.tasks_created, 0);
    assert_eq!(report.associations_created, 0);
    assert_eq!(
        seeder.store().snapshot().await.categories_of(linked),
        BTreeSet::from([work])
    );
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let config = SeedConfig {
        task_count: -1,
        ..Default::default()
    };
    let result = Seeder::new(MemoryStore::new(), config);
    assert!(matches!(result, Err(SeedError::InvalidConfig(_))));

    let config = SeedConfig {
        test_user_email: "not-an-email".to_string(),
        ..Default::default()
    };
    assert!(Seeder::new(MemoryStore::new(), config).is_err());
}

#[tokio::test]
async fn test_interrupted_run_resumes() {
    // Enough budget for categories, users and tasks, but not every link
    let seeder = seeder(MemoryStore::failing_after_writes(30));
    let mut rng = RngSource::seeded(17);

    let err = seeder.run(&mut rng).await.expect_err("store should fail mid-run");
    assert!(matches!(err, SeedError::Store(_)));

    seeder.store().set_unavailable(false).await;
    seeder.run(&mut rng).await.expect("resumed run failed");

    let snapshot = seeder.store().snapshot().await;
    assert_eq!(snapshot.users.len(), 11);
    assert_eq!(snapshot.tasks.len(), 100);
    assert_links_bounded(&snapshot, 3);
}

#[tokio::test]
async fn test_failure_inside_task_creation_resumes() {
    // 4 categories + test user + 1 user chunk + first task chunk, then offline
    let seeder = seeder(MemoryStore::failing_after_writes(7));
    let mut rng = RngSource::seeded(19);

    seeder.run(&mut rng).await.expect_err("store should fail while creating tasks");
    assert!(seeder.store().snapshot().await.tasks.is_empty());

    seeder.store().set_unavailable(false).await;
    let report = seeder.run(&mut rng).await.expect("resumed run failed");
    assert_eq!(report.tasks_created, 100);
    seeder.run(&mut rng).await.expect("third run failed");

    let snapshot = seeder.store().snapshot().await;
    assert_eq!(snapshot.tasks.len(), 100);
    assert_links_bounded(&snapshot, 3);
}

#[tokio::test]
async fn test_failure_inside_supplementary_users_resumes() {
    // 4 categories + test user + first user chunk, then offline
    let config = SeedConfig {
        supplementary_users: 120,
        ..Default::default()
    };
    let seeder = Seeder::new(MemoryStore::failing_after_writes(6), config).unwrap();
    let mut rng = RngSource::seeded(23);

    seeder.run(&mut rng).await.expect_err("store should fail while creating users");
    assert_eq!(seeder.store().snapshot().await.users.len(), 1);

    seeder.store().set_unavailable(false).await;
    let report = seeder.run(&mut rng).await.expect("resumed run failed");
    assert_eq!(report.supplementary_users_created, 120);

    let snapshot = seeder.store().snapshot().await;
    assert_eq!(snapshot.users.len(), 121);
    assert_eq!(snapshot.tasks.len(), 100);
}

#[tokio::test]
async fn test_same_seed_same_result() {
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();

    let a = seeder(MemoryStore::new());
    a.run_at(now, &mut RngSource::seeded(42)).await.unwrap();
    let b = seeder(MemoryStore::new());
    b.run_at(now, &mut RngSource::seeded(42)).await.unwrap();

    let (a, b) = (a.store().snapshot().await, b.store().snapshot().await);
    assert_eq!(a.tasks, b.tasks);
    assert_eq!(a.links, b.links);
}
