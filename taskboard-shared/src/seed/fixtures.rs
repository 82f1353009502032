/// Placeholder record generation
///
/// Generated values are plausible but meaningless: task names built from a
/// verb and an object, people names from short lists, and due dates spread
/// around a reference day.

use crate::models::task::NewTask;
use crate::models::user::NewUser;
use crate::seed::random::RandomSource;
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Due dates fall within this many days either side of the reference day
pub const DUE_DATE_WINDOW_DAYS: i64 = 30;

/// Domain used for generated email addresses
pub const PLACEHOLDER_EMAIL_DOMAIN: &str = "example.org";

const TASK_VERBS: [&str; 12] = [
    "Review", "Draft", "Plan", "Call", "Buy", "Organize", "Fix", "Schedule", "Clean", "Update",
    "Prepare", "Send",
];

const TASK_OBJECTS: [&str; 12] = [
    "quarterly report",
    "team meeting",
    "grocery list",
    "dentist appointment",
    "birthday gift",
    "garage shelves",
    "leaking faucet",
    "project roadmap",
    "travel itinerary",
    "budget spreadsheet",
    "presentation slides",
    "invoice reminders",
];

const FIRST_NAMES: [&str; 10] = [
    "Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Frances", "Ken", "Radia", "Tony",
];

const LAST_NAMES: [&str; 10] = [
    "Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth", "Allen", "Thompson", "Perlman",
    "Hoare",
];

fn pick<'a, R: RandomSource + ?Sized>(items: &[&'a str], rng: &mut R) -> &'a str {
    items[rng.next_in_range(0, items.len() - 1)]
}

/// Random placeholder task due within the window around `today`
///
/// Completion is a fair coin. Media is never set.
pub fn placeholder_task<R: RandomSource + ?Sized>(rng: &mut R, today: NaiveDate) -> NewTask {
    let name = format!("{} {}", pick(&TASK_VERBS, rng), pick(&TASK_OBJECTS, rng));
    let is_completed = rng.chance(1, 2);
    let span = (2 * DUE_DATE_WINDOW_DAYS) as usize;
    let offset = rng.next_in_range(0, span) as i64 - DUE_DATE_WINDOW_DAYS;

    NewTask {
        name,
        is_completed,
        due_date: Some(today + Duration::days(offset)),
        media: None,
    }
}

/// Placeholder user number `index`, verified at `now`
///
/// The index is part of the email, so users generated in one run never
/// share an address.
pub fn placeholder_user<R: RandomSource + ?Sized>(
    rng: &mut R,
    index: usize,
    password_hash: &str,
    now: DateTime<Utc>,
) -> NewUser {
    let first = pick(&FIRST_NAMES, rng);
    let last = pick(&LAST_NAMES, rng);

    NewUser {
        name: format!("{} {}", first, last),
        email: format!(
            "{}.{}{}@{}",
            first.to_lowercase(),
            last.to_lowercase(),
            index + 1,
            PLACEHOLDER_EMAIL_DOMAIN
        ),
        password_hash: password_hash.to_string(),
        email_verified_at: Some(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::random::{RngSource, ScriptedSource};
    use std::collections::HashSet;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_placeholder_task_due_within_window() {
        let mut rng = RngSource::seeded(17);
        for _ in 0..500 {
            let task = placeholder_task(&mut rng, day());
            let due = task.due_date.expect("due date is always set");
            assert!((due - day()).num_days().abs() <= DUE_DATE_WINDOW_DAYS);
            assert!(task.media.is_none());
            assert!(!task.name.is_empty());
        }
    }

    #[test]
    fn test_placeholder_task_from_script() {
        // verb 0, object 2, coin 1 (<= 1 -> completed), offset 0 -> -30 days
        let mut rng = ScriptedSource::new(vec![0, 2, 0, 0]);
        let task = placeholder_task(&mut rng, day());

        assert_eq!(task.name, "Review grocery list");
        assert!(task.is_completed);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 5, 16));
    }

    #[test]
    fn test_completion_flags_are_mixed() {
        let mut rng = RngSource::seeded(4);
        let completed = (0..200)
            .filter(|_| placeholder_task(&mut rng, day()).is_completed)
            .count();
        assert!(completed > 50 && completed < 150);
    }

    #[test]
    fn test_placeholder_users_have_unique_emails() {
        let mut rng = RngSource::seeded(9);
        let now = Utc::now();

        let emails: HashSet<String> = (0..100)
            .map(|i| placeholder_user(&mut rng, i, "hash", now).email)
            .collect();
        assert_eq!(emails.len(), 100);
    }

    #[test]
    fn test_placeholder_user_fields() {
        let mut rng = ScriptedSource::new(vec![0, 1]);
        let now = Utc::now();
        let user = placeholder_user(&mut rng, 0, "$argon2id$x", now);

        assert_eq!(user.name, "Ada Hopper");
        assert_eq!(user.email, "ada.hopper1@example.org");
        assert_eq!(user.password_hash, "$argon2id$x");
        assert_eq!(user.email_verified_at, Some(now));
    }
}
