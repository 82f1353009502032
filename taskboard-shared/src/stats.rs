/// Dashboard aggregation
///
/// Task counts for the dashboard: completed vs pending, pending tasks due
/// today, and tasks created per weekday. Aggregates are fetched with three
/// queries and reshaped into chart payloads (`labels` plus `datasets`).
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::stats::{to_series, DashboardStats};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let today = chrono::Utc::now().date_naive();
/// let stats = DashboardStats::collect(&pool, today).await?;
///
/// for point in to_series(&stats.weekday_chart()) {
///     println!("{}: {}", point.label, point.value);
/// }
/// # Ok(())
/// # }
/// ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Weekday labels, Monday first
pub const WEEKDAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One dataset of a chart payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub data: Vec<i64>,
}

/// Chart payload in the shape the dashboard consumes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<ChartDataset>,
}

/// A labelled value read out of a chart payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: i64,
}

/// Aggregated task counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub completed: i64,
    pub pending: i64,
    pub pending_due_today: i64,
    /// Tasks created per weekday, Monday first
    pub created_by_weekday: [i64; 7],
}

impl DashboardStats {
    /// Runs the dashboard aggregates against the task table
    pub async fn collect(pool: &PgPool, today: NaiveDate) -> Result<Self, sqlx::Error> {
        let (completed, pending) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE is_completed),
                COUNT(*) FILTER (WHERE NOT is_completed)
            FROM tasks
            "#,
        )
        .fetch_one(pool)
        .await?;

        let pending_due_today = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM tasks WHERE NOT is_completed AND due_date = $1",
        )
        .bind(today)
        .fetch_one(pool)
        .await?;

        let rows = sqlx::query_as::<_, (i32, i64)>(
            r#"
            SELECT EXTRACT(ISODOW FROM created_at)::INT4 AS weekday, COUNT(*)
            FROM tasks
            GROUP BY weekday
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(Self {
            completed,
            pending,
            pending_due_today,
            created_by_weekday: weekday_counts(&rows),
        })
    }

    /// Completed vs pending chart
    pub fn completion_chart(&self) -> ChartData {
        completion_chart(self.completed, self.pending)
    }

    /// Tasks created per weekday chart
    pub fn weekday_chart(&self) -> ChartData {
        weekday_chart(&self.created_by_weekday)
    }
}

/// Folds `(ISO weekday, count)` rows into a Monday-first array
///
/// Weekdays outside 1..=7 are ignored; missing days stay zero.
pub fn weekday_counts(rows: &[(i32, i64)]) -> [i64; 7] {
    let mut counts = [0; 7];
    for &(weekday, count) in rows {
        if (1..=7).contains(&weekday) {
            counts[(weekday - 1) as usize] += count;
        }
    }
    counts
}

pub fn completion_chart(completed: i64, pending: i64) -> ChartData {
    ChartData {
        labels: vec!["Completed".to_string(), "Pending".to_string()],
        datasets: vec![ChartDataset {
            label: Some("Tasks".to_string()),
            data: vec![completed, pending],
        }],
    }
}

pub fn weekday_chart(counts: &[i64; 7]) -> ChartData {
    ChartData {
        labels: WEEKDAY_LABELS.iter().map(|label| label.to_string()).collect(),
        datasets: vec![ChartDataset {
            label: Some("Tasks created".to_string()),
            data: counts.to_vec(),
        }],
    }
}

/// Pairs each label with the matching value of the first dataset
///
/// Missing values read as 0 and values past the last label are dropped.
pub fn to_series(chart: &ChartData) -> Vec<SeriesPoint> {
    let values = chart
        .datasets
        .first()
        .map(|dataset| dataset.data.as_slice())
        .unwrap_or_default();

    chart
        .labels
        .iter()
        .enumerate()
        .map(|(idx, label)| SeriesPoint {
            label: label.clone(),
            value: values.get(idx).copied().unwrap_or(0),
        })
        .collect()
}
