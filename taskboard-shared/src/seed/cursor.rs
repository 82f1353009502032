/// Resumable primary-key cursor for batch scans
///
/// A cursor remembers the last task id handled. The next batch asks for ids
/// strictly greater than it, so a scan always moves forward and never
/// revisits a finished batch. Cursors are plain values: callers may store one
/// and hand it back later to resume.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchCursor {
    after_id: Option<i64>,
}

impl BatchCursor {
    /// Cursor positioned before every row
    pub const fn start() -> Self {
        Self { after_id: None }
    }

    /// Cursor positioned after `id`
    pub const fn after(id: i64) -> Self {
        Self { after_id: Some(id) }
    }

    /// Last id already handled (None at the start)
    pub fn after_id(&self) -> Option<i64> {
        self.after_id
    }

    /// Whether `id` lies ahead of the cursor
    pub fn admits(&self, id: i64) -> bool {
        self.after_id.map_or(true, |after| id > after)
    }

    /// Moves past the highest id of a fetched batch
    ///
    /// An empty batch leaves the cursor where it was.
    pub fn advance(self, batch: &[i64]) -> Self {
        match batch.iter().max() {
            Some(&last) if self.admits(last) => Self::after(last),
            _ => self,
        }
    }
}
