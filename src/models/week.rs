use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Entry;

/// One calendar week of entries, split by entry type.
///
/// Derived on every read by [`crate::journal::group_by_week`] and never
/// persisted or cached, so a listing always reflects the latest store state.
/// `week_start` is the Monday of the week and serves as the display key.
/// A type with no entries that week is an empty list, never an absent field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekBucket {
    pub week_start: NaiveDate,
    pub work: Vec<Entry>,
    pub learnings: Vec<Entry>,
    pub thoughts: Vec<Entry>,
}

impl WeekBucket {
    pub fn empty(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            work: Vec::new(),
            learnings: Vec::new(),
            thoughts: Vec::new(),
        }
    }
}
