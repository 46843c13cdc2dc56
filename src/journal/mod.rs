//! Weekly grouping of journal entries.
//!
//! The single non-trivial transformation in the system: a flat entry list
//! becomes an ordered sequence of [`WeekBucket`]s, newest week first, each
//! bucket holding the week's entries split by type. Pure function of its
//! input; all I/O stays in [`crate::db`].

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

use crate::models::{Entry, EntryType, WeekBucket};

/// The Monday on or before `date`.
///
/// Weeks start on Monday (ISO convention). This rule is load-bearing for
/// bucket grouping and must stay consistent across create, list, and edit,
/// so it lives in exactly one place. Pure calendar arithmetic on
/// `NaiveDate`; no timezone is involved, so an entry can never shift into
/// the adjacent week near a day boundary.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// Partition entries into week buckets ordered newest week first.
///
/// Input order does not matter. Within a bucket, each typed sub-list is
/// ordered descending by date, with `created_at` (then id) breaking ties
/// between same-date entries, so repeated calls over unchanged data produce
/// identical output. Empty input yields an empty sequence.
pub fn group_by_week(mut entries: Vec<Entry>) -> Vec<WeekBucket> {
    entries.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut buckets: BTreeMap<NaiveDate, WeekBucket> = BTreeMap::new();
    for entry in entries {
        let key = week_start(entry.date);
        let bucket = buckets
            .entry(key)
            .or_insert_with(|| WeekBucket::empty(key));

        match entry.kind {
            EntryType::Work => bucket.work.push(entry),
            EntryType::Learnings => bucket.learnings.push(entry),
            EntryType::Thoughts => bucket.thoughts.push(entry),
        }
    }

    // BTreeMap iterates ascending by key; the listing wants newest first.
    buckets.into_values().rev().collect()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry_at(day: &str, kind: EntryType, text: &str, created_secs: i64) -> Entry {
        let created: DateTime<Utc> = DateTime::from_timestamp(created_secs, 0).unwrap();
        Entry {
            id: Uuid::new_v4(),
            date: date(day),
            kind,
            text: text.to_string(),
            created_at: created,
            updated_at: created,
        }
    }

    fn entry(day: &str, kind: EntryType, text: &str) -> Entry {
        entry_at(day, kind, text, 0)
    }

    #[test]
    fn week_start_is_the_preceding_monday() {
        // 2024-01-03 is a Wednesday
        assert_eq!(week_start(date("2024-01-03")), date("2024-01-01"));
        // A Monday starts its own week
        assert_eq!(week_start(date("2024-01-01")), date("2024-01-01"));
        // A Sunday belongs to the week of the Monday six days earlier
        assert_eq!(week_start(date("2023-12-31")), date("2023-12-25"));
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        assert!(group_by_week(Vec::new()).is_empty());
    }

    #[test]
    fn splits_entries_into_weeks_newest_first() {
        let weeks = group_by_week(vec![
            entry("2024-01-03", EntryType::Work, "A"),
            entry("2024-01-01", EntryType::Learnings, "B"),
            entry("2023-12-30", EntryType::Thoughts, "C"),
        ]);

        assert_eq!(weeks.len(), 2);

        assert_eq!(weeks[0].week_start, date("2024-01-01"));
        assert_eq!(weeks[0].work.len(), 1);
        assert_eq!(weeks[0].work[0].text, "A");
        assert_eq!(weeks[0].learnings.len(), 1);
        assert_eq!(weeks[0].learnings[0].text, "B");
        assert!(weeks[0].thoughts.is_empty());

        assert_eq!(weeks[1].week_start, date("2023-12-25"));
        assert!(weeks[1].work.is_empty());
        assert!(weeks[1].learnings.is_empty());
        assert_eq!(weeks[1].thoughts.len(), 1);
        assert_eq!(weeks[1].thoughts[0].text, "C");
    }

    #[test]
    fn sunday_and_monday_land_in_different_weeks() {
        let weeks = group_by_week(vec![
            entry("2024-01-07", EntryType::Work, "sunday"),
            entry("2024-01-08", EntryType::Work, "monday"),
        ]);

        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].week_start, date("2024-01-08"));
        assert_eq!(weeks[0].work[0].text, "monday");
        assert_eq!(weeks[1].week_start, date("2024-01-01"));
        assert_eq!(weeks[1].work[0].text, "sunday");
    }

    #[test]
    fn partitions_by_type_within_a_week() {
        let weeks = group_by_week(vec![
            entry("2024-01-02", EntryType::Thoughts, "t"),
            entry("2024-01-02", EntryType::Work, "w"),
            entry("2024-01-03", EntryType::Learnings, "l"),
        ]);

        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].work.len(), 1);
        assert_eq!(weeks[0].learnings.len(), 1);
        assert_eq!(weeks[0].thoughts.len(), 1);
    }

    #[test]
    fn sub_lists_are_ordered_by_date_descending() {
        let weeks = group_by_week(vec![
            entry("2024-01-01", EntryType::Work, "oldest"),
            entry("2024-01-05", EntryType::Work, "newest"),
            entry("2024-01-03", EntryType::Work, "middle"),
        ]);

        let texts: Vec<_> = weeks[0].work.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn same_date_entries_are_ordered_by_creation_descending() {
        let weeks = group_by_week(vec![
            entry_at("2024-01-03", EntryType::Work, "first", 100),
            entry_at("2024-01-03", EntryType::Work, "second", 200),
        ]);

        let texts: Vec<_> = weeks[0].work.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[test]
    fn every_entry_lands_in_exactly_one_sub_list() {
        let input = vec![
            entry("2024-01-03", EntryType::Work, "a"),
            entry("2024-01-04", EntryType::Learnings, "b"),
            entry("2024-01-10", EntryType::Thoughts, "c"),
            entry("2023-11-20", EntryType::Work, "d"),
            entry("2024-01-03", EntryType::Work, "e"),
        ];
        let mut expected: Vec<Uuid> = input.iter().map(|e| e.id).collect();
        expected.sort();

        let weeks = group_by_week(input);
        let mut seen: Vec<Uuid> = weeks
            .iter()
            .flat_map(|w| {
                w.work
                    .iter()
                    .chain(&w.learnings)
                    .chain(&w.thoughts)
                    .map(|e| e.id)
            })
            .collect();
        seen.sort();

        assert_eq!(seen, expected);
    }

    #[test]
    fn repeated_calls_produce_identical_output() {
        let input = vec![
            entry_at("2024-01-03", EntryType::Work, "a", 10),
            entry_at("2024-01-03", EntryType::Learnings, "b", 20),
            entry_at("2023-12-30", EntryType::Thoughts, "c", 30),
            entry_at("2024-01-03", EntryType::Work, "d", 10),
        ];

        assert_eq!(group_by_week(input.clone()), group_by_week(input));
    }
}
