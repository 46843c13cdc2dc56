use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{InvalidFields, StoreError};

/// A single journal note.
///
/// Entries are the only persisted entity: each one carries the calendar date
/// it pertains to (no time-of-day semantics), one of the three entry types,
/// and free-form text. The id is assigned by the store on creation and never
/// changes, which makes it usable as an opaque token in edit/delete URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: EntryType,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The category of a journal entry.
///
/// Exactly three values exist; anything else is rejected at the validation
/// boundary before it can reach the store or the grouping engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Work,
    Learnings,
    Thoughts,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Learnings => "learnings",
            Self::Thoughts => "thoughts",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "work" => Some(Self::Work),
            "learnings" => Some(Self::Learnings),
            "thoughts" => Some(Self::Thoughts),
            _ => None,
        }
    }
}

/// Input for creating or updating an entry. Updates replace all fields.
///
/// Fields arrive as raw strings (from a form submission or a JSON body) and
/// are checked by [`EntryInput::validate`] rather than at deserialization
/// time, so a bad `type` or an empty `text` produces a validation error that
/// names the offending field instead of an opaque decode failure. Every field
/// defaults to empty so that a missing form field is reported the same way as
/// an empty one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryInput {
    #[serde(default)]
    pub date: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

/// An [`EntryInput`] whose fields all parsed and validated.
#[derive(Debug, Clone)]
pub struct ValidatedEntry {
    pub date: NaiveDate,
    pub kind: EntryType,
    pub text: String,
}

impl EntryInput {
    /// Parse and check every field, collecting the name of each invalid one.
    ///
    /// Runs before any store mutation, so a rejected submission leaves no
    /// partial record behind.
    pub fn validate(self) -> Result<ValidatedEntry, StoreError> {
        let mut invalid = InvalidFields::default();

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d");
        if date.is_err() {
            invalid.push("date");
        }

        let kind = EntryType::from_str(self.kind.trim());
        if kind.is_none() {
            invalid.push("type");
        }

        if self.text.trim().is_empty() {
            invalid.push("text");
        }

        match (date, kind) {
            (Ok(date), Some(kind)) if invalid.is_empty() => Ok(ValidatedEntry {
                date,
                kind,
                text: self.text,
            }),
            _ => Err(StoreError::Validation(invalid)),
        }
    }
}
