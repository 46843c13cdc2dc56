//! Domain models for the work journal.
//!
//! # Core Concepts
//!
//! ## Persisted
//!
//! - [`Entry`]: a single dated, typed journal note. The id is assigned on
//!   creation and stable thereafter; `type` is always one of the three
//!   [`EntryType`] values.
//!
//! ## Derived
//!
//! - [`WeekBucket`]: entries of one calendar week split into the three typed
//!   sub-lists. Recomputed from the full entry list on every read, never
//!   persisted or cached across mutations.

mod entry;
mod week;

pub use entry::*;
pub use week::*;
