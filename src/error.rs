use std::fmt;

use thiserror::Error;

/// The names of every request field that failed validation.
///
/// Collected in full rather than failing on the first bad field, so a
/// submission with several problems reports all of them at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidFields(Vec<&'static str>);

impl InvalidFields {
    pub fn push(&mut self, field: &'static str) {
        self.0.push(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[&'static str] {
        &self.0
    }
}

impl fmt::Display for InvalidFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid field(s): {}", self.0.join(", "))
    }
}

/// Errors produced by the entry store.
///
/// `Validation` and `NotFound` are caller-visible and map to 400/404 at the
/// HTTP boundary. `Database` covers unexpected store-internal failures; it is
/// never retried here and surfaces to clients as a generic failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(InvalidFields),

    #[error("entry not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}
