use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::Database;
use crate::error::StoreError;
use crate::journal;
use crate::models::*;

// ============================================================
// Error Handling
// ============================================================

/// Map a store error onto an HTTP response.
///
/// Validation failures name the offending fields and go back as 400;
/// missing entries are 404. Anything database-internal is logged
/// server-side and sanitized to a generic message so clients never see
/// internal details.
fn store_error(e: StoreError) -> (StatusCode, String) {
    match e {
        StoreError::Validation(fields) => {
            tracing::warn!("Validation error: {}", fields);
            (StatusCode::BAD_REQUEST, fields.to_string())
        }
        StoreError::NotFound => (StatusCode::NOT_FOUND, "Entry not found".to_string()),
        StoreError::Database(e) => {
            tracing::error!("Internal error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Weekly listing
// ============================================================

/// The list view: all entries grouped into week buckets, newest week first.
/// Regrouped from the store on every request so mutations show up
/// immediately.
pub async fn list_weeks(
    State(db): State<Database>,
) -> Result<Json<Vec<WeekBucket>>, (StatusCode, String)> {
    db.list_entries()
        .map(journal::group_by_week)
        .map(Json)
        .map_err(store_error)
}

// ============================================================
// Entries
// ============================================================

pub async fn list_entries(
    State(db): State<Database>,
) -> Result<Json<Vec<Entry>>, (StatusCode, String)> {
    db.list_entries().map(Json).map_err(store_error)
}

pub async fn get_entry(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<Entry>, (StatusCode, String)> {
    db.get_entry(id)
        .map_err(store_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Entry not found".to_string()))
}

pub async fn create_entry(
    State(db): State<Database>,
    Json(input): Json<EntryInput>,
) -> Result<(StatusCode, Json<Entry>), (StatusCode, String)> {
    db.create_entry(input)
        .map(|e| (StatusCode::CREATED, Json(e)))
        .map_err(store_error)
}

pub async fn update_entry(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(input): Json<EntryInput>,
) -> Result<Json<Entry>, (StatusCode, String)> {
    db.update_entry(id, input).map(Json).map_err(store_error)
}

pub async fn delete_entry(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    db.delete_entry(id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(store_error)
}

// ============================================================
// Form submissions
// ============================================================

/// Create-entry form on the journal front page.
pub async fn submit_entry(
    State(db): State<Database>,
    Form(input): Form<EntryInput>,
) -> Result<Redirect, (StatusCode, String)> {
    db.create_entry(input).map_err(store_error)?;
    Ok(Redirect::to("/"))
}

/// What the edit form's submit button asked for.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EditAction {
    Save,
    Delete,
}

/// Fields posted by the edit form. On delete only the id (from the URL)
/// matters, so the entry fields default to empty and are only validated
/// on save.
#[derive(Debug, Deserialize)]
pub struct EditEntryForm {
    #[serde(default)]
    pub date: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "_action")]
    pub action: EditAction,
}

/// Edit form on the per-entry page: saves or deletes depending on the
/// `_action` discriminator, then sends the browser back to the listing.
pub async fn submit_entry_edit(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Form(form): Form<EditEntryForm>,
) -> Result<Redirect, (StatusCode, String)> {
    match form.action {
        EditAction::Delete => db.delete_entry(id).map_err(store_error)?,
        EditAction::Save => {
            db.update_entry(
                id,
                EntryInput {
                    date: form.date,
                    kind: form.kind,
                    text: form.text,
                },
            )
            .map_err(store_error)?;
        }
    }

    Ok(Redirect::to("/"))
}
