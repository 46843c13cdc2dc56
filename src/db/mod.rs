mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, Row};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Entry, EntryInput, EntryType};

/// The entry store.
///
/// Wraps a single SQLite connection behind a mutex; every operation holds the
/// lock for its full duration, so each create/update/delete is atomic from
/// the caller's point of view. Clones share the connection, which is how the
/// router state hands the store to concurrent request handlers.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "work-journal")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("journal.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Entry operations
    // ============================================================

    /// All entries. Ordering here is deterministic but incidental; callers
    /// wanting the weekly view go through [`crate::journal::group_by_week`].
    pub fn list_entries(&self) -> Result<Vec<Entry>, StoreError> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, date, type, text, created_at, updated_at
             FROM entries ORDER BY date DESC, created_at DESC, id",
        )?;

        let entries = stmt
            .query_map([], map_entry_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    pub fn get_entry(&self, id: Uuid) -> Result<Option<Entry>, StoreError> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, date, type, text, created_at, updated_at
             FROM entries WHERE id = ?",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(map_entry_row(row)?)),
            None => Ok(None),
        }
    }

    /// Validate and insert a new entry. Validation runs before the insert,
    /// so a rejected input leaves no row behind.
    pub fn create_entry(&self, input: EntryInput) -> Result<Entry, StoreError> {
        let valid = input.validate()?;

        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO entries (id, date, type, text, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                valid.date.to_string(),
                valid.kind.as_str(),
                &valid.text,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(Entry {
            id,
            date: valid.date,
            kind: valid.kind,
            text: valid.text,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace an entry's date, type, and text. Same validation as create;
    /// fails with [`StoreError::NotFound`] if the id does not exist.
    pub fn update_entry(&self, id: Uuid, input: EntryInput) -> Result<Entry, StoreError> {
        let valid = input.validate()?;

        let existing = self.get_entry(id)?.ok_or(StoreError::NotFound)?;

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();

        conn.execute(
            "UPDATE entries SET date = ?, type = ?, text = ?, updated_at = ? WHERE id = ?",
            (
                valid.date.to_string(),
                valid.kind.as_str(),
                &valid.text,
                now.to_rfc3339(),
                id.to_string(),
            ),
        )?;

        Ok(Entry {
            id,
            date: valid.date,
            kind: valid.kind,
            text: valid.text,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete an entry. A repeat delete of an already-deleted id is also
    /// [`StoreError::NotFound`] rather than silently ignored, so caller bugs
    /// surface.
    pub fn delete_entry(&self, id: Uuid) -> Result<(), StoreError> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM entries WHERE id = ?", [id.to_string()])?;
        if rows > 0 {
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn map_entry_row(row: &Row) -> rusqlite::Result<Entry> {
    let kind_raw: String = row.get(2)?;
    // A stored type outside the enumerated set means the write path's
    // contract was violated; fail loudly rather than defaulting.
    let kind = EntryType::from_str(&kind_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            format!("unknown entry type: {kind_raw}").into(),
        )
    })?;

    let date_raw: String = row.get(1)?;
    let date = NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Entry {
        id: parse_uuid(row.get::<_, String>(0)?),
        date,
        kind,
        text: row.get(3)?,
        created_at: parse_datetime(row.get::<_, String>(4)?),
        updated_at: parse_datetime(row.get::<_, String>(5)?),
    })
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
