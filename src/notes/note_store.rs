//! Note Storage
//! Mission: Persist user-owned notes with SQLite

use crate::notes::models::{Note, NotePatch};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tracing::info;
use uuid::Uuid;

const NOTE_COLUMNS: &str = "id, title, content, tags, is_pinned, user_id, created_at, updated_at";

/// Note storage with SQLite backend.
///
/// Every lookup filters on both note id and owner id, so no operation
/// can observe or affect another user's note.
pub struct NoteStore {
    db_path: String,
}

impl NoteStore {
    /// Create a new note store and initialize the schema
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS notes (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                tags TEXT NOT NULL,
                is_pinned INTEGER NOT NULL DEFAULT 0,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_notes_user ON notes(user_id)",
            [],
        )?;

        Ok(())
    }

    fn row_to_note(row: &rusqlite::Row<'_>) -> rusqlite::Result<Note> {
        let tags_json: String = row.get(3)?;
        let created_at: String = row.get(6)?;
        let updated_at: String = row.get(7)?;

        Ok(Note {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
            title: row.get(1)?,
            content: row.get(2)?,
            tags: serde_json::from_str(&tags_json).unwrap_or_default(),
            is_pinned: row.get(4)?,
            user_id: Uuid::parse_str(&row.get::<_, String>(5)?).unwrap(),
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .unwrap()
                .with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339(&updated_at)
                .unwrap()
                .with_timezone(&Utc),
        })
    }

    /// Persist a new note owned by `user_id`, unpinned.
    pub fn create_note(
        &self,
        user_id: &Uuid,
        title: &str,
        content: &str,
        tags: Vec<String>,
    ) -> Result<Note> {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            tags,
            is_pinned: false,
            user_id: *user_id,
            created_at: now,
            updated_at: now,
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO notes (id, title, content, tags, is_pinned, user_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                note.id.to_string(),
                note.title,
                note.content,
                serde_json::to_string(&note.tags)?,
                note.is_pinned,
                note.user_id.to_string(),
                note.created_at.to_rfc3339(),
                note.updated_at.to_rfc3339(),
            ],
        )
        .context("Failed to insert note")?;

        info!("📝 Note {} created for user {}", note.id, user_id);

        Ok(note)
    }

    /// Fetch a single note owned by `user_id`.
    pub fn get_note(&self, user_id: &Uuid, note_id: &Uuid) -> Result<Option<Note>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1 AND user_id = ?2"
        ))?;

        let note_result = stmt.query_row(
            params![note_id.to_string(), user_id.to_string()],
            Self::row_to_note,
        );

        match note_result {
            Ok(note) => Ok(Some(note)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Apply the provided patch fields to a note owned by `user_id`.
    ///
    /// Returns `None` when no note matches both ids.
    pub fn update_note(
        &self,
        user_id: &Uuid,
        note_id: &Uuid,
        patch: &NotePatch,
    ) -> Result<Option<Note>> {
        let Some(mut note) = self.get_note(user_id, note_id)? else {
            return Ok(None);
        };

        if let Some(title) = &patch.title {
            note.title = title.clone();
        }
        if let Some(content) = &patch.content {
            note.content = content.clone();
        }
        if let Some(tags) = &patch.tags {
            note.tags = tags.clone();
        }
        // Presence check: an explicit false clears the flag.
        if let Some(pinned) = patch.is_pinned {
            note.is_pinned = pinned;
        }
        note.updated_at = Utc::now();

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "UPDATE notes SET title = ?1, content = ?2, tags = ?3, is_pinned = ?4, updated_at = ?5
             WHERE id = ?6 AND user_id = ?7",
            params![
                note.title,
                note.content,
                serde_json::to_string(&note.tags)?,
                note.is_pinned,
                note.updated_at.to_rfc3339(),
                note.id.to_string(),
                note.user_id.to_string(),
            ],
        )
        .context("Failed to update note")?;

        Ok(Some(note))
    }

    /// Set the pinned flag on a note owned by `user_id`.
    pub fn set_pinned(&self, user_id: &Uuid, note_id: &Uuid, pinned: bool) -> Result<Option<Note>> {
        let patch = NotePatch {
            is_pinned: Some(pinned),
            ..Default::default()
        };
        self.update_note(user_id, note_id, &patch)
    }

    /// All notes owned by `user_id`, pinned first, insertion order within
    /// each group.
    pub fn list_notes(&self, user_id: &Uuid) -> Result<Vec<Note>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE user_id = ?1
             ORDER BY is_pinned DESC, created_at ASC"
        ))?;

        let notes = stmt
            .query_map(params![user_id.to_string()], Self::row_to_note)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    /// Remove a note owned by `user_id`. Returns false when nothing matched.
    pub fn delete_note(&self, user_id: &Uuid, note_id: &Uuid) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected = conn.execute(
            "DELETE FROM notes WHERE id = ?1 AND user_id = ?2",
            params![note_id.to_string(), user_id.to_string()],
        )?;

        if rows_affected > 0 {
            info!("🗑️  Note {} deleted by user {}", note_id, user_id);
        }

        Ok(rows_affected > 0)
    }

    /// Notes owned by `user_id` whose title or content contains `query`,
    /// case-insensitively.
    pub fn search_notes(&self, user_id: &Uuid, query: &str) -> Result<Vec<Note>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes
             WHERE user_id = ?1
               AND (INSTR(LOWER(title), LOWER(?2)) > 0
                 OR INSTR(LOWER(content), LOWER(?2)) > 0)
             ORDER BY is_pinned DESC, created_at ASC"
        ))?;

        let notes = stmt
            .query_map(params![user_id.to_string(), query], Self::row_to_note)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (NoteStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = NoteStore::new(db_path).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_create_and_retrieve_note() {
        let (store, _temp) = create_test_store();
        let owner = Uuid::new_v4();

        let note = store
            .create_note(&owner, "Groceries", "milk, eggs", vec!["home".to_string()])
            .unwrap();
        assert!(!note.is_pinned);
        assert_eq!(note.user_id, owner);

        let fetched = store.get_note(&owner, &note.id).unwrap().unwrap();
        assert_eq!(fetched.title, "Groceries");
        assert_eq!(fetched.tags, vec!["home".to_string()]);
    }

    #[test]
    fn test_ownership_isolation() {
        let (store, _temp) = create_test_store();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();

        let note = store.create_note(&owner, "Private", "secret", vec![]).unwrap();

        // Reads, updates, pin changes, and deletes by another user all miss.
        assert!(store.get_note(&intruder, &note.id).unwrap().is_none());

        let patch = NotePatch {
            title: Some("Hijacked".to_string()),
            ..Default::default()
        };
        assert!(store.update_note(&intruder, &note.id, &patch).unwrap().is_none());
        assert!(store.set_pinned(&intruder, &note.id, true).unwrap().is_none());
        assert!(!store.delete_note(&intruder, &note.id).unwrap());

        // Owner's view is untouched.
        let fetched = store.get_note(&owner, &note.id).unwrap().unwrap();
        assert_eq!(fetched.title, "Private");
        assert!(!fetched.is_pinned);
        assert!(store.list_notes(&intruder).unwrap().is_empty());
    }

    #[test]
    fn test_update_applies_only_provided_fields() {
        let (store, _temp) = create_test_store();
        let owner = Uuid::new_v4();

        let note = store
            .create_note(&owner, "Title", "Content", vec!["a".to_string()])
            .unwrap();

        let patch = NotePatch {
            content: Some("New content".to_string()),
            ..Default::default()
        };
        let updated = store.update_note(&owner, &note.id, &patch).unwrap().unwrap();

        assert_eq!(updated.title, "Title");
        assert_eq!(updated.content, "New content");
        assert_eq!(updated.tags, vec!["a".to_string()]);
        assert!(updated.updated_at >= note.updated_at);
    }

    #[test]
    fn test_unpin_is_not_dropped() {
        let (store, _temp) = create_test_store();
        let owner = Uuid::new_v4();

        let note = store.create_note(&owner, "T", "C", vec![]).unwrap();

        let pinned = store.set_pinned(&owner, &note.id, true).unwrap().unwrap();
        assert!(pinned.is_pinned);

        // An explicit false must clear the flag.
        let unpinned = store.set_pinned(&owner, &note.id, false).unwrap().unwrap();
        assert!(!unpinned.is_pinned);

        let fetched = store.get_note(&owner, &note.id).unwrap().unwrap();
        assert!(!fetched.is_pinned);
    }

    #[test]
    fn test_list_orders_pinned_first() {
        let (store, _temp) = create_test_store();
        let owner = Uuid::new_v4();

        store.create_note(&owner, "a", "1", vec![]).unwrap();
        store.create_note(&owner, "b", "2", vec![]).unwrap();
        let c = store.create_note(&owner, "c", "3", vec![]).unwrap();

        store.set_pinned(&owner, &c.id, true).unwrap();

        let notes = store.list_notes(&owner).unwrap();
        let titles: Vec<&str> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let (store, _temp) = create_test_store();
        let owner = Uuid::new_v4();

        store.create_note(&owner, "Note", "hello world", vec![]).unwrap();
        store.create_note(&owner, "Say Hello", "x", vec![]).unwrap();
        store.create_note(&owner, "Unrelated", "y", vec![]).unwrap();

        let hits = store.search_notes(&owner, "Hello").unwrap();
        assert_eq!(hits.len(), 2);

        let none = store.search_notes(&owner, "absent").unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_search_does_not_cross_owners() {
        let (store, _temp) = create_test_store();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        store.create_note(&owner, "Shared word", "hello", vec![]).unwrap();

        assert!(store.search_notes(&other, "hello").unwrap().is_empty());
    }

    #[test]
    fn test_delete_note() {
        let (store, _temp) = create_test_store();
        let owner = Uuid::new_v4();

        let note = store.create_note(&owner, "T", "C", vec![]).unwrap();

        assert!(store.delete_note(&owner, &note.id).unwrap());
        assert!(store.get_note(&owner, &note.id).unwrap().is_none());

        // Second delete finds nothing.
        assert!(!store.delete_note(&owner, &note.id).unwrap());
    }

    #[test]
    fn test_tags_roundtrip() {
        let (store, _temp) = create_test_store();
        let owner = Uuid::new_v4();

        let tags = vec!["work".to_string(), "urgent".to_string()];
        let note = store.create_note(&owner, "T", "C", tags.clone()).unwrap();

        let fetched = store.get_note(&owner, &note.id).unwrap().unwrap();
        assert_eq!(fetched.tags, tags);

        // Clearing tags persists an empty list.
        let patch = NotePatch {
            tags: Some(vec![]),
            ..Default::default()
        };
        let updated = store.update_note(&owner, &note.id, &patch).unwrap().unwrap();
        assert!(updated.tags.is_empty());
    }
}
